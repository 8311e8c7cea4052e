use crate::{color::Color, vector::Vector2};

/// Drawing capability provided by the host.
pub trait Canvas {
    fn stroke_circle(&mut self, center: Vector2, radius: f32);

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color);

    fn stroke_line(&mut self, from: Vector2, to: Vector2);
}

#[cfg(test)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum Primitive {
    Circle(Vector2, f32),
    Disc(Vector2, f32, Color),
    Line(Vector2, Vector2),
}

#[cfg(test)]
impl Canvas for Vec<Primitive> {
    fn stroke_circle(&mut self, center: Vector2, radius: f32) {
        self.push(Primitive::Circle(center, radius));
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.push(Primitive::Disc(center, radius, color));
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2) {
        self.push(Primitive::Line(from, to));
    }
}
