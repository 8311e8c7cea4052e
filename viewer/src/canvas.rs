use amethyst::{
    core::math::Point3,
    renderer::{debug_drawing::DebugLines, palette::Srgba},
};
use slither_core::{canvas::Canvas, color::Color, vector::Vector2};
use std::f32::consts::PI;

const CIRCLE_POINTS: usize = 48;
/// Spacing between the rings used to fill a disc.
const FILL_STEP: f32 = 0.5;

/// Draws through the debug lines pass, so every shape is built out of line segments.
pub struct DebugLinesCanvas<'a> {
    lines: &'a mut DebugLines,
    stroke: Srgba,
}

impl<'a> DebugLinesCanvas<'a> {
    pub fn new(lines: &'a mut DebugLines, stroke: Color) -> Self {
        Self {
            lines,
            stroke: srgba(stroke),
        }
    }

    fn polyline(&mut self, points: &[Vector2], color: Srgba) {
        for pair in points.windows(2) {
            self.lines
                .draw_line(point3(pair[0]), point3(pair[1]), color);
        }
    }
}

impl<'a> Canvas for DebugLinesCanvas<'a> {
    fn stroke_circle(&mut self, center: Vector2, radius: f32) {
        let stroke = self.stroke;
        self.polyline(&circle(center, radius), stroke);
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        let color = srgba(color);
        for radius in fill_radii(radius) {
            self.polyline(&circle(center, radius), color);
        }
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2) {
        self.lines.draw_line(point3(from), point3(to), self.stroke);
    }
}

/// Closed polyline, the first point is repeated at the end.
fn circle(center: Vector2, radius: f32) -> Vec<Vector2> {
    (0..=CIRCLE_POINTS)
        .map(|i| center + Vector2::polar(2.0 * PI * i as f32 / CIRCLE_POINTS as f32, radius))
        .collect()
}

fn fill_radii(radius: f32) -> impl Iterator<Item = f32> {
    let rings = (radius / FILL_STEP).ceil().max(1.0) as usize;
    (1..=rings).map(move |ring| radius * ring as f32 / rings as f32)
}

fn point3(v: Vector2) -> Point3<f32> {
    Point3::new(v.x, v.y, 0.0)
}

fn srgba((r, g, b): Color) -> Srgba {
    Srgba::new(r, g, b, 1.0)
}

#[test]
fn test_circle_is_closed() {
    let center = Vector2::new(10.0, -5.0);
    let points = circle(center, 3.0);
    assert_eq!(points.len(), CIRCLE_POINTS + 1);
    assert!(points[0].distance(points[CIRCLE_POINTS]) < 1e-4);
    for point in points {
        assert!((point.distance(center) - 3.0).abs() < 1e-4);
    }
}

#[test]
fn test_fill_radii() {
    let radii: Vec<f32> = fill_radii(1.5).collect();
    assert_eq!(radii, vec![0.5, 1.0, 1.5]);
    let radii: Vec<f32> = fill_radii(0.1).collect();
    assert_eq!(radii, vec![0.1]);
}
