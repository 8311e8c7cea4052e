pub type Color = (f32, f32, f32);

pub const BLACK: Color = (0.0, 0.0, 0.0);
pub const DARK_GREY: Color = (0.2, 0.2, 0.2);
pub const WHITE: Color = (1.0, 1.0, 1.0);

pub const EYE_COLOR: Color = BLACK;
