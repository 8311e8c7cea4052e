use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};

#[derive(
    Default,
    Debug,
    PartialEq,
    Clone,
    Copy,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Serialize,
    Deserialize,
)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians, scaled to `length`.
    pub fn polar(angle: f32, length: f32) -> Self {
        Self {
            x: length * angle.cos(),
            y: length * angle.sin(),
        }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product, positive when `other` is counter-clockwise from
    /// `self`.
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Unsigned angle between the two vectors in `[0, PI]`, `None` if either is zero.
    pub fn angle_to(self, other: Self) -> Option<f32> {
        let lengths = self.length() * other.length();
        if lengths == 0.0 {
            return None;
        }
        // Rounding can push the ratio slightly out of the acos domain.
        Some((self.dot(other) / lengths).max(-1.0).min(1.0).acos())
    }

    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn lerp(self, target: Self, ratio: f32) -> Self {
        self + (target - self) * ratio
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Self::Output {
        rhs * self
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: Vector2, expected: Vector2) {
    assert!(
        actual.distance(expected) < 1e-4,
        "{:?} is not close to {:?}",
        actual,
        expected
    );
}

#[test]
fn test_vector_length() {
    assert_eq!(Vector2::new(3.0, -4.0).length(), 5.0);
}

#[test]
fn test_vector_cross_sign() {
    let x = Vector2::new(1.0, 0.0);
    let y = Vector2::new(0.0, 1.0);
    assert_eq!(x.cross(y), 1.0);
    assert_eq!(y.cross(x), -1.0);
    assert_eq!(x.cross(x * 2.0), 0.0);
}

#[test]
fn test_vector_angle_to() {
    let x = Vector2::new(2.0, 0.0);
    assert_eq!(x.angle_to(Vector2::new(0.0, 5.0)), Some(std::f32::consts::FRAC_PI_2));
    assert_eq!(x.angle_to(Vector2::new(-1.0, 0.0)), Some(std::f32::consts::PI));
    assert_eq!(x.angle_to(x), Some(0.0));
}

#[test]
fn test_vector_angle_to_zero() {
    assert_eq!(Vector2::default().angle_to(Vector2::new(1.0, 0.0)), None);
    assert_eq!(Vector2::new(1.0, 0.0).angle_to(Vector2::default()), None);
}

#[test]
fn test_vector_rotate() {
    assert_close(
        Vector2::new(2.0, 0.0).rotate(std::f32::consts::FRAC_PI_2),
        Vector2::new(0.0, 2.0),
    );
    assert_close(
        Vector2::new(0.0, 1.0).rotate(-std::f32::consts::FRAC_PI_2),
        Vector2::new(1.0, 0.0),
    );
}

#[test]
fn test_vector_lerp() {
    let from = Vector2::new(100.0, 100.0);
    let to = Vector2::new(200.0, 50.0);
    assert_eq!(from.lerp(to, 0.0), from);
    assert_eq!(from.lerp(to, 1.0), to);
    assert_close(from.lerp(to, 0.1), Vector2::new(110.0, 95.0));
}

#[test]
fn test_vector_polar() {
    assert_close(Vector2::polar(0.0, 3.0), Vector2::new(3.0, 0.0));
    assert_close(
        Vector2::polar(std::f32::consts::PI, 2.0),
        Vector2::new(-2.0, 0.0),
    );
}
