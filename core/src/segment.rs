use crate::{
    canvas::Canvas,
    color::EYE_COLOR,
    config::Decorations,
    vector::Vector2,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Leader-relative angle under which a segment is considered folded back onto its grand leader.
pub const FOLD_THRESHOLD: f32 = FRAC_PI_2;

const EYE_ANGLE: f32 = FRAC_PI_4;
const EYE_RADIUS_RATIO: f32 = 0.3;
const LEG_ANGLE: f32 = FRAC_PI_2;
const LEG_LENGTH_RATIO: f32 = 2.0;

/// Solver settings shared by every body segment.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Linkage {
    /// Fraction of the correction applied per frame, for both stages.
    pub smoothing: f32,
    /// Radians.
    pub min_angle: f32,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Appearance {
    pub decorations: Decorations,
    pub eye_smoothing: f32,
    pub leg_smoothing: f32,
}

#[derive(Debug, Clone)]
pub struct Segment {
    index: usize,
    position: Vector2,
    previous_position: Vector2,
    radius: f32,
    reach: f32,
    /* Filtered directions of travel, one per decoration rate */
    heading: f32,
    leg_heading: f32,
}

impl Segment {
    pub fn new(index: usize, position: Vector2, radius: f32, reach: f32) -> Self {
        Self {
            index,
            position,
            previous_position: position,
            radius,
            reach,
            heading: 0.0,
            leg_heading: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_head(&self) -> bool {
        self.index == 0
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn previous_position(&self) -> Vector2 {
        self.previous_position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// Smoothed direction of travel used for the eyes.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Moves toward `target` by `ratio` of the remaining distance, with no constraint.
    pub fn approach(&mut self, target: Vector2, ratio: f32) {
        self.position = self.position.lerp(target, ratio);
    }

    /// Trails `leader` at `reach`, then unfolds the chain if the angle formed with
    /// `grand_leader` is too sharp.
    pub fn follow(&mut self, leader: Vector2, grand_leader: Option<Vector2>, linkage: &Linkage) {
        self.keep_reach(leader, linkage.smoothing);
        if let Some(grand_leader) = grand_leader {
            self.unfold(leader, grand_leader, linkage);
        }
    }

    fn keep_reach(&mut self, leader: Vector2, smoothing: f32) {
        let offset = self.position - leader;
        let distance = offset.length();
        if distance == 0.0 || distance == self.reach {
            return;
        }
        let target = leader + offset * (self.reach / distance);
        self.position = self.position.lerp(target, smoothing);
    }

    /// Returns whether a correction was applied.
    fn unfold(&mut self, leader: Vector2, grand_leader: Vector2, linkage: &Linkage) -> bool {
        let to_grand_leader = grand_leader - leader;
        let to_self = self.position - leader;
        let angle = match to_grand_leader.angle_to(to_self) {
            Some(angle) => angle,
            None => return false,
        };
        if angle >= FOLD_THRESHOLD {
            return false;
        }
        let direction = if to_grand_leader.cross(to_self) > 0.0 {
            1.0
        } else {
            -1.0
        };
        // Scaling the rotation rather than the chord keeps the distance to the leader.
        let rotation = direction * (linkage.min_angle - angle) * linkage.smoothing;
        trace!(
            "segment {} folded at {:.1}°, rotating by {:.1}°",
            self.index,
            angle.to_degrees(),
            rotation.to_degrees()
        );
        self.position = leader + to_self.rotate(rotation);
        true
    }

    /// Direction of travel since the last render, `None` while the segment stands still.
    pub fn travel_direction(&self) -> Option<f32> {
        let delta = self.position - self.previous_position;
        if delta == Vector2::default() {
            None
        } else {
            Some(delta.angle())
        }
    }

    /// Blends the current direction of travel into the eye heading.
    pub fn compute_heading(&mut self, smoothing: f32) -> f32 {
        if let Some(target) = self.travel_direction() {
            self.heading = smooth_angle(self.heading, target, smoothing);
        }
        self.heading
    }

    fn compute_leg_heading(&mut self, smoothing: f32) -> f32 {
        if let Some(target) = self.travel_direction() {
            self.leg_heading = smooth_angle(self.leg_heading, target, smoothing);
        }
        self.leg_heading
    }

    pub fn render(&mut self, canvas: &mut dyn Canvas, appearance: &Appearance) {
        canvas.stroke_circle(self.position, self.radius);

        if self.is_head() && appearance.decorations.eyes() {
            let heading = self.compute_heading(appearance.eye_smoothing);
            for &side in &[EYE_ANGLE, -EYE_ANGLE] {
                canvas.fill_circle(
                    self.position + Vector2::polar(heading + side, self.radius),
                    self.radius * EYE_RADIUS_RATIO,
                    EYE_COLOR,
                );
            }
        }

        if appearance.decorations.legs() {
            let heading = self.compute_leg_heading(appearance.leg_smoothing);
            for &side in &[LEG_ANGLE, -LEG_ANGLE] {
                canvas.stroke_line(
                    self.position,
                    self.position + Vector2::polar(heading + side, self.radius * LEG_LENGTH_RATIO),
                );
            }
        }

        self.previous_position = self.position;
    }
}

/// `current * (1 - smoothing) + target * smoothing`, with `target` taken on the turn closest to
/// `current`. The result is wrapped to `(-PI, PI]`.
pub fn smooth_angle(current: f32, target: f32, smoothing: f32) -> f32 {
    let target = current + wrap_angle(target - current);
    wrap_angle(current * (1.0 - smoothing) + target * smoothing)
}

fn wrap_angle(angle: f32) -> f32 {
    let angle = angle % (2.0 * PI);
    if angle > PI {
        angle - 2.0 * PI
    } else if angle <= -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}

#[cfg(test)]
use crate::{canvas::Primitive, vector::assert_close};

#[cfg(test)]
const LINKAGE: Linkage = Linkage {
    smoothing: 0.5,
    min_angle: 130.0 * PI / 180.0,
};

#[cfg(test)]
fn body(position: Vector2, reach: f32) -> Segment {
    Segment::new(1, position, 5.0, reach)
}

#[test]
fn test_follow_halves_reach_error() {
    let leader = Vector2::new(0.0, 0.0);
    let mut segment = body(Vector2::new(40.0, 0.0), 20.0);
    segment.follow(leader, None, &LINKAGE);
    assert_close(segment.position(), Vector2::new(30.0, 0.0));
    segment.follow(leader, None, &LINKAGE);
    assert_close(segment.position(), Vector2::new(25.0, 0.0));
}

#[test]
fn test_follow_pushes_away_when_too_close() {
    let leader = Vector2::new(10.0, 10.0);
    let mut segment = body(Vector2::new(10.0, 14.0), 20.0);
    segment.follow(leader, None, &LINKAGE);
    assert_close(segment.position(), Vector2::new(10.0, 22.0));
}

#[test]
fn test_reach_convergence() {
    let leader = Vector2::new(-3.0, 7.0);
    for &start in &[
        Vector2::new(100.0, -50.0),
        Vector2::new(-3.5, 7.2),
        Vector2::new(17.0, 7.0),
    ] {
        let mut segment = body(start, 20.0);
        let mut error = (segment.position().distance(leader) - 20.0).abs();
        for _ in 0..60 {
            segment.follow(leader, None, &LINKAGE);
            let new_error = (segment.position().distance(leader) - 20.0).abs();
            assert!(new_error <= error + 1e-5, "{} > {}", new_error, error);
            error = new_error;
        }
        assert!(error < 1e-3, "error {}", error);
        let settled = segment.position();
        segment.follow(leader, None, &LINKAGE);
        assert_close(segment.position(), settled);
    }
}

#[test]
fn test_follow_at_reach_is_idempotent() {
    let leader = Vector2::new(0.0, 0.0);
    let position = Vector2::new(12.0, 16.0);
    let mut segment = body(position, 20.0);
    segment.follow(leader, None, &LINKAGE);
    assert_eq!(segment.position(), position);
}

#[test]
fn test_follow_on_leader_does_not_move() {
    let leader = Vector2::new(5.0, 5.0);
    let mut segment = body(leader, 20.0);
    segment.follow(leader, None, &LINKAGE);
    assert_eq!(segment.position(), leader);
}

#[test]
fn test_unfold_preserves_distance() {
    let leader = Vector2::new(10.0, -4.0);
    let grand_leader = leader + Vector2::new(20.0, 0.0);
    let mut segment = body(leader + Vector2::polar(0.5, 17.0), 17.0);
    let distance = segment.position().distance(leader);
    assert!(segment.unfold(leader, grand_leader, &LINKAGE));
    assert!((segment.position().distance(leader) - distance).abs() < 1e-4);
}

#[test]
fn test_unfold_boundary() {
    let leader = Vector2::new(0.0, 0.0);
    let grand_leader = Vector2::new(10.0, 0.0);

    let mut square = body(Vector2::new(0.0, 10.0), 10.0);
    assert!(!square.unfold(leader, grand_leader, &LINKAGE));
    assert_eq!(square.position(), Vector2::new(0.0, 10.0));

    let mut sharp = body(Vector2::polar(89.999_f32.to_radians(), 10.0), 10.0);
    assert!(sharp.unfold(leader, grand_leader, &LINKAGE));
}

#[test]
fn test_unfold_direction_follows_cross_sign() {
    let leader = Vector2::new(0.0, 0.0);
    let grand_leader = Vector2::new(10.0, 0.0);

    // Counter-clockwise from the grand leader: rotate further counter-clockwise.
    let mut above = body(Vector2::polar(30_f32.to_radians(), 10.0), 10.0);
    above.follow(leader, Some(grand_leader), &LINKAGE);
    assert!((above.position().angle().to_degrees() - 80.0).abs() < 1e-3);

    let mut below = body(Vector2::polar(-30_f32.to_radians(), 10.0), 10.0);
    below.follow(leader, Some(grand_leader), &LINKAGE);
    assert!((below.position().angle().to_degrees() + 80.0).abs() < 1e-3);
}

#[test]
fn test_unfold_degenerate() {
    let leader = Vector2::new(3.0, 3.0);
    let mut on_leader = body(leader, 10.0);
    assert!(!on_leader.unfold(leader, Vector2::new(10.0, 0.0), &LINKAGE));
    let mut segment = body(Vector2::new(4.0, 3.0), 10.0);
    assert!(!segment.unfold(leader, leader, &LINKAGE));
    assert_eq!(segment.position(), Vector2::new(4.0, 3.0));
}

#[test]
fn test_smooth_angle() {
    assert!((smooth_angle(0.0, FRAC_PI_4, 0.2) - 0.2 * FRAC_PI_4).abs() < 1e-6);
    assert!((smooth_angle(0.3, -1.2, 1.0) + 1.2).abs() < 1e-6);
    // Across the -PI/PI seam the filter takes the short way.
    let blended = smooth_angle(0.9 * PI, -0.9 * PI, 0.5);
    assert!((blended.abs() - PI).abs() < 1e-5, "{}", blended);
}

#[test]
fn test_heading_unchanged_while_still() {
    let mut segment = Segment::new(0, Vector2::new(1.0, 1.0), 5.0, 0.0);
    assert_eq!(segment.travel_direction(), None);
    assert_eq!(segment.compute_heading(0.2), 0.0);
    segment.approach(Vector2::new(1.0, 3.0), 1.0);
    assert!((segment.compute_heading(1.0) - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_render_head() {
    let appearance = Appearance {
        decorations: Decorations::Eyes,
        eye_smoothing: 1.0,
        leg_smoothing: 1.0,
    };
    let mut head = Segment::new(0, Vector2::new(0.0, 0.0), 10.0, 0.0);
    head.approach(Vector2::new(10.0, 0.0), 1.0);
    let mut primitives: Vec<Primitive> = Vec::new();
    head.render(&mut primitives, &appearance);
    assert_eq!(primitives.len(), 3);
    assert_eq!(primitives[0], Primitive::Circle(Vector2::new(10.0, 0.0), 10.0));
    match (primitives[1], primitives[2]) {
        (Primitive::Disc(left, left_radius, left_color), Primitive::Disc(right, right_radius, _)) => {
            assert!((left_radius - 3.0).abs() < 1e-5);
            assert_eq!(left_radius, right_radius);
            assert_eq!(left_color, EYE_COLOR);
            assert_close(left, Vector2::new(10.0, 0.0) + Vector2::polar(FRAC_PI_4, 10.0));
            assert_close(right, Vector2::new(10.0, 0.0) + Vector2::polar(-FRAC_PI_4, 10.0));
        }
        other => panic!("unexpected primitives {:?}", other),
    }
    assert_eq!(head.previous_position(), head.position());
}

#[test]
fn test_render_body_legs() {
    let appearance = Appearance {
        decorations: Decorations::EyesAndLegs,
        eye_smoothing: 0.2,
        leg_smoothing: 1.0,
    };
    let mut segment = body(Vector2::new(0.0, 0.0), 20.0);
    segment.approach(Vector2::new(0.0, -4.0), 1.0);
    let mut primitives: Vec<Primitive> = Vec::new();
    segment.render(&mut primitives, &appearance);
    // Body segments never get eyes.
    assert_eq!(primitives.len(), 3);
    match (primitives[1], primitives[2]) {
        (Primitive::Line(from_left, left), Primitive::Line(from_right, right)) => {
            assert_eq!(from_left, Vector2::new(0.0, -4.0));
            assert_eq!(from_right, Vector2::new(0.0, -4.0));
            assert_close(left, Vector2::new(10.0, -4.0));
            assert_close(right, Vector2::new(-10.0, -4.0));
        }
        other => panic!("unexpected primitives {:?}", other),
    }
}

#[test]
fn test_render_without_decorations() {
    let appearance = Appearance {
        decorations: Decorations::None,
        eye_smoothing: 0.2,
        leg_smoothing: 1.0,
    };
    let mut head = Segment::new(0, Vector2::new(0.0, 0.0), 10.0, 0.0);
    head.approach(Vector2::new(3.0, 3.0), 1.0);
    let mut primitives: Vec<Primitive> = Vec::new();
    head.render(&mut primitives, &appearance);
    assert_eq!(primitives, vec![Primitive::Circle(Vector2::new(3.0, 3.0), 10.0)]);
}
