use crate::{
    canvas::Canvas,
    config::{ChainConfig, ConfigError},
    segment::{Appearance, Linkage, Segment},
    vector::Vector2,
};

/// Segments trailing a pointer, head first.
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<Segment>,
    head_smoothing: f32,
    linkage: Linkage,
    appearance: Appearance,
}

impl Chain {
    pub fn new(config: &ChainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let radii = config.radii()?;
        let reaches = config.reaches()?;
        let segments = radii
            .into_iter()
            .zip(reaches)
            .enumerate()
            .map(|(index, (radius, reach))| Segment::new(index, config.origin, radius, reach))
            .collect::<Vec<_>>();
        debug!(
            "chain of {} segments at ({}, {}), decorations {:?}",
            segments.len(),
            config.origin.x,
            config.origin.y,
            config.decorations
        );
        Ok(Self {
            segments,
            head_smoothing: config.head_smoothing,
            linkage: Linkage {
                smoothing: config.body_smoothing,
                min_angle: config.min_angle.to_radians(),
            },
            appearance: Appearance {
                decorations: config.decorations,
                eye_smoothing: config.eye_smoothing,
                leg_smoothing: config.leg_smoothing,
            },
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn linkage(&self) -> &Linkage {
        &self.linkage
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Advances one frame toward `pointer`.
    pub fn update(&mut self, pointer: Vector2) {
        self.segments[0].approach(pointer, self.head_smoothing);
        // Each segment reads the positions its leaders got earlier in this same loop.
        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].position();
            let grand_leader = i.checked_sub(2).map(|j| self.segments[j].position());
            self.segments[i].follow(leader, grand_leader, &self.linkage);
        }
    }

    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        let appearance = self.appearance;
        for segment in &mut self.segments {
            segment.render(canvas, &appearance);
        }
    }
}

#[cfg(test)]
use crate::{canvas::Primitive, config::Decorations, config::ReachSchedule, vector::assert_close};

#[cfg(test)]
fn chain_at(origin: Vector2, segments: usize) -> Chain {
    Chain::new(&ChainConfig {
        segments,
        origin,
        reach: ReachSchedule::Uniform(20.0),
        head_smoothing: 0.1,
        body_smoothing: 0.5,
        ..ChainConfig::default()
    })
    .expect("chain")
}

#[cfg(test)]
fn link_lengths(chain: &Chain) -> Vec<f32> {
    chain
        .segments()
        .windows(2)
        .map(|pair| pair[0].position().distance(pair[1].position()))
        .collect()
}

#[test]
fn test_new_chain() {
    let chain = Chain::new(&ChainConfig::default()).expect("chain");
    assert_eq!(chain.len(), 20);
    assert!(!chain.is_empty());
    assert_eq!(
        chain.segments().iter().filter(|s| s.is_head()).count(),
        1
    );
    for (i, segment) in chain.segments().iter().enumerate() {
        assert_eq!(segment.index(), i);
        assert_eq!(segment.position(), Vector2::new(300.0, 300.0));
    }
    assert!((chain.linkage().min_angle.to_degrees() - 130.0).abs() < 1e-4);
}

#[test]
fn test_new_chain_invalid() {
    let config = ChainConfig {
        segments: 0,
        ..ChainConfig::default()
    };
    assert_eq!(Chain::new(&config).err(), Some(ConfigError::NoSegments));
}

#[test]
fn test_single_segment_chain() {
    let mut chain = chain_at(Vector2::new(0.0, 0.0), 1);
    chain.update(Vector2::new(10.0, 0.0));
    assert_close(chain.head().position(), Vector2::new(1.0, 0.0));
}

#[test]
fn test_first_frame() {
    let mut chain = chain_at(Vector2::new(100.0, 100.0), 3);
    chain.update(Vector2::new(200.0, 100.0));
    let segments = chain.segments();
    assert_close(segments[0].position(), Vector2::new(110.0, 100.0));
    // Pushed behind the head, halfway to the reach.
    assert_close(segments[1].position(), Vector2::new(95.0, 100.0));
    // Pushed ahead of segment 1, then swung out of the fold it makes with the head.
    let to_tail = segments[2].position() - segments[1].position();
    assert!((to_tail.length() - 12.5).abs() < 1e-4);
    assert!((to_tail.angle().to_degrees() + 65.0).abs() < 1e-3);
}

#[test]
fn test_links_settle_at_reach() {
    let mut chain = chain_at(Vector2::new(100.0, 100.0), 3);
    let pointer = Vector2::new(200.0, 100.0);
    chain.update(pointer);
    let first_errors: Vec<f32> = link_lengths(&chain)
        .iter()
        .map(|l| (l - 20.0).abs())
        .collect();
    for _ in 0..9 {
        chain.update(pointer);
    }
    assert!(chain.head().position().x > 160.0);
    for (length, first_error) in link_lengths(&chain).iter().zip(first_errors) {
        assert!((length - 20.0).abs() < first_error, "{} vs {}", length, first_error);
    }
    for _ in 0..300 {
        chain.update(pointer);
    }
    assert!(chain.head().position().distance(pointer) < 1e-3);
    for length in link_lengths(&chain) {
        assert!((length - 20.0).abs() < 1e-3, "link length {}", length);
    }
}

#[test]
fn test_update_is_sequential() {
    let mut chain = chain_at(Vector2::new(0.0, 0.0), 4);
    for &pointer in &[Vector2::new(30.0, 0.0), Vector2::new(60.0, 20.0)] {
        for _ in 0..5 {
            chain.update(pointer);
        }
    }
    let before: Vec<Segment> = chain.segments().to_vec();
    let pointer = Vector2::new(-400.0, 500.0);
    chain.update(pointer);

    let linkage = *chain.linkage();
    let mut head = before[0].clone();
    head.approach(pointer, 0.1);
    let mut first = before[1].clone();
    first.follow(head.position(), None, &linkage);
    let mut second = before[2].clone();
    second.follow(first.position(), Some(head.position()), &linkage);
    let mut stale = before[2].clone();
    stale.follow(before[1].position(), Some(before[0].position()), &linkage);

    assert_eq!(chain.segments()[1].position(), first.position());
    assert_eq!(chain.segments()[2].position(), second.position());
    assert!(chain.segments()[2].position().distance(stale.position()) > 1.0);
}

#[test]
fn test_render_order() {
    let mut chain = Chain::new(&ChainConfig {
        segments: 3,
        decorations: Decorations::None,
        ..ChainConfig::default()
    })
    .expect("chain");
    chain.update(Vector2::new(400.0, 300.0));
    let mut primitives: Vec<Primitive> = Vec::new();
    chain.render(&mut primitives);
    let expected: Vec<Primitive> = chain
        .segments()
        .iter()
        .map(|s| Primitive::Circle(s.position(), s.radius()))
        .collect();
    assert_eq!(primitives, expected);
    for segment in chain.segments() {
        assert_eq!(segment.previous_position(), segment.position());
    }
}

#[test]
fn test_render_head_eyes() {
    let mut chain = Chain::new(&ChainConfig {
        segments: 2,
        decorations: Decorations::Eyes,
        ..ChainConfig::default()
    })
    .expect("chain");
    chain.update(Vector2::new(300.0, 400.0));
    let mut primitives: Vec<Primitive> = Vec::new();
    chain.render(&mut primitives);
    let discs = primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Disc(..)))
        .count();
    assert_eq!(discs, 2);
    assert_eq!(primitives.len(), 4);
    // Moving straight up with eye smoothing 0.2.
    assert!((chain.head().heading() - 0.2 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
}
