use crate::vector::Vector2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("a chain needs at least one segment")]
    NoSegments,
    #[error("{schedule} schedule has {actual} entries, expected {expected}")]
    ScheduleLength {
        schedule: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("segment {index} has non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f32 },
    #[error("segment {index} has non-positive reach {reach}")]
    NonPositiveReach { index: usize, reach: f32 },
    #[error("{name} smoothing {value} is outside (0, 1]")]
    Smoothing { name: &'static str, value: f32 },
    #[error("minimum angle {0}° is outside [90°, 180°]")]
    MinAngle(f32),
    #[error("unknown decorations `{0}`, expected none, eyes or eyes-and-legs")]
    Decorations(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decorations {
    None,
    Eyes,
    EyesAndLegs,
}

impl Decorations {
    pub fn eyes(self) -> bool {
        match self {
            Decorations::None => false,
            Decorations::Eyes | Decorations::EyesAndLegs => true,
        }
    }

    pub fn legs(self) -> bool {
        self == Decorations::EyesAndLegs
    }
}

impl Default for Decorations {
    fn default() -> Self {
        Decorations::EyesAndLegs
    }
}

impl FromStr for Decorations {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Decorations::None),
            "eyes" => Ok(Decorations::Eyes),
            "eyes-and-legs" => Ok(Decorations::EyesAndLegs),
            _ => Err(ConfigError::Decorations(s.to_owned())),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RadiusSchedule {
    /// Radius of segment `i` is `head - taper * i`.
    Tapered { head: f32, taper: f32 },
    PerSegment(Vec<f32>),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReachSchedule {
    Uniform(f32),
    /// One entry per segment, the head entry is ignored.
    PerSegment(Vec<f32>),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub segments: usize,
    pub origin: Vector2,
    pub radius: RadiusSchedule,
    pub reach: ReachSchedule,
    pub head_smoothing: f32,
    pub body_smoothing: f32,
    /// Degrees.
    pub min_angle: f32,
    pub decorations: Decorations,
    pub eye_smoothing: f32,
    pub leg_smoothing: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segments: 20,
            origin: Vector2::new(300.0, 300.0),
            radius: RadiusSchedule::Tapered {
                head: 15.0,
                taper: 0.6,
            },
            reach: ReachSchedule::Uniform(20.0),
            head_smoothing: 0.1,
            body_smoothing: 0.5,
            min_angle: 130.0,
            decorations: Decorations::default(),
            eye_smoothing: 0.2,
            leg_smoothing: 1.0,
        }
    }
}

impl ChainConfig {
    pub fn radii(&self) -> Result<Vec<f32>, ConfigError> {
        let radii = match &self.radius {
            RadiusSchedule::Tapered { head, taper } => (0..self.segments)
                .map(|i| head - taper * i as f32)
                .collect(),
            RadiusSchedule::PerSegment(radii) => {
                self.check_length("radius", radii.len())?;
                radii.clone()
            }
        };
        if let Some((index, &radius)) = radii.iter().enumerate().find(|(_, r)| !(**r > 0.0)) {
            return Err(ConfigError::NonPositiveRadius { index, radius });
        }
        Ok(radii)
    }

    pub fn reaches(&self) -> Result<Vec<f32>, ConfigError> {
        let reaches = match &self.reach {
            ReachSchedule::Uniform(reach) => vec![*reach; self.segments],
            ReachSchedule::PerSegment(reaches) => {
                self.check_length("reach", reaches.len())?;
                reaches.clone()
            }
        };
        if let Some((index, &reach)) = reaches
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, r)| !(**r > 0.0))
        {
            return Err(ConfigError::NonPositiveReach { index, reach });
        }
        Ok(reaches)
    }

    /// Checks every scalar setting, the schedules are checked by [`radii`](Self::radii) and
    /// [`reaches`](Self::reaches).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments == 0 {
            return Err(ConfigError::NoSegments);
        }
        for &(name, value) in &[
            ("head", self.head_smoothing),
            ("body", self.body_smoothing),
            ("eye", self.eye_smoothing),
            ("leg", self.leg_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Smoothing { name, value });
            }
        }
        if !(self.min_angle >= 90.0 && self.min_angle <= 180.0) {
            return Err(ConfigError::MinAngle(self.min_angle));
        }
        Ok(())
    }

    fn check_length(&self, schedule: &'static str, actual: usize) -> Result<(), ConfigError> {
        if actual == self.segments {
            Ok(())
        } else {
            Err(ConfigError::ScheduleLength {
                schedule,
                expected: self.segments,
                actual,
            })
        }
    }
}

#[test]
fn test_default_radii_taper() {
    let radii = ChainConfig::default().radii().expect("radii");
    assert_eq!(radii.len(), 20);
    assert_eq!(radii[0], 15.0);
    assert!((radii[19] - 3.6).abs() < 1e-4);
}

#[test]
fn test_radii_non_positive() {
    let config = ChainConfig {
        segments: 30,
        ..ChainConfig::default()
    };
    assert_eq!(
        config.radii(),
        Err(ConfigError::NonPositiveRadius {
            index: 25,
            radius: 15.0 - 0.6 * 25.0
        })
    );
}

#[test]
fn test_reaches_uniform() {
    let config = ChainConfig {
        segments: 3,
        ..ChainConfig::default()
    };
    assert_eq!(config.reaches(), Ok(vec![20.0, 20.0, 20.0]));
}

#[test]
fn test_reaches_head_entry_ignored() {
    let config = ChainConfig {
        segments: 3,
        reach: ReachSchedule::PerSegment(vec![0.0, 10.0, 12.0]),
        ..ChainConfig::default()
    };
    assert_eq!(config.reaches(), Ok(vec![0.0, 10.0, 12.0]));
}

#[test]
fn test_reaches_non_positive() {
    let config = ChainConfig {
        segments: 3,
        reach: ReachSchedule::PerSegment(vec![5.0, 10.0, -1.0]),
        ..ChainConfig::default()
    };
    assert_eq!(
        config.reaches(),
        Err(ConfigError::NonPositiveReach {
            index: 2,
            reach: -1.0
        })
    );
}

#[test]
fn test_schedule_length() {
    let config = ChainConfig {
        segments: 3,
        radius: RadiusSchedule::PerSegment(vec![5.0, 4.0]),
        ..ChainConfig::default()
    };
    assert_eq!(
        config.radii(),
        Err(ConfigError::ScheduleLength {
            schedule: "radius",
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_validate() {
    assert_eq!(ChainConfig::default().validate(), Ok(()));
    assert_eq!(
        ChainConfig {
            segments: 0,
            ..ChainConfig::default()
        }
        .validate(),
        Err(ConfigError::NoSegments)
    );
    assert_eq!(
        ChainConfig {
            body_smoothing: 0.0,
            ..ChainConfig::default()
        }
        .validate(),
        Err(ConfigError::Smoothing {
            name: "body",
            value: 0.0
        })
    );
    assert_eq!(
        ChainConfig {
            min_angle: 45.0,
            ..ChainConfig::default()
        }
        .validate(),
        Err(ConfigError::MinAngle(45.0))
    );
}

#[test]
fn test_decorations_from_str() {
    assert_eq!("eyes".parse::<Decorations>(), Ok(Decorations::Eyes));
    assert_eq!("eyes-and-legs".parse::<Decorations>(), Ok(Decorations::EyesAndLegs));
    assert_eq!("none".parse::<Decorations>(), Ok(Decorations::None));
    assert_eq!(
        "tail".parse::<Decorations>(),
        Err(ConfigError::Decorations("tail".to_owned()))
    );
}

#[test]
fn test_config_from_yaml() {
    let config: ChainConfig = serde_yaml::from_str(
        "
segments: 3
reach: [0, 10, 12]
radius:
  head: 8
  taper: 1
decorations: eyes
",
    )
    .expect("yaml");
    assert_eq!(config.segments, 3);
    assert_eq!(config.reach, ReachSchedule::PerSegment(vec![0.0, 10.0, 12.0]));
    assert_eq!(config.radii(), Ok(vec![8.0, 7.0, 6.0]));
    assert_eq!(config.decorations, Decorations::Eyes);
    assert_eq!(config.head_smoothing, 0.1);
}

#[test]
fn test_config_from_yaml_uniform_reach() {
    let config: ChainConfig = serde_yaml::from_str("reach: 25\norigin: {x: 10, y: 20}\n")
        .expect("yaml");
    assert_eq!(config.reach, ReachSchedule::Uniform(25.0));
    assert_eq!(config.origin, Vector2::new(10.0, 20.0));
}
