use amethyst::{utils::application_root_dir, Error};
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, path::PathBuf};

pub const LOGGER_CONFIG: &str = "config/logger.yaml";
pub const SNAKE_CONFIG: &str = "config/snake.yaml";
pub const DISPLAY_CONFIG: &str = "config/display.ron";

/// Reads a YAML configuration file.
///
/// Relative paths are resolved against the application root. If the user specified a path it
/// must exist, otherwise a missing `default_path` falls back to `T::default()`.
pub fn load_yaml<T>(path: Option<PathBuf>, default_path: &str) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    let is_user_specified = path.is_some();

    let path = path.unwrap_or_else(|| PathBuf::from(default_path));
    let path = if path.is_relative() {
        let app_dir = application_root_dir()?;
        app_dir.join(path)
    } else {
        path
    };

    if path.exists() {
        let file = File::open(&path)?;
        let mut file_reader = BufReader::new(file);
        let config = serde_yaml::from_reader(&mut file_reader)?;

        Ok(config)
    } else if is_user_specified {
        let message = format!(
            "Failed to read configuration file: `{}`.",
            path.display()
        );
        eprintln!("{}", message);

        Err(Error::from_string(message))
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
use slither_core::config::{ChainConfig, Decorations};

#[cfg(test)]
fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("slither-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_load_yaml_user_file() {
    let path = write_temp("snake.yaml", "segments: 4\ndecorations: none\n");
    let config: ChainConfig = load_yaml(Some(path.clone()), SNAKE_CONFIG).expect("config");
    std::fs::remove_file(path).expect("remove config");
    assert_eq!(config.segments, 4);
    assert_eq!(config.decorations, Decorations::None);
    assert_eq!(config.body_smoothing, 0.5);
}

#[test]
fn test_load_yaml_missing_user_file() {
    let path = std::env::temp_dir().join("slither-does-not-exist.yaml");
    assert!(load_yaml::<ChainConfig>(Some(path), SNAKE_CONFIG).is_err());
}

#[test]
fn test_load_yaml_missing_default_file() {
    let config: ChainConfig =
        load_yaml(None, "config/slither-does-not-exist.yaml").expect("config");
    assert_eq!(config, ChainConfig::default());
}

#[test]
fn test_load_yaml_invalid_file() {
    let path = write_temp("invalid.yaml", "segments: many\n");
    let result = load_yaml::<ChainConfig>(Some(path.clone()), SNAKE_CONFIG);
    std::fs::remove_file(path).expect("remove config");
    assert!(result.is_err());
}
