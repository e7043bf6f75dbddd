// Constants and command-line configuration for the studio

use crate::structures::StructureKind;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Delay between animation steps at 100% speed
pub const MIN_DELAY_MS: u64 = 160;

/// Delay between animation steps at the slowest speed
pub const MAX_DELAY_MS: u64 = 1400;

pub const MIN_SPEED: u32 = 10;
pub const MAX_SPEED: u32 = 100;
pub const DEFAULT_SPEED: u32 = 50;

/// Speed change per key press in the terminal UI
pub const SPEED_STEP: u32 = 10;

/// How long the UI waits for input before checking the sequence timer
pub const POLL_INTERVAL_MS: u64 = 50;

/// Saved visualizations kept by the in-memory store
pub const DEFAULT_STORE_CAPACITY: usize = 256;

pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Map a speed percentage to a step delay; lower percentages are slower
///
/// ```text
/// delay = MIN + ((100 - clamp(speed, 10, 100)) / 90) * (MAX - MIN)
/// ```
pub fn delay_for_speed(speed: u32) -> Duration {
    let speed = clamp_speed(speed);
    let ratio = f64::from(MAX_SPEED - speed) / f64::from(MAX_SPEED - MIN_SPEED);
    let span = (MAX_DELAY_MS - MIN_DELAY_MS) as f64;
    let millis = (MIN_DELAY_MS as f64 + ratio * span).round() as u64;
    Duration::from_millis(millis)
}

pub const USAGE: &str = "\
Usage: dsstudio [options]

Options:
  --kind <key>     Initial structure: array, stack, queue, linkedlist, bst, binaryheap (default: stack)
  --speed <pct>    Animation speed from 10 to 100 (default: 50)
  --store <file>   JSON file used to keep saved visualizations (default: in memory)
  --load <id>      Reload a saved visualization from the store on startup
  -h, --help       Show this message";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unknown option '{0}'")]
    UnknownFlag(String),

    #[error("Option '{flag}' needs a value")]
    MissingValue { flag: String },

    #[error("Invalid value '{value}' for option '{flag}'")]
    InvalidValue { flag: String, value: String },
}

/// Startup configuration parsed from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub kind: StructureKind,
    pub speed: u32,
    pub store_path: Option<PathBuf>,
    pub load_id: Option<u64>,
    pub show_help: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            kind: StructureKind::Stack,
            speed: DEFAULT_SPEED,
            store_path: None,
            load_id: None,
            show_help: false,
        }
    }
}

impl StudioConfig {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = StudioConfig::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-h" | "--help" => config.show_help = true,
                "--kind" => {
                    let value = take_value(&flag, args.next())?;
                    config.kind = StructureKind::from_key(&value)
                        .ok_or_else(|| invalid(&flag, &value))?;
                }
                "--speed" => {
                    let value = take_value(&flag, args.next())?;
                    let speed: u32 = value.parse().map_err(|_| invalid(&flag, &value))?;
                    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
                        return Err(invalid(&flag, &value));
                    }
                    config.speed = speed;
                }
                "--store" => {
                    config.store_path = Some(PathBuf::from(take_value(&flag, args.next())?));
                }
                "--load" => {
                    let value = take_value(&flag, args.next())?;
                    config.load_id = Some(value.parse().map_err(|_| invalid(&flag, &value))?);
                }
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        Ok(config)
    }
}

fn take_value(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_delay_endpoints() {
        assert_eq!(delay_for_speed(100), Duration::from_millis(160));
        assert_eq!(delay_for_speed(10), Duration::from_millis(1400));
        assert_eq!(delay_for_speed(50), Duration::from_millis(849));
        // Clamped outside the slider range
        assert_eq!(delay_for_speed(0), delay_for_speed(10));
        assert_eq!(delay_for_speed(250), delay_for_speed(100));
    }

    #[test]
    fn test_delay_is_monotonic() {
        let mut previous = delay_for_speed(MIN_SPEED);
        for speed in MIN_SPEED + 1..=MAX_SPEED {
            let delay = delay_for_speed(speed);
            assert!(delay <= previous);
            previous = delay;
        }
    }

    #[test]
    fn test_parse_defaults() {
        let config = StudioConfig::from_args(Vec::new()).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_parse_all_options() {
        let config = StudioConfig::from_args(args(&[
            "--kind", "bst", "--speed", "80", "--store", "saved.json", "--load", "3",
        ]))
        .unwrap();
        assert_eq!(config.kind, StructureKind::Bst);
        assert_eq!(config.speed, 80);
        assert_eq!(config.store_path, Some(PathBuf::from("saved.json")));
        assert_eq!(config.load_id, Some(3));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            StudioConfig::from_args(args(&["--kind", "graph"])),
            Err(ConfigError::InvalidValue {
                flag: "--kind".into(),
                value: "graph".into()
            })
        );
        assert_eq!(
            StudioConfig::from_args(args(&["--speed", "5"])),
            Err(ConfigError::InvalidValue {
                flag: "--speed".into(),
                value: "5".into()
            })
        );
        assert_eq!(
            StudioConfig::from_args(args(&["--store"])),
            Err(ConfigError::MissingValue {
                flag: "--store".into()
            })
        );
        assert_eq!(
            StudioConfig::from_args(args(&["--verbose"])),
            Err(ConfigError::UnknownFlag("--verbose".into()))
        );
    }
}
