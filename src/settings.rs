//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};

use crate::consts::{DEFAULT_FPS, DEFAULT_ROUND_SECS};
use crate::entities::FruitKind;

#[derive(Debug, Clone, Parser)]
#[command(name = "fruit-slice")]
#[command(about = "Slice fruit with the mouse before the clock runs out")]
pub struct Settings {
    /// Length of one round in seconds
    #[arg(long, default_value_t = DEFAULT_ROUND_SECS)]
    pub duration: u64,

    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for the fruit RNG (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fruit kinds in the pool, in collision priority order
    #[arg(long = "fruit", value_enum, default_values_t = FruitKind::ALL.to_vec())]
    pub fruits: Vec<FruitKind>,

    /// Directory holding `<name>.png` and `half_<name>.png` sprites
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Where log output goes (stdout belongs to the game screen)
    #[arg(long, default_value = "fruit-slice.log")]
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_ROUND_SECS,
            fps: DEFAULT_FPS,
            seed: None,
            fruits: FruitKind::ALL.to_vec(),
            assets: None,
            log_file: PathBuf::from("fruit-slice.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(eyre!("round duration must be at least one second"));
        }
        if self.fps == 0 {
            return Err(eyre!("fps must be greater than zero"));
        }
        if self.fruits.is_empty() {
            return Err(eyre!("at least one fruit kind is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parsed_defaults() {
        let parsed = Settings::parse_from(["fruit-slice"]);
        let default = Settings::default();
        assert_eq!(parsed.duration, default.duration);
        assert_eq!(parsed.fps, default.fps);
        assert_eq!(parsed.fruits, default.fruits);
        assert_eq!(parsed.log_file, default.log_file);
        assert!(parsed.seed.is_none());
        assert!(parsed.assets.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let parsed = Settings::parse_from([
            "fruit-slice",
            "--duration",
            "30",
            "--seed",
            "42",
            "--fruit",
            "orange",
            "--fruit",
            "guava",
            "--assets",
            "images",
        ]);
        assert_eq!(parsed.duration, 30);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.fruits, vec![FruitKind::Orange, FruitKind::Guava]);
        assert_eq!(parsed.assets, Some(PathBuf::from("images")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Settings::default().validate().is_ok());

        let settings = Settings {
            duration: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            fruits: Vec::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
