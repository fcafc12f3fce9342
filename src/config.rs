use crate::types::Config;
use anyhow::{ensure, Result};
use std::fs;
use tracing::info;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        info!(
            "Config loaded: min_overlap={:.2}, filter_inside={}, ppm={}, fps={}, ego={} km/h",
            config.zones.min_overlap_ratio,
            config.zones.filter_inside,
            config.speed.pixels_per_meter,
            config.speed.fps,
            config.speed.ego_speed_kmph
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.zones.min_overlap_ratio > 0.0 && self.zones.min_overlap_ratio <= 1.0,
            "zones.min_overlap_ratio must be in (0, 1], got {}",
            self.zones.min_overlap_ratio
        );
        ensure!(
            self.speed.pixels_per_meter > 0.0,
            "speed.pixels_per_meter must be positive, got {}",
            self.speed.pixels_per_meter
        );
        ensure!(
            self.speed.fps > 0.0,
            "speed.fps must be positive, got {}",
            self.speed.fps
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_zones::ZoneLabel;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
zones:
  min_overlap_ratio: 0.1
  filter_inside: false
  fallback_zone: green
speed:
  pixels_per_meter: 8.0
  fps: 25.0
  ego_speed_kmph: 0.0
logging:
  level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.zones.min_overlap_ratio, 0.1);
        assert!(!config.zones.filter_inside);
        assert_eq!(config.zones.fallback_zone, ZoneLabel::Green);
        assert_eq!(config.speed.fps, 25.0);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_overlap_ratio() {
        let mut config = Config::default();
        config.zones.min_overlap_ratio = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_fps() {
        let mut config = Config::default();
        config.speed.fps = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_pixels_per_meter() {
        let mut config = Config::default();
        config.speed.pixels_per_meter = -1.0;
        assert!(config.validate().is_err());
    }
}
