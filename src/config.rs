use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tapmeasure_core::{LengthFormatter, UnitStyle};
use tapmeasure_tracking::HitTestOptions;
use tracing::warn;

pub const DEFAULT_DISPLAY_PATH: &str = "config/display.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub unit_style: UnitStyle,
    /// Digits shown after the decimal point.
    pub fraction_digits: usize,
    /// Max distance (metres) between the centre ray and an accepted feature point.
    pub hit_tolerance: f32,
    /// Max hit distance (metres) from the camera.
    pub max_range: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit_style: UnitStyle::Medium,
            fraction_digits: 2,
            hit_tolerance: 0.05,
            max_range: 10.0,
        }
    }
}

impl DisplayConfig {
    /// Load display configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_DISPLAY_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<DisplayConfig>(&contents) {
                Ok(cfg) => match cfg.hit_test_options().validate() {
                    Ok(()) => cfg,
                    Err(err) => {
                        warn!("Invalid {}: {err}. Using defaults", path.display());
                        DisplayConfig::default()
                    }
                },
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    DisplayConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_DISPLAY_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                DisplayConfig::default()
            }
        }
    }

    /// Save display configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn formatter(&self) -> LengthFormatter {
        LengthFormatter::new(self.unit_style, self.fraction_digits)
    }

    pub fn hit_test_options(&self) -> HitTestOptions {
        HitTestOptions {
            tolerance: self.hit_tolerance,
            max_range: self.max_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tapmeasure_{name}_{timestamp}.toml"))
    }

    #[test]
    fn missing_file_uses_defaults() {
        let cfg = DisplayConfig::load_from_path(&temp_path("missing"));
        assert_eq!(cfg, DisplayConfig::default());
        assert_eq!(cfg.formatter(), LengthFormatter::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "unit_style = \"long\"\n").expect("write config");
        let cfg = DisplayConfig::load_from_path(&path);
        assert_eq!(cfg.unit_style, UnitStyle::Long);
        assert_eq!(cfg.fraction_digits, 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_file_uses_defaults() {
        let path = temp_path("invalid");
        fs::write(&path, "unit_style = \"furlongs\"\n").expect("write config");
        assert_eq!(DisplayConfig::load_from_path(&path), DisplayConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_hit_test_settings_use_defaults() {
        for (name, body) in [
            ("negative_tolerance", "hit_tolerance = -1.0\n"),
            ("zero_range", "unit_style = \"long\"\nmax_range = 0.0\n"),
        ] {
            let path = temp_path(name);
            fs::write(&path, body).expect("write config");
            let cfg = DisplayConfig::load_from_path(&path);
            assert_eq!(cfg, DisplayConfig::default(), "{name}");
            assert!(cfg.hit_test_options().validate().is_ok());
            let _ = fs::remove_file(&path);
        }
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("saved");
        let cfg = DisplayConfig {
            unit_style: UnitStyle::Short,
            fraction_digits: 3,
            hit_tolerance: 0.1,
            max_range: 4.0,
        };
        cfg.save_to_path(&path).expect("save config");
        assert_eq!(DisplayConfig::load_from_path(&path), cfg);
        assert_eq!(cfg.hit_test_options().max_range, 4.0);
        let _ = fs::remove_file(&path);
    }
}
