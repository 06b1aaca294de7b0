//! Tunable constants for scoring and ranking.
//!
//! Every field has a documented default, so a config file only needs the
//! values it wants to change:
//!
//! ```json
//! { "result_size": 10, "noise": { "min": 0, "max": 0 }, "seed": 42 }
//! ```

use data_loader::Era;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Largest magnitude accepted for any point constant or noise bound.
pub const MAX_POINTS: i64 = 1_000_000;

/// Inclusive range the per-candidate noise term is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseRange {
    pub min: i64,
    pub max: i64,
}

impl Default for NoiseRange {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// First release year of each era after `Classic`.
///
/// Defaults: classic before 1980, retro 1980-1999, modern 2000-2014,
/// recent from 2015.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraBounds {
    pub retro_from: i32,
    pub modern_from: i32,
    pub recent_from: i32,
}

impl Default for EraBounds {
    fn default() -> Self {
        Self {
            retro_from: 1980,
            modern_from: 2000,
            recent_from: 2015,
        }
    }
}

impl EraBounds {
    pub fn era_for_year(&self, year: i32) -> Era {
        if year < self.retro_from {
            Era::Classic
        } else if year < self.modern_from {
            Era::Retro
        } else if year < self.recent_from {
            Era::Modern
        } else {
            Era::Recent
        }
    }
}

/// Scoring weights and ranking limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Points per unit of questionnaire category weight (default 10)
    pub category_weight_multiplier: i64,
    /// Points per liked film sharing a category (default 15)
    pub category_affinity_points: i64,
    /// Points per liked film sharing a cast member (default 20)
    pub cast_affinity_points: i64,
    /// Points per liked film sharing a crew member (default 25)
    pub crew_affinity_points: i64,
    /// Bonus when the release year is in the preferred era (default 15)
    pub era_bonus: i64,
    /// Bonus for new releases when no era was chosen (default 5)
    pub recency_bonus: i64,
    /// Release year from which `recency_bonus` applies (default 2020)
    pub recency_year: i32,
    /// Random tie-breaker range (default 1..=10)
    pub noise: NoiseRange,
    pub era_bounds: EraBounds,
    /// Minimum review for a watched film to count as liked (default 4)
    pub high_rating_threshold: u8,
    /// How many top-scored candidates survive the sort (default 40)
    pub candidate_pool_size: usize,
    /// How many of the best candidates get shuffled (default 10)
    pub shuffle_window: usize,
    /// How many recommendations are returned (default 5)
    pub result_size: usize,
    /// Fixed RNG seed; `None` draws a fresh seed per request
    pub seed: Option<u64>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            category_weight_multiplier: 10,
            category_affinity_points: 15,
            cast_affinity_points: 20,
            crew_affinity_points: 25,
            era_bonus: 15,
            recency_bonus: 5,
            recency_year: 2020,
            noise: NoiseRange::default(),
            era_bounds: EraBounds::default(),
            high_rating_threshold: 4,
            candidate_pool_size: 40,
            shuffle_window: 10,
            result_size: 5,
            seed: None,
        }
    }
}

impl RecommenderConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configure the noise range (default: 1..=10). `(0, 0)` disables noise.
    pub fn with_noise(mut self, min: i64, max: i64) -> Self {
        self.noise = NoiseRange { min, max };
        self
    }

    /// Configure the number of recommendations returned (default: 5)
    pub fn with_result_size(mut self, size: usize) -> Self {
        self.result_size = size;
        self
    }

    /// Configure the shuffle window (default: 10). 0 disables shuffling.
    pub fn with_shuffle_window(mut self, window: usize) -> Self {
        self.shuffle_window = window;
        self
    }

    /// Configure the candidate pool kept after sorting (default: 40)
    pub fn with_candidate_pool_size(mut self, size: usize) -> Self {
        self.candidate_pool_size = size;
        self
    }

    /// Configure the liked-film threshold (default: 4)
    pub fn with_high_rating_threshold(mut self, threshold: u8) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the ranker cannot honor.
    pub fn validate(&self) -> Result<()> {
        let points = [
            ("category_weight_multiplier", self.category_weight_multiplier),
            ("category_affinity_points", self.category_affinity_points),
            ("cast_affinity_points", self.cast_affinity_points),
            ("crew_affinity_points", self.crew_affinity_points),
            ("era_bonus", self.era_bonus),
            ("recency_bonus", self.recency_bonus),
            ("noise", self.noise.min),
            ("noise", self.noise.max),
        ];
        for (field, value) in points {
            if !(-MAX_POINTS..=MAX_POINTS).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} is outside -{}..={}", value, MAX_POINTS, MAX_POINTS),
                });
            }
        }
        if self.noise.min > self.noise.max {
            return Err(ConfigError::Invalid {
                field: "noise",
                reason: format!("min {} is above max {}", self.noise.min, self.noise.max),
            });
        }
        if self.result_size == 0 {
            return Err(ConfigError::Invalid {
                field: "result_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.result_size > self.candidate_pool_size {
            return Err(ConfigError::Invalid {
                field: "result_size",
                reason: format!(
                    "{} exceeds candidate_pool_size {}",
                    self.result_size, self.candidate_pool_size
                ),
            });
        }
        if self.shuffle_window > self.candidate_pool_size {
            return Err(ConfigError::Invalid {
                field: "shuffle_window",
                reason: format!(
                    "{} exceeds candidate_pool_size {}",
                    self.shuffle_window, self.candidate_pool_size
                ),
            });
        }
        if !(1..=5).contains(&self.high_rating_threshold) {
            return Err(ConfigError::Invalid {
                field: "high_rating_threshold",
                reason: format!("{} is outside the 1-5 review scale", self.high_rating_threshold),
            });
        }
        let bounds = &self.era_bounds;
        if !(bounds.retro_from <= bounds.modern_from && bounds.modern_from <= bounds.recent_from) {
            return Err(ConfigError::Invalid {
                field: "era_bounds",
                reason: format!(
                    "eras must be in order, got {} / {} / {}",
                    bounds.retro_from, bounds.modern_from, bounds.recent_from
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RecommenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.category_weight_multiplier, 10);
        assert_eq!(config.crew_affinity_points, 25);
        assert_eq!(config.noise, NoiseRange { min: 1, max: 10 });
        assert_eq!(
            (config.candidate_pool_size, config.shuffle_window, config.result_size),
            (40, 10, 5)
        );
    }

    #[test]
    fn test_era_for_year() {
        let bounds = EraBounds::default();
        assert_eq!(bounds.era_for_year(1975), Era::Classic);
        assert_eq!(bounds.era_for_year(1979), Era::Classic);
        assert_eq!(bounds.era_for_year(1980), Era::Retro);
        assert_eq!(bounds.era_for_year(1999), Era::Retro);
        assert_eq!(bounds.era_for_year(2000), Era::Modern);
        assert_eq!(bounds.era_for_year(2014), Era::Modern);
        assert_eq!(bounds.era_for_year(2015), Era::Recent);
        assert_eq!(bounds.era_for_year(2024), Era::Recent);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{ "result_size": 8, "noise": { "min": 0, "max": 0 } }"#)
                .unwrap();
        assert_eq!(config.result_size, 8);
        assert_eq!(config.noise, NoiseRange { min: 0, max: 0 });
        assert_eq!(config.era_bonus, 15);
        assert_eq!(config.era_bounds, EraBounds::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_settings() {
        let base = RecommenderConfig::default();
        assert!(base.clone().with_noise(5, 1).validate().is_err());
        assert!(base.clone().with_result_size(0).validate().is_err());
        assert!(base.clone().with_result_size(41).validate().is_err());
        assert!(base.clone().with_shuffle_window(50).validate().is_err());
        assert!(base.clone().with_high_rating_threshold(6).validate().is_err());
        assert!(base.with_noise(0, 0).with_shuffle_window(0).validate().is_ok());
    }

    /// Write `contents` to a fresh file under the system temp dir.
    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "film-picker-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_point_constants_are_bounded() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{ "category_weight_multiplier": 9223372036854775807 }"#)
                .unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "category_weight_multiplier", .. }
        ));

        let base = RecommenderConfig::default();
        assert!(base.clone().with_noise(i64::MIN, 0).validate().is_err());
        assert!(base.clone().with_noise(0, MAX_POINTS + 1).validate().is_err());
        assert!(base.with_noise(-MAX_POINTS, MAX_POINTS).validate().is_ok());

        let era = RecommenderConfig {
            era_bonus: -MAX_POINTS - 1,
            ..RecommenderConfig::default()
        };
        assert!(era.validate().is_err());
    }

    #[test]
    fn test_load_shipped_example_config() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/config.example.json");
        let config = RecommenderConfig::from_json_file(&path).unwrap();

        assert_eq!(config.result_size, 5);
        assert_eq!(config.shuffle_window, 10);
        assert_eq!(config.noise, NoiseRange { min: 1, max: 10 });
        assert_eq!(config.seed, None);
        assert_eq!(config.candidate_pool_size, 40);
    }

    #[test]
    fn test_malformed_config_file() {
        let path = write_temp_config("malformed", r#"{ "result_size": "five" "#);
        let err = RecommenderConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_config_file_rejected_on_load() {
        let path = write_temp_config("inverted-noise", r#"{ "noise": { "min": 9, "max": 2 } }"#);
        let err = RecommenderConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Invalid { field: "noise", .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let err = RecommenderConfig::from_json_file(Path::new("missing/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
