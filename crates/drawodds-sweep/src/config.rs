use drawodds_core::model::{FULL_DECK, KeepMode, ModelVariant};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use crate::surface::SweepParam;

const DEFAULT_CACHE_CAPACITY: usize = 4_096;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root sweep configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub run_id: String,
    pub model: ModelConfig,
    pub targets: RangeConfig,
    pub axis: AxisConfig,
    #[serde(default)]
    pub fixed: FixedConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SweepConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SweepConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    ///
    /// Numeric ranges are never rejected: they are ordered and clamped to the
    /// model's domain in place.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.outputs.validate(&self.run_id)?;
        let variant = self.model.variant()?;
        self.logging.normalize();

        self.targets = self.targets.normalized(FULL_DECK);
        let axis_cap = match self.axis.param {
            SweepParam::Mulligans => variant.mulligan_cap(),
            SweepParam::LaterDraws => FULL_DECK,
        };
        let range = self.axis.range().normalized(axis_cap);
        self.axis.min = range.min;
        self.axis.max = range.max;
        self.fixed.mulligans = self.fixed.mulligans.clamp(0, variant.mulligan_cap());
        self.fixed.later_draws = self.fixed.later_draws.clamp(0, FULL_DECK);
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            plots_dir: resolve_template(&self.run_id, &self.outputs.plots_dir),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    General,
    MissedOpening,
}

/// Which model answers the sweep.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub variant: VariantKind,
    #[serde(default)]
    pub policy: Option<KeepMode>,
}

impl ModelConfig {
    pub fn variant(&self) -> Result<ModelVariant, ValidationError> {
        match (self.variant, self.policy) {
            (VariantKind::General, policy) => Ok(ModelVariant::General(policy.unwrap_or_default())),
            (VariantKind::MissedOpening, None | Some(KeepMode::Keep)) => {
                Ok(ModelVariant::MissedOpening)
            }
            (VariantKind::MissedOpening, Some(KeepMode::NoKeep)) => {
                Err(ValidationError::InvalidField {
                    field: "model.policy".to_string(),
                    message: "the missed_opening model only supports the keep policy".to_string(),
                })
            }
        }
    }
}

/// Inclusive integer range as supplied by the user.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RangeConfig {
    pub min: i64,
    pub max: i64,
}

impl RangeConfig {
    /// Order the bounds and clamp both into `[0, cap]`.
    pub fn normalized(self, cap: i64) -> Self {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        Self {
            min: low.clamp(0, cap),
            max: high.clamp(0, cap),
        }
    }

    pub fn values(self) -> std::ops::RangeInclusive<i64> {
        self.min..=self.max
    }
}

/// Column axis of the surface.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct AxisConfig {
    pub param: SweepParam,
    pub min: i64,
    pub max: i64,
}

impl AxisConfig {
    pub fn range(&self) -> RangeConfig {
        RangeConfig {
            min: self.min,
            max: self.max,
        }
    }
}

/// Value of whichever draw count is not swept.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct FixedConfig {
    #[serde(default)]
    pub mulligans: i64,
    #[serde(default)]
    pub later_draws: i64,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    pub plots_dir: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
            ("outputs.plots_dir", &self.plots_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Memoization block. A capacity of zero disables storing results.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub plots_dir: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "keep_smoke"
model:
  variant: "general"
  policy: "keep"
targets:
  min: 1
  max: 6
axis:
  param: "later_draws"
  min: 0
  max: 20
fixed:
  mulligans: 2
outputs:
  jsonl: "sweeps/out/{run_id}/surface.jsonl"
  summary_md: "sweeps/out/{run_id}/summary.md"
  plots_dir: "sweeps/out/{run_id}/plots"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    fn parse(yaml: &str) -> SweepConfig {
        serde_yaml::from_str(yaml).expect("parse yaml")
    }

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg = parse(BASIC_YAML);
        cfg.validate().expect("validate");

        assert_eq!(cfg.cache.capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(cfg.fixed.later_draws, 0);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.model.variant().unwrap(),
            ModelVariant::General(KeepMode::Keep)
        );

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("sweeps/out/keep_smoke/surface.jsonl")
        );
    }

    #[test]
    fn general_policy_defaults_to_keep() {
        let yaml = BASIC_YAML.replace("  policy: \"keep\"\n", "");
        let cfg = parse(&yaml);
        assert_eq!(
            cfg.model.variant().unwrap(),
            ModelVariant::General(KeepMode::Keep)
        );
    }

    #[test]
    fn accepts_camel_case_no_keep_policy() {
        let yaml = BASIC_YAML.replace("policy: \"keep\"", "policy: \"noKeep\"");
        let mut cfg = parse(&yaml);
        cfg.validate().expect("validate");
        assert_eq!(
            cfg.model.variant().unwrap(),
            ModelVariant::General(KeepMode::NoKeep)
        );
    }

    #[test]
    fn rejects_no_keep_for_missed_opening() {
        let yaml = BASIC_YAML
            .replace("variant: \"general\"", "variant: \"missed_opening\"")
            .replace("policy: \"keep\"", "policy: \"no_keep\"");
        let mut cfg = parse(&yaml);
        let err = cfg.validate().expect_err("keep-only model");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "model.policy"
        ));
    }

    #[test]
    fn inverted_and_oversized_ranges_are_normalized() {
        let yaml = BASIC_YAML
            .replace("min: 1\n  max: 6", "min: 60\n  max: -2")
            .replace("param: \"later_draws\"", "param: \"mulligans\"")
            .replace("variant: \"general\"", "variant: \"missed_opening\"")
            .replace("mulligans: 2", "mulligans: 9\n  later_draws: 77");
        let mut cfg = parse(&yaml);
        cfg.validate().expect("ranges are clamped, not rejected");
        assert_eq!(cfg.targets, RangeConfig { min: 0, max: 40 });
        assert_eq!((cfg.axis.min, cfg.axis.max), (0, 4));
        assert_eq!(cfg.fixed.mulligans, 4);
        assert_eq!(cfg.fixed.later_draws, 40);
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("keep_smoke", "keep smoke");
        let mut cfg = parse(&yaml);
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn rejects_empty_output_path() {
        let yaml = BASIC_YAML.replace("\"sweeps/out/{run_id}/plots\"", "\"  \"");
        let mut cfg = parse(&yaml);
        let err = cfg.validate().expect_err("empty plots dir");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "outputs.plots_dir"
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SweepConfig::from_path("sweeps/does/not/exist.yaml").expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("sweeps/does/not/exist.yaml"));
    }
}
