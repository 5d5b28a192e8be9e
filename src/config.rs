//! Inspector configuration, loadable from YAML.
//!
//! ```yaml
//! header_exclusion_y: 43.0
//! char_occlusion_threshold: 0.8
//! redaction_labels: [confidential, name redacted, redacted]
//! pixel_check: light_dark
//! ```

use crate::domain::text::DEFAULT_REDACTION_LABELS;
use crate::error::{RedactorError, RedactorResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// How rendered pixels decide whether a box really hides its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelCheck {
    /// Keep a box only if every pixel in it has the same colour.
    #[default]
    Unicolor,
    /// Keep a box unless it shows both dark and light pixels. More lenient
    /// with gray-on-black hatching.
    LightDark,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Boxes whose bottom edge is at or above this line are running
    /// headers, not redactions.
    pub header_exclusion_y: f32,
    /// Boxes this thin or thinner are rules and hairlines.
    pub min_rect_size: f32,
    /// Fraction of a character that must be covered for it to count as hidden.
    pub char_occlusion_threshold: f32,
    /// Filler labels that do not count as leaked text.
    pub redaction_labels: Vec<String>,
    /// Empty the report when every finding in the document is a date.
    pub date_override: bool,
    pub pixel_check: PixelCheck,
    pub fetch_timeout_secs: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            header_exclusion_y: 43.0,
            min_rect_size: 4.0,
            char_occlusion_threshold: 0.8,
            redaction_labels: DEFAULT_REDACTION_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            date_override: true,
            pixel_check: PixelCheck::Unicolor,
            fetch_timeout_secs: 30,
        }
    }
}

impl InspectorConfig {
    pub fn from_yaml(yaml: &str) -> RedactorResult<Self> {
        let config: Self = serde_yml::from_str(yaml).map_err(|e| RedactorError::Config {
            path: None,
            reason: format!("Failed to parse configuration YAML: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> RedactorResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RedactorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            RedactorError::Config { reason, .. } => RedactorError::Config {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        })
    }

    /// Rejects values the pipeline cannot work with.
    pub fn validate(&self) -> RedactorResult<()> {
        if !(0.0..1.0).contains(&self.char_occlusion_threshold) {
            return Err(RedactorError::InvalidInput {
                parameter: "char_occlusion_threshold".to_string(),
                reason: format!(
                    "must be in [0, 1), got {}",
                    self.char_occlusion_threshold
                ),
            });
        }
        if !self.min_rect_size.is_finite() || self.min_rect_size < 0.0 {
            return Err(RedactorError::InvalidInput {
                parameter: "min_rect_size".to_string(),
                reason: format!("must be a non-negative number, got {}", self.min_rect_size),
            });
        }
        if !self.header_exclusion_y.is_finite() {
            return Err(RedactorError::InvalidInput {
                parameter: "header_exclusion_y".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if self.fetch_timeout_secs == 0 {
            return Err(RedactorError::InvalidInput {
                parameter: "fetch_timeout_secs".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
