use crate::error::{CoreError, CoreResult};
use crate::masking::redaction::MaskingProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum canonical length a clause must have before it is highlighted.
/// Shorter quotes ("없음", "해당 없음") are too generic to place safely.
pub const DEFAULT_MIN_TARGET_CHARS: usize = 5;

/// Separator between an analyzer label and the quoted clause ("임금: ...").
pub const DEFAULT_LABEL_SEPARATOR: char = ':';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HighlightConfig {
    pub min_target_chars: usize,
    pub label_separator: char,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            min_target_chars: DEFAULT_MIN_TARGET_CHARS,
            label_separator: DEFAULT_LABEL_SEPARATOR,
        }
    }
}

impl HighlightConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_target_chars == 0 {
            return Err(CoreError::InvalidInput(
                "min_target_chars must be at least 1".to_string(),
            ));
        }
        if self.label_separator.is_whitespace() {
            return Err(CoreError::InvalidInput(
                "label_separator must not be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level settings shared by the runners. Every field is optional in the
/// JSON file; missing fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoreConfig {
    pub highlight: HighlightConfig,
    pub masking_profile: MaskingProfile,
}

impl CoreConfig {
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        let config: CoreConfig = serde_json::from_str(raw)?;
        config.highlight.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}
