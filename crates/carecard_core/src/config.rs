//! Engine configuration values.
//!
//! # Responsibility
//! - Carry field limits, page geometry and card template as explicit values.
//! - Load overrides from JSON documents with per-section defaults.
//!
//! # Invariants
//! - Nothing in core reads limits or geometry from globals; every budgeting
//!   and layout call receives the configuration it should use.
//! - Field names not present in `FieldLimits` are unbounded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Configuration load error.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Maximum character count per bounded field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLimits {
    limits: BTreeMap<String, usize>,
}

impl FieldLimits {
    /// Creates an empty table; every field is unbounded.
    pub fn empty() -> Self {
        Self {
            limits: BTreeMap::new(),
        }
    }

    /// Returns a copy of this table with `field` bounded to `limit` chars.
    pub fn with_limit(mut self, field: impl Into<String>, limit: usize) -> Self {
        self.limits.insert(field.into(), limit);
        self
    }

    /// Returns the configured ceiling for `field`, if any.
    pub fn limit_for(&self, field: &str) -> Option<usize> {
        self.limits.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.limits
            .iter()
            .map(|(field, limit)| (field.as_str(), *limit))
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self::empty()
            .with_limit("description", 250)
            .with_limit("light", 180)
            .with_limit("water", 180)
            .with_limit("feeding", 180)
            .with_limit("temperature", 120)
            .with_limit("humidity", 120)
            .with_limit("toxicity", 150)
    }
}

/// Fixed page dimensions shared by planner and render backend, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Width reserved for care field labels, measured from the left margin.
    pub label_column: f64,
}

impl PageGeometry {
    /// Width available to full-width blocks such as the description.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// X position where care field values start.
    pub fn value_x(&self) -> f64 {
        self.margin + self.label_column
    }

    /// Width available to care field values.
    pub fn value_width(&self) -> f64 {
        self.width - self.value_x() - self.margin
    }
}

impl Default for PageGeometry {
    // 6x4 inch landscape at 72 points per inch.
    fn default() -> Self {
        Self {
            width: 432.0,
            height: 288.0,
            margin: 18.0,
            label_column: 80.0,
        }
    }
}

/// Font sizes and vertical rhythm of the card template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardTemplate {
    pub title: String,
    pub title_size: f64,
    /// Distance from the top margin to the title baseline.
    pub title_drop: f64,
    /// Distance from the top margin to the first record line.
    pub body_drop: f64,
    pub scientific_size: f64,
    pub scientific_advance: f64,
    pub common_size: f64,
    pub common_advance: f64,
    pub description_size: f64,
    pub description_line_height: f64,
    pub description_trailing_gap: f64,
    pub description_absent_gap: f64,
    pub care_size: f64,
    pub care_line_height: f64,
    pub care_field_gap: f64,
    pub fallback_text: String,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            title: "Plant Care Guide".to_string(),
            title_size: 16.0,
            title_drop: 5.0,
            body_drop: 30.0,
            scientific_size: 14.0,
            scientific_advance: 20.0,
            common_size: 11.0,
            common_advance: 20.0,
            description_size: 8.0,
            description_line_height: 10.0,
            description_trailing_gap: 5.0,
            description_absent_gap: 10.0,
            care_size: 9.0,
            care_line_height: 12.0,
            care_field_gap: 3.0,
            fallback_text: "N/A".to_string(),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub field_limits: FieldLimits,
    #[serde(default)]
    pub page: PageGeometry,
    #[serde(default)]
    pub template: CardTemplate,
}

impl EngineConfig {
    /// Parses a JSON document; missing sections and keys fall back to defaults.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }
}
