//! Botanical record model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the record store.
//! - Provide the single bounding/normalization entry point for write paths.
//!
//! # Invariants
//! - `identity` equals `normalize_scientific_name(identity)` once constructed
//!   through `Record::new` or `renormalize`.
//! - Blank field values are stored as `None`.
//! - `validate` must pass before any persistence write.

use crate::config::FieldLimits;
use crate::text::budget::bound_field;
use crate::text::normalize::normalize_scientific_name;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Limit-table key used for the common name.
pub const COMMON_NAME_FIELD: &str = "common_name";

/// Correctable text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Description,
    Light,
    Water,
    Feeding,
    Temperature,
    Humidity,
    Toxicity,
}

impl RecordField {
    /// Care fields in card order.
    pub const CARE: [RecordField; 6] = [
        Self::Light,
        Self::Water,
        Self::Feeding,
        Self::Temperature,
        Self::Humidity,
        Self::Toxicity,
    ];

    /// Every correctable field.
    pub const ALL: [RecordField; 7] = [
        Self::Description,
        Self::Light,
        Self::Water,
        Self::Feeding,
        Self::Temperature,
        Self::Humidity,
        Self::Toxicity,
    ];

    /// Stable key used in limit tables, storage and proposals.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Light => "light",
            Self::Water => "water",
            Self::Feeding => "feeding",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Toxicity => "toxicity",
        }
    }

    /// Card label for this field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Description => "Description:",
            Self::Light => "Light:",
            Self::Water => "Water:",
            Self::Feeding => "Feeding:",
            Self::Temperature => "Temperature:",
            Self::Humidity => "Humidity:",
            Self::Toxicity => "Toxicity:",
        }
    }

    /// Parses a field key case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-path validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyIdentity,
    IdentityNotNormalized {
        identity: String,
        normalized: String,
    },
    FieldTooLong {
        field: &'static str,
        length: usize,
        limit: usize,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIdentity => write!(f, "record identity cannot be empty"),
            Self::IdentityNotNormalized {
                identity,
                normalized,
            } => write!(
                f,
                "record identity `{identity}` is not normalized (expected `{normalized}`)"
            ),
            Self::FieldTooLong {
                field,
                length,
                limit,
            } => write!(f, "field `{field}` has {length} chars, limit is {limit}"),
        }
    }
}

impl Error for RecordValidationError {}

/// One bounded field that was shortened by `Record::apply_limits`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub field: &'static str,
    pub original_len: usize,
    pub bounded_len: usize,
}

/// One botanical entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Normalized scientific name; unique, case-insensitively.
    pub identity: String,
    pub common_name: Option<String>,
    pub description: Option<String>,
    pub light: Option<String>,
    pub water: Option<String>,
    pub feeding: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub toxicity: Option<String>,
    /// Last rendered card location, owned by the export collaborator.
    #[serde(default)]
    pub card_path: Option<String>,
}

impl Record {
    /// Creates an empty record whose identity is the normalized `raw_name`.
    pub fn new(raw_name: &str) -> Self {
        Self {
            identity: normalize_scientific_name(raw_name),
            ..Self::default()
        }
    }

    pub fn field(&self, field: RecordField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Sets a field; blank values clear it.
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        *self.slot_mut(field) = non_blank(value.into());
    }

    pub fn set_common_name(&mut self, value: impl Into<String>) {
        self.common_name = non_blank(value.into());
    }

    /// Re-normalizes `identity`, returning whether it changed.
    pub fn renormalize(&mut self) -> bool {
        let normalized = normalize_scientific_name(&self.identity);
        if normalized == self.identity {
            return false;
        }
        self.identity = normalized;
        true
    }

    /// Bounds every text field to `limits`, reporting what was shortened.
    ///
    /// This is the write-time entry point: import, manual edit and
    /// correction commit all pass through it before saving.
    pub fn apply_limits(&mut self, limits: &FieldLimits) -> Vec<Truncation> {
        let mut truncations = Vec::new();
        let identity = self.identity.clone();

        let mut bound_slot = |name: &'static str, slot: &mut Option<String>| {
            let Some(value) = slot.as_ref() else {
                return;
            };
            let bounded = bound_field(name, value, limits);
            if bounded == *value {
                return;
            }
            let truncation = Truncation {
                field: name,
                original_len: value.chars().count(),
                bounded_len: bounded.chars().count(),
            };
            info!(
                "event=field_truncated module=model status=ok identity={} field={} from={} to={}",
                identity, name, truncation.original_len, truncation.bounded_len
            );
            truncations.push(truncation);
            *slot = non_blank(bounded);
        };

        bound_slot(COMMON_NAME_FIELD, &mut self.common_name);
        for field in RecordField::ALL {
            bound_slot(field.as_str(), self.slot_mut(field));
        }

        truncations
    }

    /// Consuming variant of [`Record::apply_limits`].
    pub fn bounded(mut self, limits: &FieldLimits) -> Self {
        self.apply_limits(limits);
        self
    }

    /// Checks identity normalization and every configured field limit.
    pub fn validate(&self, limits: &FieldLimits) -> Result<(), RecordValidationError> {
        if self.identity.is_empty() {
            return Err(RecordValidationError::EmptyIdentity);
        }

        let normalized = normalize_scientific_name(&self.identity);
        if normalized != self.identity {
            return Err(RecordValidationError::IdentityNotNormalized {
                identity: self.identity.clone(),
                normalized,
            });
        }

        let named_values = std::iter::once((COMMON_NAME_FIELD, self.common_name.as_deref()))
            .chain(
                RecordField::ALL
                    .into_iter()
                    .map(|field| (field.as_str(), self.field(field))),
            );
        for (name, value) in named_values {
            let (Some(value), Some(limit)) = (value, limits.limit_for(name)) else {
                continue;
            };
            let length = value.chars().count();
            if length > limit {
                return Err(RecordValidationError::FieldTooLong {
                    field: name,
                    length,
                    limit,
                });
            }
        }

        Ok(())
    }

    fn slot(&self, field: RecordField) -> &Option<String> {
        match field {
            RecordField::Description => &self.description,
            RecordField::Light => &self.light,
            RecordField::Water => &self.water,
            RecordField::Feeding => &self.feeding,
            RecordField::Temperature => &self.temperature,
            RecordField::Humidity => &self.humidity,
            RecordField::Toxicity => &self.toxicity,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut Option<String> {
        match field {
            RecordField::Description => &mut self.description,
            RecordField::Light => &mut self.light,
            RecordField::Water => &mut self.water,
            RecordField::Feeding => &mut self.feeding,
            RecordField::Temperature => &mut self.temperature,
            RecordField::Humidity => &mut self.humidity,
            RecordField::Toxicity => &mut self.toxicity,
        }
    }
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
