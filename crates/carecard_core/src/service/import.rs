//! Spreadsheet row mapping for record import.
//!
//! # Responsibility
//! - Recognize the two supported header layouts.
//! - Map one header→value row onto a raw (unbounded) `Record`.
//!
//! # Invariants
//! - Row mapping never bounds or persists; the record service does both.
//! - Cell values are trimmed; blank cells become `None`.

use crate::model::record::{Record, RecordField};
use std::collections::HashMap;

/// One spreadsheet row keyed by header name.
pub type ImportRow = HashMap<String, String>;

/// Supported header layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// `scientific_name,common_name,description,light,...,toxicity`.
    SnakeCase,
    /// Shop export: `Botanical Name,Common Name,...,Cat Friendly,Dog Friendly`.
    Shop,
}

const SHOP_NAME_HEADER: &str = "Botanical Name";
const SNAKE_NAME_HEADER: &str = "scientific_name";

const SNAKE_COLUMNS: [(&str, RecordField); 7] = [
    ("description", RecordField::Description),
    ("light", RecordField::Light),
    ("water", RecordField::Water),
    ("feeding", RecordField::Feeding),
    ("temperature", RecordField::Temperature),
    ("humidity", RecordField::Humidity),
    ("toxicity", RecordField::Toxicity),
];

const SHOP_COLUMNS: [(&str, RecordField); 5] = [
    ("Description", RecordField::Description),
    ("Light", RecordField::Light),
    ("Water", RecordField::Water),
    ("Fertilizer", RecordField::Feeding),
    ("Temperature", RecordField::Temperature),
];

/// Detects the layout from a header row; shop headers win when both exist.
pub fn detect_format<S: AsRef<str>>(headers: &[S]) -> Option<RowFormat> {
    let has = |name: &str| headers.iter().any(|header| header.as_ref().trim() == name);
    if has(SHOP_NAME_HEADER) {
        Some(RowFormat::Shop)
    } else if has(SNAKE_NAME_HEADER) {
        Some(RowFormat::SnakeCase)
    } else {
        None
    }
}

/// Maps a row onto a record, or `None` when the name cell is blank.
pub fn record_from_row(row: &ImportRow, format: RowFormat) -> Option<Record> {
    let cell = |header: &str| {
        row.get(header)
            .map(|value| value.trim())
            .unwrap_or_default()
            .to_string()
    };

    let (name_header, common_header) = match format {
        RowFormat::SnakeCase => (SNAKE_NAME_HEADER, "common_name"),
        RowFormat::Shop => (SHOP_NAME_HEADER, "Common Name"),
    };
    let name = cell(name_header);
    if name.is_empty() {
        return None;
    }

    let mut record = Record::new(&name);
    record.set_common_name(cell(common_header));

    match format {
        RowFormat::SnakeCase => {
            for (header, field) in SNAKE_COLUMNS {
                record.set_field(field, cell(header));
            }
        }
        RowFormat::Shop => {
            for (header, field) in SHOP_COLUMNS {
                record.set_field(field, cell(header));
            }
            record.set_field(
                RecordField::Toxicity,
                pet_toxicity(&cell("Cat Friendly"), &cell("Dog Friendly")),
            );
        }
    }

    Some(record)
}

/// Folds the shop's pet-friendliness flags into one toxicity sentence.
pub fn pet_toxicity(cat_friendly: &str, dog_friendly: &str) -> String {
    let cat_unsafe = cat_friendly.eq_ignore_ascii_case("no");
    let dog_unsafe = dog_friendly.eq_ignore_ascii_case("no");

    let mut toxic_to = Vec::new();
    if cat_unsafe {
        toxic_to.push("toxic to cats");
    }
    if dog_unsafe {
        toxic_to.push("toxic to dogs");
    }

    if !toxic_to.is_empty() {
        format!("Toxic: {}", toxic_to.join(" and "))
    } else if cat_friendly.eq_ignore_ascii_case("yes") && dog_friendly.eq_ignore_ascii_case("yes")
    {
        "Non-toxic to cats and dogs".to_string()
    } else {
        String::new()
    }
}
