//! Text measurement capability supplied by the render backend.

use serde::{Deserialize, Serialize};

/// Font faces used by the card template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontKey {
    Regular,
    Bold,
    Oblique,
}

impl FontKey {
    /// Standard PDF base-14 face name for this key.
    pub fn backend_name(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Width metric for a run of text in a given face and size.
///
/// Implementations must be pure and monotonic in string length for a
/// fixed font and size.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: FontKey, size: f64) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, FontKey, f64) -> f64,
{
    fn measure(&self, text: &str, font: FontKey, size: f64) -> f64 {
        self(text, font, size)
    }
}

/// Rendering-free approximation: every char advances a fixed share of the em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageCharMeasure {
    /// Advance per char as a fraction of the font size.
    pub em_fraction: f64,
    /// Extra advance factor applied to bold text.
    pub bold_factor: f64,
}

impl Default for AverageCharMeasure {
    // Close to Helvetica's mean advance over lowercase prose.
    fn default() -> Self {
        Self {
            em_fraction: 0.5,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasure for AverageCharMeasure {
    fn measure(&self, text: &str, font: FontKey, size: f64) -> f64 {
        let advance = match font {
            FontKey::Bold => self.em_fraction * self.bold_factor,
            FontKey::Regular | FontKey::Oblique => self.em_fraction,
        };
        text.chars().count() as f64 * advance * size
    }
}

#[cfg(test)]
mod tests {
    use super::{AverageCharMeasure, FontKey, TextMeasure};

    #[test]
    fn closures_are_measures() {
        let measure = |text: &str, _font: FontKey, size: f64| text.len() as f64 * size;
        assert_eq!(measure.measure("abc", FontKey::Regular, 2.0), 6.0);
    }

    #[test]
    fn average_measure_widens_bold() {
        let measure = AverageCharMeasure::default();
        let regular = measure.measure("Light:", FontKey::Regular, 9.0);
        let bold = measure.measure("Light:", FontKey::Bold, 9.0);
        assert!(bold > regular);
        assert_eq!(measure.measure("", FontKey::Bold, 9.0), 0.0);
    }
}
