//! Care card and catalog planning.
//!
//! # Responsibility
//! - Place title, names, description and six labeled care fields on one
//!   fixed-size page.
//! - Repeat the same per-record layout across catalog pages.
//!
//! # Invariants
//! - Every care field is always emitted; missing values use the template
//!   fallback text.
//! - The scientific name is a single right-anchored line even when it
//!   overflows the page.
//! - Catalog pages share no state: page `n` equals `plan_card(records[n])`.

use crate::config::{CardTemplate, EngineConfig, PageGeometry};
use crate::layout::measure::{FontKey, TextMeasure};
use crate::model::record::{Record, RecordField};
use crate::text::wrap::wrap_text;
use serde::Serialize;

/// One positioned line of text, baseline-anchored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontKey,
    pub font_size: f64,
}

impl LayoutLine {
    fn new(text: impl Into<String>, x: f64, y: f64, font: FontKey, font_size: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            font_size,
        }
    }
}

/// Plans card pages for a fixed geometry, template and font metric.
pub struct CardLayoutPlanner<M: TextMeasure> {
    page: PageGeometry,
    template: CardTemplate,
    measure: M,
}

impl<M: TextMeasure> CardLayoutPlanner<M> {
    pub fn new(page: PageGeometry, template: CardTemplate, measure: M) -> Self {
        Self {
            page,
            template,
            measure,
        }
    }

    pub fn from_config(config: &EngineConfig, measure: M) -> Self {
        Self::new(config.page, config.template.clone(), measure)
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    /// Lays out one record on a single page, top to bottom.
    pub fn plan_card(&self, record: &Record) -> Vec<LayoutLine> {
        let page = &self.page;
        let template = &self.template;
        let mut lines = Vec::new();

        let title_width = self
            .measure
            .measure(&template.title, FontKey::Bold, template.title_size);
        lines.push(LayoutLine::new(
            template.title.as_str(),
            (page.width - title_width) / 2.0,
            page.height - page.margin - template.title_drop,
            FontKey::Bold,
            template.title_size,
        ));

        let mut y = page.height - page.margin - template.body_drop;

        lines.push(self.right_aligned(
            &record.identity,
            y,
            FontKey::Oblique,
            template.scientific_size,
        ));
        y -= template.scientific_advance;

        if let Some(common_name) = present(record.common_name.as_deref()) {
            lines.push(self.right_aligned(common_name, y, FontKey::Bold, template.common_size));
        }
        y -= template.common_advance;

        match present(record.description.as_deref()) {
            Some(description) => {
                let wrapped = self.wrap(
                    description,
                    FontKey::Oblique,
                    template.description_size,
                    page.content_width(),
                );
                for text in wrapped {
                    lines.push(LayoutLine::new(
                        text,
                        page.margin,
                        y,
                        FontKey::Oblique,
                        template.description_size,
                    ));
                    y -= template.description_line_height;
                }
                y -= template.description_trailing_gap;
            }
            None => y -= template.description_absent_gap,
        }

        for field in RecordField::CARE {
            lines.push(LayoutLine::new(
                field.label(),
                page.margin,
                y,
                FontKey::Bold,
                template.care_size,
            ));

            let value =
                present(record.field(field)).unwrap_or(template.fallback_text.as_str());
            for text in self.wrap(value, FontKey::Regular, template.care_size, page.value_width()) {
                lines.push(LayoutLine::new(
                    text,
                    page.value_x(),
                    y,
                    FontKey::Regular,
                    template.care_size,
                ));
                y -= template.care_line_height;
            }
            y -= template.care_field_gap;
        }

        lines
    }

    /// Lays out one page per record, tagging each line with its page index.
    pub fn plan_catalog(&self, records: &[Record]) -> Vec<(usize, LayoutLine)> {
        records
            .iter()
            .enumerate()
            .flat_map(|(page_index, record)| {
                self.plan_card(record)
                    .into_iter()
                    .map(move |line| (page_index, line))
            })
            .collect()
    }

    fn right_aligned(&self, text: &str, y: f64, font: FontKey, size: f64) -> LayoutLine {
        let width = self.measure.measure(text, font, size);
        LayoutLine::new(text, self.page.width - self.page.margin - width, y, font, size)
    }

    fn wrap(&self, text: &str, font: FontKey, size: f64, max_width: f64) -> Vec<String> {
        wrap_text(text, max_width, |candidate| {
            self.measure.measure(candidate, font, size)
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
