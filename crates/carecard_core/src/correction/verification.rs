//! Decoding of feedback-verifier replies into correction proposals.
//!
//! # Responsibility
//! - Locate the JSON object inside a free-form model reply.
//! - Map each reported correction onto a typed `CorrectionProposal`.
//!
//! # Invariants
//! - Corrections naming an unknown field, no plant, or no replacement
//!   value are dropped with a warning rather than failing the reply.
//! - Values are untrusted: identities are normalized here, bounding happens
//!   at commit.

use crate::model::correction::{Agreement, CorrectionProposal};
use crate::model::record::RecordField;
use crate::text::normalize::normalize_scientific_name;
use log::warn;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug)]
pub enum VerificationParseError {
    /// No `{...}` object found in the reply.
    MissingJson,
    Json(serde_json::Error),
}

impl Display for VerificationParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJson => write!(f, "verification reply contains no JSON object"),
            Self::Json(err) => write!(f, "verification reply is not valid JSON: {err}"),
        }
    }
}

impl Error for VerificationParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingJson => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for VerificationParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Chat text plus the proposals extracted from one verifier reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub response_text: String,
    pub proposals: Vec<CorrectionProposal>,
}

#[derive(Debug, Deserialize)]
struct VerificationReply {
    #[serde(default)]
    response_text: String,
    #[serde(default)]
    corrections: Vec<ReportedCorrection>,
}

#[derive(Debug, Deserialize)]
struct ReportedCorrection {
    #[serde(default)]
    plant: String,
    #[serde(default)]
    field: String,
    #[serde(default)]
    current_value: String,
    #[serde(default)]
    suggested_value: String,
    #[serde(default)]
    verification: String,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    citations: Vec<String>,
    recommended_value: Option<String>,
}

/// Parses a verifier reply into chat text and proposals.
///
/// The reply may wrap the JSON object in prose; everything between the
/// first `{` and the last `}` is decoded. A missing `recommended_value`
/// falls back to the user's suggested value.
pub fn parse_verification_response(
    reply: &str,
) -> Result<VerificationOutcome, VerificationParseError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if end > start => &reply[start..=end],
        _ => return Err(VerificationParseError::MissingJson),
    };

    let decoded: VerificationReply = serde_json::from_str(json)?;
    let proposals = decoded
        .corrections
        .into_iter()
        .filter_map(into_proposal)
        .collect();

    Ok(VerificationOutcome {
        response_text: decoded.response_text,
        proposals,
    })
}

fn into_proposal(reported: ReportedCorrection) -> Option<CorrectionProposal> {
    let Some(field) = RecordField::parse(&reported.field) else {
        warn!(
            "event=verification_parse module=correction status=skipped reason=unknown_field field={}",
            reported.field
        );
        return None;
    };

    let identity = normalize_scientific_name(&reported.plant);
    if identity.is_empty() {
        warn!(
            "event=verification_parse module=correction status=skipped reason=missing_plant field={}",
            field
        );
        return None;
    }

    let proposed_value = reported
        .recommended_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(reported.suggested_value);
    if proposed_value.trim().is_empty() {
        warn!(
            "event=verification_parse module=correction status=skipped reason=empty_value identity={} field={}",
            identity, field
        );
        return None;
    }

    Some(CorrectionProposal {
        id: Uuid::new_v4(),
        identity,
        field,
        current_value: reported.current_value,
        proposed_value,
        agreement: Agreement::parse(&reported.verification),
        rationale: reported.reasoning,
        citations: reported.citations,
    })
}
