//! Document identifier handling: batch splitting, sanitization and search kind

use serde::{Deserialize, Serialize};

/// Which provider endpoint a batch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Organization records (CNPJ)
    Companies,
    /// Individual records (CPF)
    Persons,
}

impl SearchKind {
    /// Resolve the form-supplied `type` value. `empresas` selects the
    /// companies endpoint; anything else falls back to persons.
    pub fn from_form_value(value: &str) -> Self {
        if value == "empresas" {
            SearchKind::Companies
        } else {
            SearchKind::Persons
        }
    }
}

impl Default for SearchKind {
    fn default() -> Self {
        SearchKind::Companies
    }
}

/// Split a raw multi-line textarea blob into trimmed, non-empty lines,
/// preserving input order. No validation happens here.
pub fn split_documents(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip every non-digit character from a document identifier.
///
/// Malformed identifiers are not rejected; they are forwarded to the
/// provider as-is and surface as per-item provider errors.
pub fn sanitize_document(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
