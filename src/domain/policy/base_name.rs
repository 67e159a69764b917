//! Filename derivation for policy artifacts.
//!
//! A base name is `{company}_{title}_{timestamp}` where each segment has
//! every non-ASCII-alphanumeric character replaced with `_` and is
//! lower-cased. The timestamp is ISO-8601 at second resolution with `:` and
//! `.` swapped for `-` before the same sanitisation is applied, so the whole
//! name stays within `[a-z0-9_]`.
//!
//! Two saves of the same company/title within one second derive the same
//! name; the later save overwrites the earlier artifacts.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{ArtifactFormat, PolicyError, PolicyInput};

/// Sanitised, timestamp-qualified name shared by a policy's three artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BaseName(String);

impl BaseName {
    /// Derives a base name from raw identifiers.
    ///
    /// No length cap is applied.
    pub fn derive(company_name: &str, title: &str, now: &Timestamp) -> Self {
        Self(format!(
            "{}_{}_{}",
            sanitize_segment(company_name),
            sanitize_segment(title),
            timestamp_segment(now)
        ))
    }

    /// Derives a base name from a policy's `companyName` and `title`.
    pub fn for_policy(input: &PolicyInput, now: &Timestamp) -> Result<Self, PolicyError> {
        Ok(Self::derive(input.company_name()?, input.title()?, now))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for one artifact, e.g. `acme_policy_..._.pdf`.
    pub fn file_name(&self, format: ArtifactFormat) -> String {
        format!("{}.{}", self.0, format.extension())
    }
}

impl std::fmt::Display for BaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn timestamp_segment(now: &Timestamp) -> String {
    sanitize_segment(&now.to_iso_seconds().replace([':', '.'], "-"))
}
