//! Label bucketing and the percentage distribution for the statistics
//! strip.

use crate::core::format;
use crate::net::schema::Claim;

/// The fixed label vocabulary. Anything the backend emits outside this
/// set counts under `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimLabel {
    True,
    Misleading,
    False,
    Unverifiable,
    Other,
}

impl ClaimLabel {
    /// Display order of the statistics strip.
    pub const ALL: [ClaimLabel; 5] = [
        ClaimLabel::True,
        ClaimLabel::Misleading,
        ClaimLabel::False,
        ClaimLabel::Unverifiable,
        ClaimLabel::Other,
    ];

    /// Case-insensitive match over the backend's label spellings.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "true" => Self::True,
            "false" => Self::False,
            "unverifiable" => Self::Unverifiable,
            "misleading" | "partially true" | "misleading/partially true" => Self::Misleading,
            _ => Self::Other,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::True => "True",
            Self::Misleading => "Misleading/partially true",
            Self::False => "False",
            Self::Unverifiable => "Unverifiable",
            Self::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::True => "✅",
            Self::Misleading => "⚠️",
            Self::False => "❌",
            Self::Unverifiable => "🚩",
            Self::Other => "❓",
        }
    }
}

/// Per-label share of a claim list. Absent entirely for an empty list,
/// so empty results never divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDistribution {
    counts: [usize; 5],
    total: usize,
}

impl LabelDistribution {
    pub fn from_claims(claims: &[Claim]) -> Option<Self> {
        if claims.is_empty() {
            return None;
        }
        let mut counts = [0usize; 5];
        for claim in claims {
            counts[Self::slot(ClaimLabel::parse(&claim.label))] += 1;
        }
        Some(Self {
            counts,
            total: claims.len(),
        })
    }

    pub fn count(&self, label: ClaimLabel) -> usize {
        self.counts[Self::slot(label)]
    }

    /// count/total as a percentage truncated to one decimal.
    pub fn percent(&self, label: ClaimLabel) -> f64 {
        format::percent_truncated(self.count(label), self.total)
    }

    fn slot(label: ClaimLabel) -> usize {
        match label {
            ClaimLabel::True => 0,
            ClaimLabel::Misleading => 1,
            ClaimLabel::False => 2,
            ClaimLabel::Unverifiable => 3,
            ClaimLabel::Other => 4,
        }
    }
}
