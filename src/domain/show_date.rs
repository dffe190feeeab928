use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the fixed show dates a ticket can be for.
///
/// The serialized form is the full label (for example `03/07 (六)`), which is
/// also what is shown to users. Parsing additionally accepts the short
/// `MM/DD` form.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ShowDate {
    /// Saturday, 7 March.
    #[default]
    #[serde(rename = "03/07 (六)")]
    Mar07,
    /// Sunday, 8 March.
    #[serde(rename = "03/08 (日)")]
    Mar08,
}

impl ShowDate {
    /// Every show date, in calendar order.
    pub const ALL: [Self; 2] = [Self::Mar07, Self::Mar08];

    /// The full display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mar07 => "03/07 (六)",
            Self::Mar08 => "03/08 (日)",
        }
    }

    /// The short `MM/DD` form.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::Mar07 => "03/07",
            Self::Mar08 => "03/08",
        }
    }
}

impl fmt::Display for ShowDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShowDate {
    type Err = ParseShowDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|date| date.label() == s || date.short() == s)
            .ok_or_else(|| ParseShowDateError(s.to_string()))
    }
}

/// The string is not one of the known show dates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown show date '{0}' (expected one of: 03/07, 03/08)")]
pub struct ParseShowDateError(String);
