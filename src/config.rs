//! Immutable parser configuration.

use crate::error::{Error, Result};
use regex::Regex;

/// Words that disqualify a UPI segment from being a payer name when they
/// occur anywhere in it (compared lowercased).
pub const DEFAULT_NAME_DENY_WORDS: &[&str] = &[
    "remark",
    "fund",
    "payment",
    "booking",
    "request",
    "sent",
    "p2a",
    "bill payment",
    "kotak",
    "nat",
    "bank",
];

/// Words that disqualify a UPI segment when it starts with them.
pub const DEFAULT_NAME_DENY_PREFIXES: &[&str] = &["paid"];

/// Default BIL carrier codes.
pub const DEFAULT_BIL_CARRIER_CODES: &[&str] = &["EKW", "EJF"];

/// Deny-list applied to candidate UPI name segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    pub contains: Vec<String>,
    pub prefixes: Vec<String>,
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            contains: DEFAULT_NAME_DENY_WORDS.iter().map(|w| w.to_string()).collect(),
            prefixes: DEFAULT_NAME_DENY_PREFIXES.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl NameFilter {
    /// True if `segment` looks like boilerplate rather than a name.
    pub fn is_denied(&self, segment: &str) -> bool {
        let lower = segment.to_lowercase();
        let lower = lower.trim();
        self.contains.iter().any(|w| lower.contains(w.as_str()))
            || self.prefixes.iter().any(|w| lower.starts_with(w.as_str()))
    }
}

/// Settings owned by a [`RemarkParser`](crate::parser::RemarkParser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub name_filter: NameFilter,
    pub bil_carrier_codes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name_filter: NameFilter::default(),
            bil_carrier_codes: DEFAULT_BIL_CARRIER_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Replace the BIL carrier codes.
    pub fn with_bil_carrier_codes(mut self, codes: Vec<String>) -> Self {
        self.bil_carrier_codes = codes;
        self
    }

    /// Compile the BIL identifier matcher: one carrier code followed by
    /// exactly seven digits, covering the whole segment.
    pub(crate) fn bil_id_regex(&self) -> Result<Regex> {
        if self.bil_carrier_codes.is_empty() {
            return Err(Error::MissingField("BIL carrier codes".to_string()));
        }
        for code in &self.bil_carrier_codes {
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(Error::InvalidCarrierCode(code.clone()));
            }
        }

        let pattern = format!(r"^(?:{})\d{{7}}$", self.bil_carrier_codes.join("|"));
        Regex::new(&pattern).map_err(|source| Error::InvalidPattern {
            bank: "BIL carrier".to_string(),
            source,
        })
    }
}
