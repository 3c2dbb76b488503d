//! Keyword-based bank identification.
//!
//! A [`BankIdentifier`] holds an ordered table of banks, each with a set of
//! case-insensitive pattern alternatives: full names, short codes, IFSC bank
//! codes and UPI handle suffixes. The first bank with any matching pattern
//! wins.
//!
//! Tables can be replaced at runtime by loading a CSV with a `bank,pattern`
//! header, one alternative per row.

use crate::error::{Error, Result};
use crate::types::UNKNOWN;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::io::Read;

/// Built-in table, in match priority order.
const DEFAULT_BANKS: &[(&str, &[&str])] = &[
    ("State Bank of India", &["State Bank", "SBI", r"SBIN\d{7}", "@sbi"]),
    ("HDFC Bank", &["HDFC BANK", "HDFC", "HDF", "@hdfc"]),
    ("ICICI Bank", &["ICICI", "ICIC", "@ybl"]),
    ("Axis Bank", &["Axis Bank", "Axis", "@apl"]),
    ("Kotak Mahindra Bank", &["Kotak", "KMB", "Kotak Mahindra"]),
    ("Canara Bank", &["CANARA BANK", "Canara", "CNRB"]),
    ("Punjab National Bank", &["Punjab Nat", "PNB", "PNBM", "PUNB"]),
    ("IDFC FIRST Bank", &["idfc", "IDFC FIRST", "@idfc"]),
    ("Yes Bank", &["YES BANK", "YESB"]),
    ("AU Small Finance Bank", &["AUBL"]),
    ("Bank of Baroda", &["Baroda", "BOB", "BARB"]),
    ("Indian Bank", &["INDIAN BANK", "IDIB", "@ibl"]),
    ("Sarvodaya Bank", &["Sarvodaya"]),
    ("Paytm Payments Bank", &["@paytm", "@ptye", "@ptax"]),
];

static DEFAULT_IDENTIFIER: Lazy<BankIdentifier> = Lazy::new(|| {
    BankIdentifier::from_entries(
        DEFAULT_BANKS
            .iter()
            .map(|(name, patterns)| (name.to_string(), patterns.iter().map(|p| p.to_string()).collect())),
    )
    .expect("built-in bank patterns are valid")
});

/// One bank's display name and the patterns that identify it.
#[derive(Debug, Clone)]
pub struct BankPattern {
    name: String,
    patterns: Vec<String>,
    matcher: Regex,
}

impl BankPattern {
    /// Compile a bank entry. Patterns are regular-expression alternatives
    /// matched case-insensitively anywhere in the snippet.
    pub fn new(name: impl Into<String>, patterns: Vec<String>) -> Result<Self> {
        let name = name.into();
        if patterns.is_empty() {
            return Err(Error::MissingField(format!("patterns for bank '{}'", name)));
        }

        let alternation = patterns
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                bank: name.clone(),
                source,
            })?;

        Ok(Self {
            name,
            patterns,
            matcher,
        })
    }

    /// Canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern alternatives in the order they were given.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if any pattern occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Row of a bank table CSV.
#[derive(Debug, Deserialize)]
struct BankPatternRecord {
    #[serde(alias = "Bank", alias = "name")]
    bank: String,
    #[serde(alias = "Pattern")]
    pattern: String,
}

/// Ordered, read-only table of banks.
#[derive(Debug, Clone)]
pub struct BankIdentifier {
    banks: Vec<BankPattern>,
}

impl Default for BankIdentifier {
    fn default() -> Self {
        DEFAULT_IDENTIFIER.clone()
    }
}

impl BankIdentifier {
    /// Build a table from `(bank, patterns)` entries, keeping their order.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let banks = entries
            .into_iter()
            .map(|(name, patterns)| BankPattern::new(name, patterns))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { banks })
    }

    /// Load a table from CSV with a `bank,pattern` header.
    ///
    /// Rows for the same bank are grouped under its first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use remark_extractor::bank::BankIdentifier;
    ///
    /// let table = "bank,pattern\nExample Bank,EXMP\nExample Bank,@exm\n";
    /// let banks = BankIdentifier::from_read(&mut table.as_bytes())?;
    /// assert_eq!(banks.identify(Some("pay@exm")), "Example Bank");
    /// # Ok::<(), remark_extractor::Error>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BankPatternRecord = result?;
            if record.bank.is_empty() || record.pattern.is_empty() {
                continue;
            }

            match entries.iter_mut().find(|(name, _)| *name == record.bank) {
                Some((_, patterns)) => patterns.push(record.pattern),
                None => entries.push((record.bank, vec![record.pattern])),
            }
        }

        if entries.is_empty() {
            return Err(Error::MissingField("bank table rows".to_string()));
        }

        Self::from_entries(entries)
    }

    /// Return the first bank matching `text`, or `UNKNOWN`.
    ///
    /// Absent and empty snippets are always `UNKNOWN`.
    pub fn identify(&self, text: Option<&str>) -> &str {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return UNKNOWN;
        };

        self.banks
            .iter()
            .find(|bank| bank.matches(text))
            .map(|bank| bank.name())
            .unwrap_or(UNKNOWN)
    }

    /// Like [`identify`](Self::identify), but `None` instead of `UNKNOWN`.
    pub fn find(&self, text: &str) -> Option<&str> {
        match self.identify(Some(text)) {
            UNKNOWN => None,
            name => Some(name),
        }
    }

    /// Banks in priority order.
    pub fn banks(&self) -> &[BankPattern] {
        &self.banks
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_table_order() {
        let banks = BankIdentifier::default();
        assert_eq!(banks.len(), 14);
        assert_eq!(banks.banks()[0].name(), "State Bank of India");
        assert_eq!(banks.banks()[13].name(), "Paytm Payments Bank");
    }

    #[test]
    fn test_identify_by_keyword_code_and_handle() {
        let banks = BankIdentifier::default();
        assert_eq!(banks.identify(Some("paid via hdfc bank")), "HDFC Bank");
        assert_eq!(banks.identify(Some("HDF")), "HDFC Bank");
        assert_eq!(banks.identify(Some("john@ybl")), "ICICI Bank");
        assert_eq!(banks.identify(Some("SBIN0001234")), "State Bank of India");
        assert_eq!(banks.identify(Some("UTIB")), UNKNOWN);
        assert_eq!(banks.identify(Some("shop@paytm")), "Paytm Payments Bank");
    }

    #[test]
    fn test_first_match_wins() {
        // "SBI" and "HDFC" both occur; State Bank of India comes first.
        let banks = BankIdentifier::default();
        assert_eq!(banks.identify(Some("HDFC to SBI transfer")), "State Bank of India");
    }

    #[test]
    fn test_empty_or_absent_snippet() {
        let banks = BankIdentifier::default();
        assert_eq!(banks.identify(None), UNKNOWN);
        assert_eq!(banks.identify(Some("")), UNKNOWN);
        assert_eq!(banks.find(""), None);
    }

    #[test]
    fn test_from_read_groups_rows() {
        let table = "bank,pattern\nAlpha Bank,ALPH\nBeta Bank,BETA\nAlpha Bank,@alpha\n";
        let banks = BankIdentifier::from_read(&mut table.as_bytes()).unwrap();

        assert_eq!(banks.len(), 2);
        assert_eq!(banks.banks()[0].patterns(), ["ALPH".to_string(), "@alpha".to_string()]);
        assert_eq!(banks.identify(Some("me@ALPHA")), "Alpha Bank");
        assert_eq!(banks.identify(Some("beta-ref")), "Beta Bank");
    }

    #[test]
    fn test_from_read_rejects_bad_pattern() {
        let table = "bank,pattern\nBroken Bank,(unclosed\n";
        let err = BankIdentifier::from_read(&mut table.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref bank, .. } if bank == "Broken Bank"));
    }

    #[test]
    fn test_from_read_rejects_empty_table() {
        let table = "bank,pattern\n";
        assert!(BankIdentifier::from_read(&mut table.as_bytes()).is_err());
    }
}
