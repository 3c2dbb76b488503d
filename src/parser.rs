//! Remark parsing engine.
//!
//! [`RemarkParser`] normalizes a remark, picks its dialect by prefix and
//! runs that dialect's extractor. It owns all of its configuration and holds
//! no mutable state, so one parser can be shared across threads and rows.

use crate::bank::BankIdentifier;
use crate::config::ParserConfig;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::extractors::Extractors;
use crate::normalize::normalize_remark;
use crate::types::ParsedResult;
use regex::Regex;
use tracing::debug;

/// Pure function from remark text to [`ParsedResult`].
///
/// # Examples
///
/// ```
/// use remark_extractor::RemarkParser;
///
/// let parser = RemarkParser::default();
/// let result = parser.parse("NEFT-HDFC123456789012-RAVI SHAH");
/// assert_eq!(result.name, "RAVI SHAH");
/// assert_eq!(result.transaction_id, "NEFT-HDFC123456789012");
/// assert_eq!(result.bank, "HDFC Bank");
/// ```
#[derive(Debug, Clone)]
pub struct RemarkParser {
    banks: BankIdentifier,
    config: ParserConfig,
    bil_id: Regex,
}

impl Default for RemarkParser {
    fn default() -> Self {
        let config = ParserConfig::default();
        let bil_id = config
            .bil_id_regex()
            .expect("default BIL carrier codes are valid");
        Self {
            banks: BankIdentifier::default(),
            config,
            bil_id,
        }
    }
}

impl RemarkParser {
    /// Create a parser from a bank table and configuration.
    pub fn new(banks: BankIdentifier, config: ParserConfig) -> Result<Self> {
        let bil_id = config.bil_id_regex()?;
        Ok(Self {
            banks,
            config,
            bil_id,
        })
    }

    /// Parse a supplied remark.
    ///
    /// A remark that normalizes to nothing matches no dialect and yields
    /// `UNKNOWN` fields; only [`compose`](Self::compose) maps a missing
    /// remark to empty fields.
    pub fn parse(&self, raw: &str) -> ParsedResult {
        self.parse_with_dialect(raw).1
    }

    /// Parse a remark and report which dialect handled it.
    pub fn parse_with_dialect(&self, raw: &str) -> (Dialect, ParsedResult) {
        let remark = normalize_remark(raw);
        let dialect = Dialect::detect(&remark);
        let result = self.extractors().extract(dialect, &remark);
        debug!(
            %dialect,
            remark = %remark,
            name = %result.name,
            id = %result.transaction_id,
            bank = %result.bank,
            "parsed remark"
        );
        (dialect, result)
    }

    /// Compose the derived fields for a row's remark cell.
    ///
    /// An absent or empty cell yields three empty strings, distinguishing
    /// "no remark supplied" from a remark that could not be parsed.
    pub fn compose(&self, remark: Option<&str>) -> ParsedResult {
        match remark {
            Some(raw) if !raw.is_empty() => self.parse(raw),
            _ => ParsedResult::empty(),
        }
    }

    fn extractors(&self) -> Extractors<'_> {
        Extractors {
            banks: &self.banks,
            name_filter: &self.config.name_filter,
            bil_id: &self.bil_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNKNOWN;
    use pretty_assertions::assert_eq;

    fn parse(remark: &str) -> ParsedResult {
        RemarkParser::default().parse(remark)
    }

    #[test]
    fn test_upi_scenario() {
        assert_eq!(
            parse("UPI/123456789012/John Doe/Payment for goods/john@ybl"),
            ParsedResult::new("John Doe", "UPI-123456789012", "ICICI Bank")
        );
    }

    #[test]
    fn test_neft_scenario() {
        assert_eq!(
            parse("NEFT-HDFC123456789012-RAVI SHAH"),
            ParsedResult::new("RAVI SHAH", "NEFT-HDFC123456789012", "HDFC Bank")
        );
    }

    #[test]
    fn test_clg_scenario() {
        assert_eq!(
            parse("CLG/RAMESH KUMAR/123456/HDF"),
            ParsedResult::new("RAMESH KUMAR", "CLG-123456", "HDFC Bank")
        );
    }

    #[test]
    fn test_mmt_scenario_bank_from_tail_only() {
        assert_eq!(
            parse("MMT/IMPS/123456789012/SBI/SURESH PATEL"),
            ParsedResult::new("SURESH PATEL", "IMPS-123456789012", UNKNOWN)
        );
    }

    #[test]
    fn test_cms_scenario() {
        assert_eq!(
            parse("CMS/REF_12345/OTHERDATA"),
            ParsedResult::new(UNKNOWN, "CMS-REF_12345", UNKNOWN)
        );
    }

    #[test]
    fn test_empty_remark_scenario() {
        let parser = RemarkParser::default();
        assert_eq!(parser.compose(None), ParsedResult::empty());
        assert_eq!(parser.compose(Some("")), ParsedResult::empty());
    }

    #[test]
    fn test_blank_remark_is_supplied_but_unknown() {
        let parser = RemarkParser::default();
        assert_eq!(parser.compose(Some("   \t ")), ParsedResult::unknown());
        assert_eq!(parser.parse("   \t "), ParsedResult::unknown());
        assert_eq!(parser.parse_with_dialect(" ").0, Dialect::Unknown);
    }

    #[test]
    fn test_unmarked_remark_is_unknown() {
        let parser = RemarkParser::default();
        let (dialect, result) = parser.parse_with_dialect("TRF FROM SAVINGS HDFC");
        assert_eq!(dialect, Dialect::Unknown);
        assert_eq!(result, ParsedResult::unknown());
    }

    #[test]
    fn test_whitespace_is_normalized_before_dispatch() {
        assert_eq!(
            parse("  NEFT-HDFC123456789012-RAVI \t  SHAH  "),
            ParsedResult::new("RAVI SHAH", "NEFT-HDFC123456789012", "HDFC Bank")
        );
    }

    #[test]
    fn test_pure_and_never_absent() {
        let parser = RemarkParser::default();
        let remarks = [
            "UPI/123456789012/John Doe/Payment for goods/john@ybl",
            "RTGS-X",
            "BIL/",
            "MMT/",
            "CLG/",
            "CMS/",
            "random text",
        ];
        for remark in remarks {
            let first = parser.parse(remark);
            assert_eq!(parser.parse(remark), first);
            for field in first.columns() {
                assert!(!field.is_empty(), "empty field for {:?}", remark);
            }
        }
    }

    #[test]
    fn test_custom_carrier_codes() {
        let config = ParserConfig::default()
            .with_bil_carrier_codes(vec!["EKW".to_string(), "EJW".to_string()]);
        let parser = RemarkParser::new(BankIdentifier::default(), config).unwrap();
        assert_eq!(
            parser.parse("BIL/INFT/EJW7654321/ELEC/SUNITA").transaction_id,
            "INFT-EJW7654321"
        );
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RemarkParser>();

        let parser = RemarkParser::default();
        let results: Vec<ParsedResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| parser.parse("CLG/RAMESH KUMAR/123456/HDF")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|r| r.bank == "HDFC Bank"));
    }
}
