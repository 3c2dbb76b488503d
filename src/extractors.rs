//! Per-dialect field extraction.
//!
//! Each extractor receives a normalized remark already known to carry its
//! dialect's marker. Missing segments and failed identifier checks degrade
//! to `UNKNOWN`; nothing here can fail.

use crate::bank::BankIdentifier;
use crate::config::NameFilter;
use crate::dialect::Dialect;
use crate::types::{ParsedResult, UNKNOWN};
use once_cell::sync::Lazy;
use regex::Regex;

static UPI_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{12}").unwrap());

/// NEFT identifier lengths accepted as valid UTR numbers.
const NEFT_ID_LENGTHS: [usize; 3] = [16, 18, 22];
const RTGS_MIN_ID_LENGTH: usize = 22;
const CLG_ID_LENGTH: usize = 6;
const IMPS_ID_LENGTH: usize = 12;
const IFSC_BANK_CODE_LENGTH: usize = 4;
/// UPI fallback identifiers must be longer than this.
const UPI_MIN_FALLBACK_ID_LENGTH: usize = 10;

/// Borrowed view of the configuration the extractors consult.
pub(crate) struct Extractors<'a> {
    pub banks: &'a BankIdentifier,
    pub name_filter: &'a NameFilter,
    pub bil_id: &'a Regex,
}

impl Extractors<'_> {
    /// Run the extractor for `dialect` over a normalized remark.
    pub fn extract(&self, dialect: Dialect, remark: &str) -> ParsedResult {
        let mut result = match dialect {
            Dialect::Cms => self.cms(remark),
            Dialect::Upi => self.upi(remark),
            Dialect::Neft => self.neft(remark),
            Dialect::Rtgs => self.rtgs(remark),
            Dialect::Clg => self.clg(remark),
            Dialect::Mmt => self.mmt(remark),
            Dialect::Bil => self.bil(remark),
            Dialect::Unknown => ParsedResult::unknown(),
        };

        result.name = match result.name.trim() {
            "" => UNKNOWN.to_string(),
            name => name.to_string(),
        };
        result
    }

    fn cms(&self, remark: &str) -> ParsedResult {
        let transaction_id = remark
            .split('/')
            .find(|part| part.contains('_'))
            .map(|part| prefixed("CMS", part))
            .unwrap_or_else(|| UNKNOWN.to_string());

        ParsedResult::new(UNKNOWN, transaction_id, self.banks.identify(Some(remark)))
    }

    fn upi(&self, remark: &str) -> ParsedResult {
        let segments = Dialect::Upi.segments(remark);
        let parts = segments.get(1..).unwrap_or_default();

        let name = parts
            .iter()
            .find(|part| {
                part.contains(' ')
                    && !part.chars().any(|c| c.is_ascii_digit())
                    && !part.contains('@')
                    && !self.name_filter.is_denied(part)
            })
            .map(|part| part.trim().to_string())
            .or_else(|| {
                parts
                    .iter()
                    .find(|part| part.contains('@'))
                    .and_then(|vpa| vpa.split('@').next())
                    .map(|handle| handle.trim().to_string())
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        let transaction_id = match UPI_REFERENCE.find(remark) {
            Some(m) => prefixed("UPI", m.as_str()),
            None => match parts.last() {
                Some(last) if char_len(last) > UPI_MIN_FALLBACK_ID_LENGTH => prefixed("UPI", last),
                _ => UNKNOWN.to_string(),
            },
        };

        ParsedResult::new(name, transaction_id, self.banks.identify(Some(remark)))
    }

    fn neft(&self, remark: &str) -> ParsedResult {
        let parts = Dialect::Neft.segments(remark);
        let id = segment(&parts, 1).unwrap_or("");
        let transaction_id = if NEFT_ID_LENGTHS.contains(&char_len(id)) {
            prefixed("NEFT", id)
        } else {
            UNKNOWN.to_string()
        };

        ParsedResult::new(
            segment(&parts, 2).unwrap_or(UNKNOWN),
            transaction_id,
            self.bank_from_ifsc(id, remark),
        )
    }

    fn rtgs(&self, remark: &str) -> ParsedResult {
        let parts = Dialect::Rtgs.segments(remark);
        let id = segment(&parts, 1).unwrap_or("");
        let transaction_id = if char_len(id) >= RTGS_MIN_ID_LENGTH {
            prefixed("RTGS", id)
        } else {
            UNKNOWN.to_string()
        };

        ParsedResult::new(
            segment(&parts, 2).unwrap_or(UNKNOWN),
            transaction_id,
            self.bank_from_ifsc(id, remark),
        )
    }

    fn clg(&self, remark: &str) -> ParsedResult {
        let parts = Dialect::Clg.segments(remark);
        let id = segment(&parts, 2).unwrap_or("");
        let transaction_id = if char_len(id) == CLG_ID_LENGTH {
            prefixed("CLG", id)
        } else {
            UNKNOWN.to_string()
        };

        ParsedResult::new(
            segment(&parts, 1).unwrap_or(UNKNOWN),
            transaction_id,
            self.bank_or_remark(segment(&parts, 3), remark),
        )
    }

    fn mmt(&self, remark: &str) -> ParsedResult {
        let parts = Dialect::Mmt.segments(remark);
        let id = segment(&parts, 2).unwrap_or("");
        let transaction_id = if remark.contains("IMPS")
            && id.len() == IMPS_ID_LENGTH
            && id.bytes().all(|b| b.is_ascii_digit())
        {
            prefixed("IMPS", id)
        } else {
            UNKNOWN.to_string()
        };

        // Only the trailing segment is inspected, which is usually the payer
        // name rather than a bank marker.
        let tail = match remark.rsplit_once('/') {
            Some((_, tail)) if !tail.is_empty() => tail,
            _ => remark,
        };

        ParsedResult::new(
            trailing_name(&parts),
            transaction_id,
            self.banks.identify(Some(tail)),
        )
    }

    fn bil(&self, remark: &str) -> ParsedResult {
        let parts = Dialect::Bil.segments(remark);
        let id = segment(&parts, 2).unwrap_or("");
        let transaction_id = if self.bil_id.is_match(id) {
            prefixed("INFT", id)
        } else {
            UNKNOWN.to_string()
        };

        ParsedResult::new(
            trailing_name(&parts),
            transaction_id,
            self.banks.identify(Some(remark)),
        )
    }

    /// Bank from the IFSC code leading an identifier, else from the remark.
    fn bank_from_ifsc(&self, id: &str, remark: &str) -> String {
        let ifsc = (char_len(id) >= IFSC_BANK_CODE_LENGTH).then(|| {
            let end = id
                .char_indices()
                .nth(IFSC_BANK_CODE_LENGTH)
                .map(|(i, _)| i)
                .unwrap_or(id.len());
            &id[..end]
        });
        self.bank_or_remark(ifsc, remark)
    }

    fn bank_or_remark(&self, snippet: Option<&str>, remark: &str) -> String {
        snippet
            .and_then(|s| self.banks.find(s))
            .unwrap_or_else(|| self.banks.identify(Some(remark)))
            .to_string()
    }
}

fn segment<'a>(parts: &[&'a str], index: usize) -> Option<&'a str> {
    parts.get(index).copied()
}

/// Fifth segment, else fourth, else `UNKNOWN`.
fn trailing_name<'a>(parts: &[&'a str]) -> &'a str {
    segment(parts, 4)
        .or_else(|| segment(parts, 3))
        .unwrap_or(UNKNOWN)
}

fn prefixed(prefix: &str, id: &str) -> String {
    format!("{}-{}", prefix, id)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
