//! Remark dialects and prefix dispatch.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Settlement-rail remark dialects, selected by a literal prefix marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// Cash management service collections.
    Cms,
    /// Unified Payments Interface.
    Upi,
    /// National Electronic Funds Transfer.
    Neft,
    /// Real Time Gross Settlement.
    Rtgs,
    /// Cheque clearing.
    Clg,
    /// Mobile money transfer (IMPS).
    Mmt,
    /// Bill / internet fund transfer.
    Bil,
    /// No marker matched.
    Unknown,
}

impl Dialect {
    /// Dialects with a marker, in dispatch order.
    pub const MARKED: [Dialect; 7] = [
        Dialect::Cms,
        Dialect::Upi,
        Dialect::Neft,
        Dialect::Rtgs,
        Dialect::Clg,
        Dialect::Mmt,
        Dialect::Bil,
    ];

    /// Select the dialect of a normalized remark: first marker in
    /// [`MARKED`](Self::MARKED) order that prefixes it, else `Unknown`.
    pub fn detect(remark: &str) -> Self {
        Self::MARKED
            .into_iter()
            .find(|dialect| dialect.marker().is_some_and(|m| remark.starts_with(m)))
            .unwrap_or(Dialect::Unknown)
    }

    /// Literal prefix that selects this dialect.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Dialect::Cms => Some("CMS/"),
            Dialect::Upi => Some("UPI/"),
            Dialect::Neft => Some("NEFT-"),
            Dialect::Rtgs => Some("RTGS-"),
            Dialect::Clg => Some("CLG/"),
            Dialect::Mmt => Some("MMT/"),
            Dialect::Bil => Some("BIL/"),
            Dialect::Unknown => None,
        }
    }

    /// Segment delimiter.
    pub fn delimiter(&self) -> char {
        match self {
            Dialect::Neft | Dialect::Rtgs => '-',
            _ => '/',
        }
    }

    /// Split a remark on this dialect's delimiter, dropping empty segments.
    pub fn segments<'a>(&self, remark: &'a str) -> Vec<&'a str> {
        remark
            .split(self.delimiter())
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Short uppercase code.
    pub fn code(&self) -> &'static str {
        match self {
            Dialect::Cms => "CMS",
            Dialect::Upi => "UPI",
            Dialect::Neft => "NEFT",
            Dialect::Rtgs => "RTGS",
            Dialect::Clg => "CLG",
            Dialect::Mmt => "MMT",
            Dialect::Bil => "BIL",
            Dialect::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "CMS" => Ok(Dialect::Cms),
            "UPI" => Ok(Dialect::Upi),
            "NEFT" => Ok(Dialect::Neft),
            "RTGS" => Ok(Dialect::Rtgs),
            "CLG" => Ok(Dialect::Clg),
            "MMT" | "IMPS" => Ok(Dialect::Mmt),
            "BIL" => Ok(Dialect::Bil),
            "UNKNOWN" => Ok(Dialect::Unknown),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}
