//! BNM code values

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item code for the loans-by-state breakdown
pub const STATE_BREAKDOWN_ITEM: &str = "34600";
/// Item code for impaired (NPL) loans
pub const IMPAIRED_ITEM: &str = "34700";
/// Customer code slot used for the non-resident total
pub const NON_RESIDENT_TOTAL: &str = "80";

/// A 14 character regulatory line-item code:
/// item(5) + customer(2) + qualifier(1) + "00000" + "Y"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BnmCode(String);

impl BnmCode {
    pub const LEN: usize = 14;

    pub fn compose(item: &str, customer: &str, qualifier: char) -> Result<Self> {
        Self::parse(&format!("{}{}{}00000Y", item, customer, qualifier))
    }

    pub fn parse(code: &str) -> Result<Self> {
        let bytes = code.as_bytes();
        let valid = bytes.len() == Self::LEN
            && bytes[..7].iter().all(u8::is_ascii_digit)
            && (bytes[7].is_ascii_digit() || bytes[7].is_ascii_uppercase())
            && &code[8..] == "00000Y";
        if valid {
            Ok(BnmCode(code.to_string()))
        } else {
            Err(ReportError::InvalidCode(code.to_string()))
        }
    }

    pub fn item(&self) -> &str {
        &self.0[..5]
    }

    pub fn customer(&self) -> &str {
        &self.0[5..7]
    }

    pub fn qualifier(&self) -> char {
        self.0.as_bytes()[7] as char
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BnmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BnmCode {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self> {
        BnmCode::parse(&value)
    }
}

impl From<BnmCode> for String {
    fn from(code: BnmCode) -> Self {
        code.0
    }
}

/// Why a code was emitted for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeKind {
    /// The record's own line item; these reconcile to the input balances
    Primary,
    /// Loans-by-state breakdown
    StateBreakdown,
    /// Non-resident total across foreign customer groups
    NonResidentTotal,
    /// Impaired loans
    Impaired,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeKind::Primary => "primary",
            CodeKind::StateBreakdown => "state breakdown",
            CodeKind::NonResidentTotal => "non-resident total",
            CodeKind::Impaired => "impaired",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        let code = BnmCode::compose("42120", "77", '0').unwrap();
        assert_eq!(code.as_str(), "4212077000000Y");
        assert_eq!(code.item(), "42120");
        assert_eq!(code.customer(), "77");
        assert_eq!(code.qualifier(), '0');

        let by_state = BnmCode::compose(STATE_BREAKDOWN_ITEM, "41", 'J').unwrap();
        assert_eq!(by_state.as_str(), "3460041J00000Y");
        assert_eq!(by_state.qualifier(), 'J');
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(BnmCode::parse("").is_err());
        assert!(BnmCode::parse("4212077000000").is_err());
        assert!(BnmCode::parse("4212077000000N").is_err());
        assert!(BnmCode::parse("42120AB000000Y").is_err());
        assert!(BnmCode::parse("4212077j00000Y").is_err());
        assert!(BnmCode::compose("4212", "77", '0').is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let code = BnmCode::compose("34111", "46", '0').unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"3411146000000Y\"");
        let back: BnmCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<BnmCode>("\"bad\"").is_err());
    }
}
