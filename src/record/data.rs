//! Balance record structures matching the account extract format

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency / book indicator carried on every balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AmountIndicator {
    /// Ringgit, conventional book
    D,
    /// Islamic book
    I,
    /// Foreign currency
    F,
}

impl AmountIndicator {
    pub fn as_char(&self) -> char {
        match self {
            AmountIndicator::D => 'D',
            AmountIndicator::I => 'I',
            AmountIndicator::F => 'F',
        }
    }
}

impl FromStr for AmountIndicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" => Ok(AmountIndicator::D),
            "I" => Ok(AmountIndicator::I),
            "F" => Ok(AmountIndicator::F),
            other => Err(format!("unknown amount indicator {:?}", other)),
        }
    }
}

impl fmt::Display for AmountIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One account balance from a deposit, loan, hire-purchase, fixed deposit or NPL extract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Account number
    pub acctno: u64,

    /// Owning branch
    pub branch: u16,

    /// Product code
    pub product: u16,

    /// Raw two-digit customer code
    pub custcd: String,

    /// Raw state code (numeric branch state or state letter)
    pub statecd: String,

    /// Currency / book indicator
    pub amtind: AmountIndicator,

    /// Current balance
    pub balance: Decimal,

    /// Flagged in the NPL book
    #[serde(default)]
    pub npl: bool,
}

impl BalanceRecord {
    /// Create a performing record; codes are normalised the same way the loader does
    pub fn new(
        acctno: u64,
        product: u16,
        custcd: &str,
        statecd: &str,
        amtind: AmountIndicator,
        balance: Decimal,
    ) -> Self {
        Self {
            acctno,
            branch: 0,
            product,
            custcd: normalize_code(custcd),
            statecd: normalize_code(statecd),
            amtind,
            balance,
            npl: false,
        }
    }

    pub fn with_npl(mut self, npl: bool) -> Self {
        self.npl = npl;
        self
    }

    pub fn with_branch(mut self, branch: u16) -> Self {
        self.branch = branch;
        self
    }
}

/// Trim and left-pad single digit codes ("7" -> "07"); letters pass through upper-cased
pub(crate) fn normalize_code(raw: &str) -> String {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 1 && code.as_bytes()[0].is_ascii_digit() {
        format!("0{}", code)
    } else {
        code
    }
}
