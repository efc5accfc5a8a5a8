//! State codes for the loans-by-state breakdown

use crate::error::{ReportError, Result};
use crate::record::normalize_code;
use std::collections::BTreeMap;

/// Raw state code -> single state letter
#[derive(Debug, Clone)]
pub struct StateTable {
    states: BTreeMap<String, char>,
}

/// Branch state numbers 01..16 in order
const STATE_LETTERS: [char; 16] = [
    'J', // Johor
    'K', // Kedah
    'D', // Kelantan
    'M', // Melaka
    'N', // Negeri Sembilan
    'C', // Pahang
    'P', // Pulau Pinang
    'A', // Perak
    'R', // Perlis
    'B', // Selangor
    'T', // Terengganu
    'S', // Sabah
    'Q', // Sarawak
    'W', // Kuala Lumpur
    'L', // Labuan
    'U', // Putrajaya
];

impl StateTable {
    /// Keys are normalised like record state codes, so "1" and "01" are the same state
    pub fn new(entries: impl IntoIterator<Item = (String, char)>) -> Result<Self> {
        let mut states = BTreeMap::new();
        for (raw, letter) in entries {
            let raw = normalize_code(&raw);
            if raw.is_empty() || !letter.is_ascii_uppercase() {
                return Err(ReportError::table(
                    "state",
                    format!("bad entry {:?} -> {:?}", raw, letter),
                ));
            }
            if states.insert(raw.clone(), letter).is_some() {
                return Err(ReportError::table("state", format!("duplicate code {:?}", raw)));
            }
        }
        Ok(Self { states })
    }

    /// Numeric branch states plus the letters themselves
    pub fn default_table() -> Self {
        let mut states = BTreeMap::new();
        for (i, letter) in STATE_LETTERS.iter().enumerate() {
            states.insert(format!("{:02}", i + 1), *letter);
            states.insert(letter.to_string(), *letter);
        }
        Self { states }
    }

    pub fn lookup(&self, statecd: &str) -> Option<char> {
        self.states.get(statecd).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &char)> {
        self.states.iter()
    }
}
