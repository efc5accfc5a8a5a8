//! Fixed-width line layout and amount formatting

use rust_decimal::{Decimal, RoundingStrategy};

/// A fixed-width print line built by placing text at 1-based columns
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    chars: Vec<char>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` starting at column `col` (1-based), overwriting what is there
    pub fn place(&mut self, col: usize, text: &str) -> &mut Self {
        let start = col.max(1) - 1;
        for (offset, ch) in text.chars().enumerate() {
            let pos = start + offset;
            if pos >= self.chars.len() {
                self.chars.resize(pos + 1, ' ');
            }
            self.chars[pos] = ch;
        }
        self
    }

    /// Write `text` so that its last character lands on column `end_col`
    pub fn place_right(&mut self, end_col: usize, text: &str) -> &mut Self {
        let len = text.chars().count();
        let col = (end_col + 1).saturating_sub(len).max(1);
        self.place(col, text)
    }

    /// The line without trailing blanks
    pub fn render(&self) -> String {
        let line: String = self.chars.iter().collect();
        line.trim_end().to_string()
    }
}

/// Format an amount with thousands separators and a fixed number of decimals,
/// rounding half away from zero: 1234567.895 -> "1,234,567.90"
pub fn fmt_comma(amount: Decimal, decimals: u32) -> String {
    let mut rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
