//! ASA carriage-control report rendering
//!
//! The first character of every line is a carriage-control code:
//! '1' skips to a new page, ' ' single spaces, '0' double spaces.
//! Each page opens with a header block; a new page starts after
//! `page_length` detail lines.

use super::layout::{fmt_comma, LineBuffer};
use crate::consolidation::ReportLine;
use crate::error::{ReportError, Result};
use crate::record::AmountIndicator;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Default detail lines per page
pub const DEFAULT_PAGE_LENGTH: usize = 55;

const AMTIND_COL: usize = 22;
const AMOUNT_END_COL: usize = 50;
const PAGE_END_COL: usize = 80;

/// Carriage-control codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsaControl {
    NewPage,
    Single,
    Double,
}

impl AsaControl {
    pub fn as_char(&self) -> char {
        match self {
            AsaControl::NewPage => '1',
            AsaControl::Single => ' ',
            AsaControl::Double => '0',
        }
    }
}

/// Text printed at the top of every page
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub bank_name: String,
    pub report_id: String,
    pub title: String,
    pub report_date: NaiveDate,
}

/// Builds a paginated ASA text report line by line
#[derive(Debug)]
pub struct AsaReport<'a> {
    header: &'a ReportHeader,
    page_length: usize,
    page: u32,
    lines_on_page: usize,
    out: String,
}

impl<'a> AsaReport<'a> {
    pub fn new(header: &'a ReportHeader, page_length: usize) -> Result<Self> {
        if page_length == 0 {
            return Err(ReportError::InvalidConfig("page length must be at least 1".to_string()));
        }
        Ok(Self {
            header,
            page_length,
            page: 0,
            lines_on_page: 0,
            out: String::new(),
        })
    }

    fn emit(&mut self, control: AsaControl, line: &LineBuffer) {
        self.out.push(control.as_char());
        self.out.push_str(&line.render());
        self.out.push('\n');
    }

    fn start_page(&mut self) {
        self.page += 1;
        self.lines_on_page = 0;

        let mut line = LineBuffer::new();
        line.place(1, &self.header.bank_name)
            .place_right(PAGE_END_COL, &format!("PAGE {:>5}", self.page));
        self.emit(AsaControl::NewPage, &line);

        let mut line = LineBuffer::new();
        line.place(1, &format!("REPORT ID : {}", self.header.report_id));
        self.emit(AsaControl::Single, &line);

        let mut line = LineBuffer::new();
        line.place(
            1,
            &format!("{} AS AT {}", self.header.title, self.header.report_date.format("%d/%m/%Y")),
        );
        self.emit(AsaControl::Single, &line);

        let mut line = LineBuffer::new();
        line.place(1, "BNM CODE")
            .place(AMTIND_COL - 2, "AMTIND")
            .place_right(AMOUNT_END_COL, "AMOUNT");
        self.emit(AsaControl::Double, &line);

        let mut line = LineBuffer::new();
        line.place(1, &"-".repeat(14))
            .place(AMTIND_COL - 2, &"-".repeat(6))
            .place_right(AMOUNT_END_COL, &"-".repeat(24));
        self.emit(AsaControl::Single, &line);
    }

    /// Add one detail line, breaking to a new page when the current one is full
    pub fn push_detail(&mut self, line: &LineBuffer) {
        if self.page == 0 || self.lines_on_page == self.page_length {
            self.start_page();
        }
        self.emit(AsaControl::Single, line);
        self.lines_on_page += 1;
    }

    pub fn pages(&self) -> u32 {
        self.page
    }

    /// Finish the report; an empty report still gets one page of headings
    pub fn finish(mut self) -> String {
        if self.page == 0 {
            self.start_page();
        }
        self.out
    }
}

fn detail_line(label: &str, amtind: AmountIndicator, amount: Decimal) -> LineBuffer {
    let mut line = LineBuffer::new();
    line.place(1, label)
        .place(AMTIND_COL, &amtind.to_string())
        .place_right(AMOUNT_END_COL, &fmt_comma(amount, 2));
    line
}

/// Render sorted report lines followed by one TOTAL line per amount indicator
pub fn render_report(header: &ReportHeader, lines: &[ReportLine], page_length: usize) -> Result<String> {
    let mut report = AsaReport::new(header, page_length)?;

    let mut totals: BTreeMap<AmountIndicator, Decimal> = BTreeMap::new();
    for line in lines {
        let total = totals.entry(line.amtind).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(line.amount)
            .ok_or_else(|| ReportError::Overflow(format!("{} report total", line.amtind)))?;
    }

    for line in lines {
        report.push_detail(&detail_line(line.bnm_code.as_str(), line.amtind, line.amount));
    }
    for (amtind, total) in totals {
        report.push_detail(&detail_line("TOTAL", amtind, total));
    }

    Ok(report.finish())
}

/// Number of pages in rendered ASA text
pub fn count_pages(text: &str) -> usize {
    text.lines()
        .filter(|l| l.starts_with(AsaControl::NewPage.as_char()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidation::BnmCode;

    fn header() -> ReportHeader {
        ReportHeader {
            bank_name: "PUBLIC BANK BERHAD".to_string(),
            report_id: "BNMRDAL".to_string(),
            title: "REPORT ON DOMESTIC ASSETS AND LIABILITIES".to_string(),
            report_date: NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
        }
    }

    fn lines(n: usize) -> Vec<ReportLine> {
        (0..n)
            .map(|i| ReportLine {
                bnm_code: BnmCode::parse(&format!("42120{:02}000000Y", i % 100)).unwrap(),
                amtind: AmountIndicator::D,
                amount: Decimal::from(i as i64 * 1000),
            })
            .collect()
    }

    #[test]
    fn test_header_block() {
        let text = render_report(&header(), &lines(1), 10).unwrap();
        let out: Vec<&str> = text.lines().collect();

        assert!(out[0].starts_with("1PUBLIC BANK BERHAD"));
        assert!(out[0].ends_with("PAGE     1"));
        assert_eq!(out[0].chars().count(), 1 + PAGE_END_COL);
        assert_eq!(out[1], " REPORT ID : BNMRDAL");
        assert_eq!(out[2], " REPORT ON DOMESTIC ASSETS AND LIABILITIES AS AT 30/09/2026");
        assert!(out[3].starts_with("0BNM CODE"));
        assert!(out[4].starts_with(" --------------"));
    }

    #[test]
    fn test_detail_line_columns() {
        let text = render_report(&header(), &lines(2), 10).unwrap();
        let out: Vec<&str> = text.lines().collect();

        let detail = out[6];
        assert!(detail.starts_with(" 4212001000000Y"));
        let chars: Vec<char> = detail.chars().collect();
        assert_eq!(chars[AMTIND_COL], 'D');
        assert_eq!(chars.len(), 1 + AMOUNT_END_COL);
        assert!(detail.ends_with("1,000.00"));

        let total = out[7];
        assert!(total.starts_with(" TOTAL"));
        assert!(total.ends_with("1,000.00"));
    }

    #[test]
    fn test_pagination() {
        // 5 detail lines + 1 total line at 2 per page -> 3 pages
        let text = render_report(&header(), &lines(5), 2).unwrap();
        let out: Vec<&str> = text.lines().collect();

        let page_starts: Vec<usize> = out
            .iter()
            .enumerate()
            .filter(|(_, l)| l.starts_with('1'))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(page_starts, vec![0, 7, 14]);
        assert_eq!(count_pages(&text), 3);
        assert!(out[14].ends_with("PAGE     3"));
        assert_eq!(out.len(), 14 + 5 + 2);

        for line in &out {
            let control = line.chars().next().unwrap();
            assert!(matches!(control, '1' | ' ' | '0'));
        }
    }

    #[test]
    fn test_exact_page_fill_has_no_blank_page() {
        // 3 details + 1 total = 4 lines at 4 per page -> 1 page
        let text = render_report(&header(), &lines(3), 4).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with('1')).count(), 1);
    }

    #[test]
    fn test_empty_report_has_headings() {
        let text = render_report(&header(), &[], 55).unwrap();
        let out: Vec<&str> = text.lines().collect();
        assert_eq!(out.len(), 5);
        assert!(out[0].starts_with('1'));
    }

    #[test]
    fn test_zero_page_length_rejected() {
        assert!(matches!(
            render_report(&header(), &lines(1), 0),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let mut big = lines(2);
        for line in big.iter_mut() {
            line.amount = Decimal::MAX;
        }
        assert!(matches!(
            render_report(&header(), &big, 55),
            Err(ReportError::Overflow(_))
        ));
    }
}
