//! Fixed-width ASA report rendering and output writers

mod asa;
mod layout;
pub mod writer;

pub use asa::{count_pages, render_report, AsaControl, AsaReport, ReportHeader, DEFAULT_PAGE_LENGTH};
pub use layout::{fmt_comma, LineBuffer};
pub use writer::{write_lines_csv, write_lines_to, write_text};
