//! Positional extraction over the real-time report markup.
//!
//! The report is a plain HTML table of settlement intervals with the newest
//! row appended last. There is no schema to negotiate: the extraction leans
//! on the fixed 17-column row shape and fails hard when that shape breaks.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

/// Fixed row shape: 1 date cell + 1 time cell + 15 zone price cells.
pub const ROW_WIDTH: usize = 17;

static LAST_UPDATED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Last Updated: ([^<\n]+)").unwrap());
static CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<td[^>]*>([^<]+)</td>").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The document no longer looks like the price table. No recovery is
    /// possible here short of updating the extraction itself.
    #[error("malformed report: found {found} table cells, need at least {ROW_WIDTH}")]
    MalformedSource { found: usize },
}

/// The most recent settlement interval row.
#[derive(Debug)]
pub struct LatestRow {
    /// Raw date cell, `MM/DD/YYYY`. Not validated.
    pub date: String,

    /// Raw interval-time cell, `HHMM`. Not validated.
    pub time: String,

    /// The 15 raw price cells, ordered by [`crate::zone::Zone::column`] minus 2.
    pub prices: Vec<String>,

    /// The operator's `Last Updated` caption, when present.
    pub last_updated: Option<String>,
}

/// Pull the newest row and the update caption out of the report markup.
///
/// All table cells in the document are scanned in order and the final
/// [`ROW_WIDTH`] of them are taken as the newest row. A missing caption is
/// tolerated; a short cell count is not.
pub fn extract_latest_row(html: &str) -> Result<LatestRow, ScrapeError> {
    let last_updated =
        LAST_UPDATED.captures(html).and_then(|captures| captures.get(1)).map(|capture| capture.as_str().trim().to_string());
    let cells = CELL
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|capture| capture.as_str().trim())
        .collect_vec();
    if cells.len() < ROW_WIDTH {
        return Err(ScrapeError::MalformedSource { found: cells.len() });
    }
    let row = &cells[cells.len() - ROW_WIDTH..];
    Ok(LatestRow {
        date: row[0].to_string(),
        time: row[1].to_string(),
        prices: row[2..].iter().map(ToString::to_string).collect(),
        last_updated,
    })
}
