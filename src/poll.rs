use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    api::Ercot,
    quantity::MegawattHourRate,
    scrape::{self, ScrapeError},
    zone::Zone,
};

/// One complete snapshot of the settlement price for a single zone.
///
/// Built fresh on every successful cycle and superseded wholesale by the
/// next one. The missing caption is the only optional field: everything else
/// is either fully present or the whole cycle has failed.
#[derive(Clone, Debug, Serialize)]
pub struct PriceReading {
    /// Settlement point price.
    pub price: MegawattHourRate,

    /// The operator's `Last Updated` caption, verbatim.
    pub last_updated: Option<String>,

    /// Raw date cell of the source row.
    pub date: String,

    /// Raw interval-time cell of the source row.
    pub time: String,

    /// Local receipt time of this reading.
    pub fetched_at: DateTime<Local>,
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("failed to fetch the report")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    MalformedSource(#[from] ScrapeError),

    #[error("unparsable price cell {cell:?} for {zone}")]
    PriceParse { zone: Zone, cell: String },
}

/// Anything able to produce a fresh [`PriceReading`] or fail trying.
///
/// The schedule driving the polling, and whatever caches the last good
/// reading across failures, live outside this trait.
#[async_trait]
pub trait PriceSource {
    async fn poll(&self) -> Result<PriceReading, PollError>;
}

/// The fetch-extract-parse pipeline for one configured zone.
pub struct Poller {
    api: Ercot,
    zone: Zone,
}

impl Poller {
    pub const fn new(api: Ercot, zone: Zone) -> Self {
        Self { api, zone }
    }

    /// Extract the zone's price from an already fetched report.
    fn read(zone: Zone, html: &str) -> Result<PriceReading, PollError> {
        let row = scrape::extract_latest_row(html)?;
        let cell = &row.prices[zone.column() - 2];
        let price = cell
            .parse::<MegawattHourRate>()
            .map_err(|_| PollError::PriceParse { zone, cell: cell.clone() })?;
        Ok(PriceReading {
            price,
            last_updated: row.last_updated,
            date: row.date,
            time: row.time,
            fetched_at: Local::now(),
        })
    }
}

#[async_trait]
impl PriceSource for Poller {
    async fn poll(&self) -> Result<PriceReading, PollError> {
        let html = self.api.get_report().await?;
        Self::read(self.zone, &html)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;

    /// A minimal report: a caption and exactly one 17-cell row.
    fn report_with_prices(prices: &[&str]) -> String {
        assert_eq!(prices.len(), 15);
        let cells = prices.iter().map(|price| format!("<td>{price}</td>")).join("");
        format!(
            "<html>Last Updated: Oct 01, 2025 10:15<table><tr>\
             <td>10/01/2025</td><td>1015</td>{cells}</tr></table></html>"
        )
    }

    #[test]
    fn test_every_zone_reads_its_own_column() -> Result<(), PollError> {
        // Each price cell carries its own column index, so a wrong offset
        // shows up as a wrong value rather than a parse failure.
        let prices = (2..=16).map(|column| format!("{column}.25")).collect_vec();
        let html = report_with_prices(&prices.iter().map(String::as_str).collect_vec());
        for zone in Zone::ALL {
            let reading = Poller::read(zone, &html)?;
            #[allow(clippy::cast_precision_loss)]
            let expected = zone.column() as f64 + 0.25;
            assert_abs_diff_eq!(reading.price.0, expected);
        }
        Ok(())
    }

    #[test]
    fn test_end_to_end_reading() -> Result<(), PollError> {
        let mut prices = vec!["24.50"; 15];
        prices[Zone::LzNorth.column() - 2] = "14.72";
        let reading = Poller::read(Zone::LzNorth, &report_with_prices(&prices))?;
        assert_abs_diff_eq!(reading.price.0, 14.72);
        assert_eq!(reading.date, "10/01/2025");
        assert_eq!(reading.time, "1015");
        assert_eq!(reading.last_updated.as_deref(), Some("Oct 01, 2025 10:15"));
        Ok(())
    }

    #[test]
    fn test_negative_price_is_a_valid_reading() -> Result<(), PollError> {
        let mut prices = vec!["24.50"; 15];
        prices[Zone::HbWest.column() - 2] = "-8.13";
        let reading = Poller::read(Zone::HbWest, &report_with_prices(&prices))?;
        assert_abs_diff_eq!(reading.price.0, -8.13);
        Ok(())
    }

    #[test]
    fn test_non_numeric_cell_fails() {
        let mut prices = vec!["24.50"; 15];
        prices[Zone::LzHouston.column() - 2] = "N/A";
        match Poller::read(Zone::LzHouston, &report_with_prices(&prices)) {
            Err(PollError::PriceParse { zone, cell }) => {
                assert_eq!(zone, Zone::LzHouston);
                assert_eq!(cell, "N/A");
            }
            other => panic!("expected a price parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_short_report_fails() {
        let result = Poller::read(Zone::LzNorth, "<table><td>10/01/2025</td></table>");
        assert!(matches!(result, Err(PollError::MalformedSource(_))));
    }
}
