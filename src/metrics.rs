//! Displayable values derived from the current reading.
//!
//! Everything here is a pure function of the reading and the static
//! configuration, recomputed on every cycle and never cached. The rounding
//! precisions are user-visible contracts.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    poll::PriceReading,
    prelude::*,
    quantity::{CentsPerKilowattHour, KilowattHourRate, MegawattHourRate, Usd},
    zone::Zone,
};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10.0_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Settlement price in ¢/kWh, rounded to 2 decimals.
pub fn price_cents_per_kwh(price: MegawattHourRate) -> CentsPerKilowattHour {
    CentsPerKilowattHour(round_to(price.0 / 1000.0 * 100.0, 2))
}

/// Sellback rate in $/kWh, rounded to 5 decimals.
pub fn sellback_rate_per_kwh(price: MegawattHourRate, sellback_percent: u8) -> KilowattHourRate {
    KilowattHourRate(round_to(price.sellback_rate(sellback_percent).0, 5))
}

/// Sellback rate in ¢/kWh, rounded to 2 decimals.
pub fn sellback_cents_per_kwh(
    price: MegawattHourRate,
    sellback_percent: u8,
) -> CentsPerKilowattHour {
    CentsPerKilowattHour(round_to(price.sellback_rate(sellback_percent).0 * 100.0, 2))
}

/// The full produced-values surface for one cycle.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub zone: Zone,
    pub price_per_mwh: MegawattHourRate,
    pub last_updated: Option<String>,
    pub date: String,
    pub time: String,
    pub fetched_at: DateTime<Local>,
    pub price_cents_per_kwh: CentsPerKilowattHour,
    pub sellback_rate_per_kwh: KilowattHourRate,
    pub sellback_cents_per_kwh: CentsPerKilowattHour,

    /// Lifetime sellback earnings; absent when no export sensor is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Usd>,
}

impl Snapshot {
    pub fn derive(
        zone: Zone,
        reading: &PriceReading,
        sellback_percent: u8,
        earnings: Option<Usd>,
    ) -> Self {
        Self {
            zone,
            price_per_mwh: reading.price,
            last_updated: reading.last_updated.clone(),
            date: reading.date.clone(),
            time: reading.time.clone(),
            fetched_at: reading.fetched_at,
            price_cents_per_kwh: price_cents_per_kwh(reading.price),
            sellback_rate_per_kwh: sellback_rate_per_kwh(reading.price, sellback_percent),
            sellback_cents_per_kwh: sellback_cents_per_kwh(reading.price, sellback_percent),
            earnings: earnings.map(Usd::round_to_cents),
        }
    }

    /// Push every produced value into the sink under its stable name.
    pub fn publish(&self, sink: &mut dyn MetricSink) {
        sink.record("price_per_mwh", MetricValue::Number(self.price_per_mwh.0));
        if let Some(last_updated) = &self.last_updated {
            sink.record("last_updated", MetricValue::Text(last_updated.clone()));
        }
        sink.record("price_cents_per_kwh", MetricValue::Number(self.price_cents_per_kwh.0));
        sink.record("sellback_rate_per_kwh", MetricValue::Number(self.sellback_rate_per_kwh.0));
        sink.record("sellback_cents_per_kwh", MetricValue::Number(self.sellback_cents_per_kwh.0));
        if let Some(earnings) = self.earnings {
            sink.record("sellback_earnings", MetricValue::Number(earnings.0));
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// A narrow consumer of named produced values.
pub trait MetricSink {
    fn record(&mut self, name: &str, value: MetricValue);
}

/// The built-in sink: one log line per value.
pub struct LogSink;

impl MetricSink for LogSink {
    fn record(&mut self, name: &str, value: MetricValue) {
        match value {
            MetricValue::Number(value) => info!(metric = name, value, "published"),
            MetricValue::Text(value) => info!(metric = name, value = %value, "published"),
        }
    }
}
