//! The cycle runner: a repeating timer around the pipeline, with a cached
//! last-good reading and the earnings state.

use tokio::time::{self, MissedTickBehavior};

use crate::{
    api::{Ercot, ExportReader},
    cli::{FetchArgs, WatchArgs},
    earnings::EarningsAccumulator,
    metrics::{LogSink, MetricSink, Snapshot},
    poll::{Poller, PriceReading, PriceSource},
    prelude::*,
    tables,
    zone::Zone,
};

/// Poll forever, one cycle per tick.
pub async fn run(args: WatchArgs) -> Result {
    let mut interval = time::interval(args.interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let poller = Poller::new(Ercot::try_new(args.report.url.clone())?, args.report.zone);
    let mut watcher = Watcher {
        source: poller,
        zone: args.report.zone,
        sellback_percent: args.report.sellback_percent,
        export: args.export.try_into_reader()?,
        earnings: EarningsAccumulator::default(),
        last_reading: None,
    };
    let mut sink = LogSink;
    loop {
        interval.tick().await;
        watcher.cycle(&mut sink).await;
    }
}

/// Run exactly one cycle and print the snapshot.
pub async fn run_once(args: FetchArgs) -> Result {
    let poller = Poller::new(Ercot::try_new(args.report.url.clone())?, args.report.zone);
    let reading = poller.poll().await?;
    let snapshot = Snapshot::derive(args.report.zone, &reading, args.report.sellback_percent, None);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", tables::build_snapshot_table(&snapshot));
    }
    Ok(())
}

struct Watcher<S> {
    source: S,
    zone: Zone,
    sellback_percent: u8,
    export: Option<ExportReader>,
    earnings: EarningsAccumulator,

    /// Retained across failed cycles so consumers keep seeing the last
    /// successful reading until a cycle succeeds again.
    last_reading: Option<PriceReading>,
}

impl<S: PriceSource> Watcher<S> {
    /// One complete cycle: poll, accumulate, derive, publish.
    ///
    /// Cycle failures are process-nonfatal: the error is logged, the previous
    /// reading stays cached, the earnings state is left untouched, and the
    /// next tick starts fresh.
    async fn cycle(&mut self, sink: &mut dyn MetricSink) {
        match self.source.poll().await {
            Ok(reading) => {
                info!(
                    zone = %self.zone,
                    price = %reading.price,
                    date = %reading.date,
                    time = %reading.time,
                    "fetched the settlement price",
                );
                self.accumulate(&reading).await;
                self.last_reading = Some(reading);
            }
            Err(error) => {
                warn!(
                    error = %error,
                    cached = self.last_reading.is_some(),
                    "cycle failed, keeping the last reading",
                );
            }
        }
        if let Some(reading) = &self.last_reading {
            let earnings = self.export.as_ref().map(|_| self.earnings.total());
            Snapshot::derive(self.zone, reading, self.sellback_percent, earnings).publish(sink);
        }
    }

    /// Credit this cycle's export at the current price, when the sensor is
    /// configured and readable. Anything else skips the update entirely.
    async fn accumulate(&mut self, reading: &PriceReading) {
        let Some(export) = &self.export else {
            return;
        };
        match export.read().await {
            Ok(Some(current_export)) => {
                self.earnings.credit(current_export, reading.price.sellback_rate(self.sellback_percent));
            }
            Ok(None) => {
                debug!("export sensor is unavailable, skipping the accumulation");
            }
            Err(error) => {
                warn!(error = format!("{error:#}"), "failed to read the export sensor, skipping");
            }
        }
    }
}
