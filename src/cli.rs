use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::{self, ExportReader, REPORT_URL},
    prelude::*,
    zone::Zone,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll the report on an interval and publish the derived values.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Run a single fetch-parse-derive cycle and print the result.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// List the known pricing zones and their report columns.
    #[clap(name = "zones")]
    Zones,
}

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    pub report: ReportArgs,

    /// Polling interval in seconds. The report itself updates every five
    /// minutes.
    #[clap(long = "interval-secs", default_value = "300", env = "POLL_INTERVAL_SECS")]
    pub interval_secs: u64,

    #[clap(flatten)]
    pub export: ExportArgs,
}

impl WatchArgs {
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(flatten)]
    pub report: ReportArgs,

    /// Print the reading and derived values as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// ERCOT pricing zone, for example `LZ_NORTH` or `HB_BUSAVG`.
    /// Unknown codes fall back to `LZ_NORTH` with a warning.
    #[clap(long, default_value = "LZ_NORTH", env = "ERCOT_ZONE", value_parser = Zone::parse)]
    pub zone: Zone,

    /// Percentage of the settlement price credited for exported energy.
    /// Tesla Electric, for example, credits 90.
    #[clap(
        long = "sellback-percent",
        default_value = "90",
        env = "SELLBACK_PERCENT",
        value_parser = clap::value_parser!(u8).range(1..=100),
    )]
    pub sellback_percent: u8,

    /// Report URL override.
    #[clap(long = "report-url", default_value = REPORT_URL, env = "ERCOT_REPORT_URL")]
    pub url: Url,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Entity id of the cumulative grid-export energy sensor.
    /// Enables the earnings accumulator.
    #[clap(long = "export-entity-id", env = "EXPORT_ENTITY_ID")]
    pub entity_id: Option<String>,

    /// Home Assistant API access token.
    #[clap(long = "home-assistant-access-token", env = "HOME_ASSISTANT_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// Home Assistant API base URL. For example: `http://localhost:8123/api`.
    #[clap(long = "home-assistant-api-base-url", env = "HOME_ASSISTANT_API_BASE_URL")]
    pub base_url: Option<Url>,
}

impl ExportArgs {
    /// Bind the export sensor, when one is configured at all.
    pub fn try_into_reader(self) -> Result<Option<ExportReader>> {
        let Some(entity_id) = self.entity_id else {
            return Ok(None);
        };
        let access_token =
            self.access_token.context("the export sensor requires `--home-assistant-access-token`")?;
        let base_url =
            self.base_url.context("the export sensor requires `--home-assistant-api-base-url`")?;
        let api = api::HomeAssistant::try_new(&access_token, base_url)?;
        Ok(Some(ExportReader::new(api, entity_id)))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_sellback_percent_range() {
        assert!(Args::try_parse_from(["armadillo", "fetch", "--sellback-percent", "0"]).is_err());
        assert!(Args::try_parse_from(["armadillo", "fetch", "--sellback-percent", "101"]).is_err());
        assert!(Args::try_parse_from(["armadillo", "fetch", "--sellback-percent", "100"]).is_ok());
    }

    #[test]
    fn test_zone_parses_official_codes() {
        let args = Args::try_parse_from(["armadillo", "fetch", "--zone", "HB_BUSAVG"]).unwrap();
        match args.command {
            Command::Fetch(args) => assert_eq!(args.report.zone, Zone::HbBusAvg),
            _ => panic!("expected the fetch command"),
        }
    }

    #[test]
    fn test_unknown_zone_falls_back_to_default() {
        let args = Args::try_parse_from(["armadillo", "fetch", "--zone", "LZ_NOWHERE"]).unwrap();
        match args.command {
            Command::Fetch(args) => assert_eq!(args.report.zone, Zone::LzNorth),
            _ => panic!("expected the fetch command"),
        }
    }
}
