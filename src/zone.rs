use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
};

use serde::Serialize;

use crate::prelude::*;

/// ERCOT settlement pricing locations: seven trading hubs and eight load zones.
///
/// Residential and small commercial contracts typically settle on a load zone;
/// the hub columns exist in the same report and are selectable all the same.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Zone {
    #[serde(rename = "HB_BUSAVG")]
    HbBusAvg,

    #[serde(rename = "HB_HOUSTON")]
    HbHouston,

    #[serde(rename = "HB_HUBAVG")]
    HbHubAvg,

    #[serde(rename = "HB_NORTH")]
    HbNorth,

    #[serde(rename = "HB_PAN")]
    HbPan,

    #[serde(rename = "HB_SOUTH")]
    HbSouth,

    #[serde(rename = "HB_WEST")]
    HbWest,

    #[serde(rename = "LZ_AEN")]
    LzAen,

    #[serde(rename = "LZ_CPS")]
    LzCps,

    #[serde(rename = "LZ_HOUSTON")]
    LzHouston,

    #[serde(rename = "LZ_LCRA")]
    LzLcra,

    /// The most common residential zone, and the fallback for unknown codes.
    #[default]
    #[serde(rename = "LZ_NORTH")]
    LzNorth,

    #[serde(rename = "LZ_RAYBN")]
    LzRaybn,

    #[serde(rename = "LZ_SOUTH")]
    LzSouth,

    #[serde(rename = "LZ_WEST")]
    LzWest,
}

impl Zone {
    pub const ALL: [Self; 15] = [
        Self::HbBusAvg,
        Self::HbHouston,
        Self::HbHubAvg,
        Self::HbNorth,
        Self::HbPan,
        Self::HbSouth,
        Self::HbWest,
        Self::LzAen,
        Self::LzCps,
        Self::LzHouston,
        Self::LzLcra,
        Self::LzNorth,
        Self::LzRaybn,
        Self::LzSouth,
        Self::LzWest,
    ];

    /// Column of this zone's price within a 17-cell report row.
    ///
    /// Columns 0 and 1 hold the interval date and time; the 15 price columns
    /// follow in the report's fixed order. An off-by-one here serves another
    /// zone's price rather than failing.
    pub const fn column(self) -> usize {
        match self {
            Self::HbBusAvg => 2,
            Self::HbHouston => 3,
            Self::HbHubAvg => 4,
            Self::HbNorth => 5,
            Self::HbPan => 6,
            Self::HbSouth => 7,
            Self::HbWest => 8,
            Self::LzAen => 9,
            Self::LzCps => 10,
            Self::LzHouston => 11,
            Self::LzLcra => 12,
            Self::LzNorth => 13,
            Self::LzRaybn => 14,
            Self::LzSouth => 15,
            Self::LzWest => 16,
        }
    }

    /// Official ERCOT identifier as printed in the report header.
    pub const fn code(self) -> &'static str {
        match self {
            Self::HbBusAvg => "HB_BUSAVG",
            Self::HbHouston => "HB_HOUSTON",
            Self::HbHubAvg => "HB_HUBAVG",
            Self::HbNorth => "HB_NORTH",
            Self::HbPan => "HB_PAN",
            Self::HbSouth => "HB_SOUTH",
            Self::HbWest => "HB_WEST",
            Self::LzAen => "LZ_AEN",
            Self::LzCps => "LZ_CPS",
            Self::LzHouston => "LZ_HOUSTON",
            Self::LzLcra => "LZ_LCRA",
            Self::LzNorth => "LZ_NORTH",
            Self::LzRaybn => "LZ_RAYBN",
            Self::LzSouth => "LZ_SOUTH",
            Self::LzWest => "LZ_WEST",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::HbBusAvg => "Hub bus average",
            Self::HbHouston => "Houston hub",
            Self::HbHubAvg => "Hub average",
            Self::HbNorth => "North hub",
            Self::HbPan => "Panhandle hub",
            Self::HbSouth => "South hub",
            Self::HbWest => "West hub",
            Self::LzAen => "AEP Central load zone",
            Self::LzCps => "CPS Energy load zone",
            Self::LzHouston => "Houston load zone",
            Self::LzLcra => "LCRA load zone",
            Self::LzNorth => "North load zone",
            Self::LzRaybn => "Rayburn load zone",
            Self::LzSouth => "South load zone",
            Self::LzWest => "West load zone",
        }
    }

    /// Resolve an official code, falling back to [`Zone::default`] for codes
    /// this build does not know. The fallback is logged, never silent.
    pub fn resolve(code: &str) -> Self {
        Self::ALL.iter().copied().find(|zone| zone.code() == code).unwrap_or_else(|| {
            warn!(code, fallback = Self::default().code(), "unknown pricing zone code");
            Self::default()
        })
    }

    /// clap value parser. Never fails: unknown codes resolve to the default.
    #[allow(clippy::unnecessary_wraps)]
    pub fn parse(code: &str) -> Result<Self, Infallible> {
        Ok(Self::resolve(code))
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_exact() {
        for (offset, zone) in Zone::ALL.into_iter().enumerate() {
            assert_eq!(zone.column(), offset + 2);
        }
    }

    #[test]
    fn test_resolve_known_code() {
        assert_eq!(Zone::resolve("HB_PAN"), Zone::HbPan);
        assert_eq!(Zone::resolve("LZ_WEST"), Zone::LzWest);
    }

    #[test]
    fn test_resolve_unknown_code_falls_back() {
        assert_eq!(Zone::resolve("LZ_NOWHERE"), Zone::LzNorth);
    }
}
