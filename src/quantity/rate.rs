use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use serde::Serialize;

use crate::quantity::{cost::Usd, energy::KilowattHours};

/// Settlement point price in dollars per megawatt-hour, as published.
///
/// Negative prices do occur when generation outpaces load.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
)]
pub struct MegawattHourRate(pub f64);

impl MegawattHourRate {
    /// Unrounded sellback rate: the configured fraction of the settlement
    /// price, credited per exported kilowatt-hour.
    pub fn sellback_rate(self, sellback_percent: u8) -> KilowattHourRate {
        KilowattHourRate(self.0 / 1000.0 * f64::from(sellback_percent) / 100.0)
    }
}

impl Display for MegawattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} $/MWh", self.0)
    }
}

/// Rate in dollars per kilowatt-hour.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
)]
pub struct KilowattHourRate(pub f64);

impl Mul<KilowattHours> for KilowattHourRate {
    type Output = Usd;

    fn mul(self, energy: KilowattHours) -> Usd {
        Usd(self.0 * energy.0)
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5} $/kWh", self.0)
    }
}

/// Rate in cents per kilowatt-hour, the unit utility bills quote.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
)]
pub struct CentsPerKilowattHour(pub f64);

impl Display for CentsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ¢/kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_sellback_rate() {
        assert_abs_diff_eq!(MegawattHourRate(20.0).sellback_rate(90).0, 0.018);
    }

    #[test]
    fn test_rate_times_energy() {
        assert_abs_diff_eq!((KilowattHourRate(0.018) * KilowattHours(50.0)).0, 0.9);
    }
}
