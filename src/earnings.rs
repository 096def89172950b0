use crate::{
    prelude::*,
    quantity::{KilowattHourRate, KilowattHours, Usd},
};

/// Lifetime sellback earnings over a cumulative grid-export counter.
///
/// The state lives for the process lifetime only; there is no durable
/// storage and no reset path short of restarting the process.
#[derive(Default)]
pub struct EarningsAccumulator {
    last_export: KilowattHours,
    total: Usd,
}

impl EarningsAccumulator {
    /// Credit the export since the previous reading at the given rate.
    ///
    /// Export counters commonly reset daily or weekly. A drop in the counter
    /// is treated as such a reset: the full current value counts as new
    /// export since the reset, not as a negative correction.
    pub fn credit(&mut self, current_export: KilowattHours, rate: KilowattHourRate) {
        let mut delta = current_export - self.last_export;
        if delta < KilowattHours::ZERO {
            delta = current_export;
        }
        self.total += rate * delta;
        self.last_export = current_export;
        debug!(delta = %delta, total = %self.total, "credited the export");
    }

    /// Lifetime total. The only view of the state offered to readers.
    pub const fn total(&self) -> Usd {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_credit_accumulates() {
        let mut accumulator = EarningsAccumulator::default();
        accumulator.credit(KilowattHours(100.0), KilowattHourRate(0.018));
        accumulator.credit(KilowattHours(150.0), KilowattHourRate(0.018));
        // 100 kWh at the first reading, then a 50 kWh delta.
        assert_abs_diff_eq!(accumulator.total().0, 1.8 + 0.9);
    }

    #[test]
    fn test_counter_reset_credits_current_value() {
        let mut accumulator = EarningsAccumulator::default();
        accumulator.credit(KilowattHours(500.0), KilowattHourRate(0.0));
        accumulator.credit(KilowattHours(10.0), KilowattHourRate(0.018));
        assert_abs_diff_eq!(accumulator.total().0, 10.0 * 0.018);
    }

    #[test]
    fn test_rate_uses_current_cycle_price() {
        let mut accumulator = EarningsAccumulator::default();
        accumulator.credit(KilowattHours(100.0), KilowattHourRate(0.0));
        // The delta is priced at the rate passed in now, not at the rate
        // that was current when the export happened.
        accumulator.credit(KilowattHours(150.0), KilowattHourRate(0.018));
        assert_abs_diff_eq!(accumulator.total().0, 0.9);
    }
}
