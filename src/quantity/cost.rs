use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Monetary amount in dollars.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Sub,
)]
pub struct Usd(pub f64);

impl Usd {
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_abs_diff_eq!(Usd(1.3248).round_to_cents().0, 1.32);
        assert_abs_diff_eq!(Usd(0.899_999_9).round_to_cents().0, 0.9);
    }
}
