mod cost;
mod energy;
mod rate;

pub use self::{
    cost::Usd,
    energy::KilowattHours,
    rate::{CentsPerKilowattHour, KilowattHourRate, MegawattHourRate},
};
