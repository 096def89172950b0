mod client;
mod ercot;
mod home_assistant;

pub use self::{
    ercot::{Api as Ercot, REPORT_URL},
    home_assistant::{Api as HomeAssistant, ExportReader},
};
