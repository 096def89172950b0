//! [ERCOT real-time settlement point prices][1] report.
//!
//! [1]: https://www.ercot.com/content/cdr/html/real_time_spp.html

use reqwest::{Client, Url};

use crate::prelude::*;

/// Public report page. A new settlement interval row is appended roughly
/// every five minutes; no authentication or parameters are needed.
pub const REPORT_URL: &str = "https://www.ercot.com/content/cdr/html/real_time_spp.html";

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn try_new(url: Url) -> Result<Self> {
        Ok(Self { client: super::client::try_new()?, url })
    }

    /// Fetch the report body: one request, no retries and no caching.
    ///
    /// Retry policy belongs to the caller's schedule, not here.
    #[instrument(skip_all, name = "Fetching the report…")]
    pub async fn get_report(&self) -> Result<String, reqwest::Error> {
        self.client.get(self.url.clone()).send().await?.error_for_status()?.text().await
    }
}
