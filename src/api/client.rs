use std::time::Duration;

use reqwest::Client;

use crate::prelude::*;

/// Build a default client. The timeout bounds a hanging report fetch.
pub fn try_new() -> Result<Client> {
    Ok(Client::builder().timeout(Duration::from_secs(30)).build()?)
}
