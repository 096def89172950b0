use reqwest::{
    Client,
    ClientBuilder,
    Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::Deserialize;

use crate::{prelude::*, quantity::KilowattHours};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(access_token: &str, base_url: Url) -> Result<Self> {
        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&format!("Bearer {access_token}"))?,
        )]);
        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    /// Read a cumulative energy sensor.
    ///
    /// Returns [`None`] while the entity is still `unknown` or `unavailable`.
    #[instrument(skip_all, fields(entity_id = entity_id), name = "Reading the export sensor…")]
    pub async fn get_energy_state(&self, entity_id: &str) -> Result<Option<KilowattHours>> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().map_err(|()| anyhow!("invalid base URL"))?.push("states").push(entity_id);
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<EntityState>()
            .await
            .context("failed to deserialize the entity state")?
            .into_energy()
    }
}

/// One bound export counter: the sensor entity and the API to read it from.
pub struct ExportReader {
    api: Api,
    entity_id: String,
}

impl ExportReader {
    pub const fn new(api: Api, entity_id: String) -> Self {
        Self { api, entity_id }
    }

    pub async fn read(&self) -> Result<Option<KilowattHours>> {
        self.api.get_energy_state(&self.entity_id).await
    }
}

#[must_use]
#[derive(Deserialize)]
struct EntityState {
    state: String,
}

impl EntityState {
    fn into_energy(self) -> Result<Option<KilowattHours>> {
        match self.state.as_str() {
            "unknown" | "unavailable" => Ok(None),
            value => value
                .parse()
                .map(Some)
                .with_context(|| format!("unexpected sensor state {value:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_state_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "sensor.grid_export_energy",
                "state": "39775.108",
                "attributes": {},
                "last_changed": "2025-10-01T17:08:40.326747+00:00",
                "last_updated": "2025-10-01T17:08:40.326747+00:00"
            }
        "#;
        let state = serde_json::from_str::<EntityState>(RESPONSE)?;
        assert_eq!(state.into_energy()?, Some(KilowattHours(39775.108)));
        Ok(())
    }

    #[test]
    fn test_unavailable_state_is_none() -> Result {
        for sentinel in ["unknown", "unavailable"] {
            let state = EntityState { state: sentinel.to_string() };
            assert_eq!(state.into_energy()?, None);
        }
        Ok(())
    }

    #[test]
    fn test_garbage_state_fails() {
        let state = EntityState { state: "off".to_string() };
        assert!(state.into_energy().is_err());
    }
}
