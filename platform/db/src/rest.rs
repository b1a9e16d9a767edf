use async_trait::async_trait;
use products_directory::EmployeeRecord;
use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::Deserialize;

use crate::{EmployeeSource, SourceError};

/// Location and anon key of the hosted service's REST interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestSettings {
    pub base_url: String,
    pub api_key: String,
}

/// Reads `employees` through the service's PostgREST endpoint, which applies
/// the caller's row-level policies.
#[derive(Clone, Debug)]
pub struct RestEmployeeSource {
    client: Client,
    url: String,
    api_key: String,
}

impl RestEmployeeSource {
    pub fn new(settings: RestSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: RestSettings) -> Self {
        let url = format!(
            "{}/rest/v1/employees?select=*&order=id.asc",
            settings.base_url.trim_end_matches('/')
        );
        Self {
            client,
            url,
            api_key: settings.api_key,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    message: String,
}

fn service_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ServiceErrorBody>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| status.to_string())
}

#[async_trait]
impl EmployeeSource for RestEmployeeSource {
    fn kind(&self) -> &'static str {
        "rest"
    }

    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(SourceError::Service {
                status: status.as_u16(),
                message: service_message(status, &body),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
