//! Blocking HTTP plumbing shared by the remote sources.
//!
//! Both Aladhan and equran.id wrap their payload in a `{code, data}` envelope;
//! anything other than `code == 200` with non-empty `data` counts as the
//! upstream having nothing for us.

use log::warn;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::{ServiceError, ServiceResult};

const USER_AGENT: &str = concat!("muslim-daily/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout_secs: u64) -> anyhow::Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// GET `url` with `query` and decode the envelope's `data` into `T`.
pub fn get_envelope<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> ServiceResult<T> {
    let response = client.get(url).query(query).send().map_err(|e| {
        warn!("Request to {} failed: {}", url, e);
        ServiceError::upstream(format!("Request to {} failed: {}", url, e))
    })?;

    let status = response.status();
    let body = response.text().map_err(|e| {
        warn!("Reading body from {} failed: {}", url, e);
        ServiceError::upstream(format!("Reading body from {} failed: {}", url, e))
    })?;

    if !status.is_success() {
        warn!("{} answered HTTP {}", url, status);
        return Err(ServiceError::upstream(format!(
            "{} answered HTTP {}",
            url, status
        )));
    }

    parse_envelope(&body).inspect_err(|e| warn!("Bad payload from {}: {}", url, e))
}

pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> ServiceResult<T> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ServiceError::upstream(format!("Response is not JSON: {}", e)))?;

    let code = value.get("code").and_then(Value::as_u64);
    if code != Some(200) {
        return Err(ServiceError::upstream(format!(
            "Upstream returned code {:?}",
            code
        )));
    }

    let data = match value.get("data") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(Value::Object(fields)) if fields.is_empty() => None,
        Some(data) => Some(data.clone()),
    }
    .ok_or_else(|| ServiceError::upstream("Upstream returned no data"))?;

    serde_json::from_value(data)
        .map_err(|e| ServiceError::upstream(format!("Unexpected response shape: {}", e)))
}
