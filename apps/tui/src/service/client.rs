use crate::domain::{DashboardSummary, MapPoint};
use crate::service::error::ServiceError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Thin HTTP wrapper over the telemetry API.
///
/// Every call is a single GET. There is no retry, caching or timeout here; callers
/// decide what to do with failures.
#[derive(Debug, Clone)]
pub struct MapService {
    http: reqwest::Client,
    base_url: String,
}

impl MapService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ServiceError> {
        self.get_json(format!("{}/summary", self.base_url)).await
    }

    pub async fn all_map_data(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<MapPoint>, ServiceError> {
        self.get_json(all_map_data_url(&self.base_url, from, to))
            .await
    }

    /// Shark detail payload; its shape is not interpreted.
    pub async fn shark_detail(&self, shark_id: &str) -> Result<Value, ServiceError> {
        self.get_json(format!("{}/shark/{shark_id}", self.base_url))
            .await
    }

    pub async fn latest_tags(&self) -> Result<Vec<Value>, ServiceError> {
        self.get_json(format!("{}/latest-tags", self.base_url))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ServiceError> {
        debug!(%url, "GET");
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(ServiceError::Request { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match response.json::<T>().await {
            Ok(body) => Ok(body),
            Err(source) => Err(ServiceError::Decode { url, source }),
        }
    }
}

/// Builds the `/all-map-data` URL. Only the bounds that are present end up in the
/// query string.
pub fn all_map_data_url(base_url: &str, from: Option<&str>, to: Option<&str>) -> String {
    let mut url = format!("{}/all-map-data", base_url.trim_end_matches('/'));

    let params = [("from", from), ("to", to)]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| format!("{key}={v}")))
        .collect::<Vec<_>>();

    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }

    url
}
