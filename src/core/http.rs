use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::{ProvisionError, ProvisionResult};

const APP_USER_AGENT: &str = concat!("makemcserver/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}

/// Read-only GET primitive every catalog and download goes through.
///
/// A non-2xx status is an error; callers never see error bodies.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_bytes(&self, url: &str) -> ProvisionResult<Vec<u8>>;
}

#[async_trait]
impl Fetch for Client {
    async fn get_bytes(&self, url: &str) -> ProvisionResult<Vec<u8>> {
        let response = self.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvisionError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("GET {} ({} bytes)", url, bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Fetch `url` and decode the body as JSON.
pub async fn get_json<T: DeserializeOwned>(fetch: &dyn Fetch, url: &str) -> ProvisionResult<T> {
    let bytes = fetch.get_bytes(url).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Fetch `url` and decode the body as XML.
pub async fn get_xml<T: DeserializeOwned>(fetch: &dyn Fetch, url: &str) -> ProvisionResult<T> {
    let bytes = fetch.get_bytes(url).await?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(quick_xml::de::from_str(&text)?)
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory upstream: serves canned bodies by exact URL, 404 otherwise.
    #[derive(Default)]
    pub struct StaticFetch {
        routes: HashMap<String, Vec<u8>>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticFetch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
            self.routes.insert(url.into(), body.into());
            self
        }

        pub fn route_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
            self.route(url, body.to_string())
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().map(|r| r.clone()).unwrap_or_default()
        }

        pub fn was_requested(&self, url: &str) -> bool {
            self.requested().iter().any(|u| u == url)
        }
    }

    #[async_trait]
    impl Fetch for StaticFetch {
        async fn get_bytes(&self, url: &str) -> ProvisionResult<Vec<u8>> {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(url.to_string());
            }
            self.routes
                .get(url)
                .cloned()
                .ok_or_else(|| ProvisionError::DownloadFailed {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }
}
