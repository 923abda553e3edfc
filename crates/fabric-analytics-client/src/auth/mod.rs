use std::time::Duration;

use fabric_analytics_common::cache::ExpiringCache;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{Credentials, Error};

pub const FABRIC_SCOPE: &str = "https://api.fabric.microsoft.com/.default";

/// Tokens are dropped this long before the authority says they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Client credentials flow against the identity authority. Tokens are reused until
/// they get close to their expiry.
#[derive(Clone)]
pub struct TokenProvider {
    client: Client,
    authority: String,
    credentials: Credentials,

    cache: ExpiringCache<String, String>,
}

impl TokenProvider {
    pub fn new(client: Client, authority: &str, credentials: &Credentials) -> Self {
        Self {
            client,
            authority: authority.trim_end_matches('/').to_string(),
            credentials: credentials.clone(),

            cache: ExpiringCache::new(4, EXPIRY_MARGIN),
        }
    }

    pub async fn token(&self) -> Result<String, Error> {
        if let Some(token) = self.cache.get(&self.credentials.tenant_id) {
            return Ok(token);
        }

        let response = self.request_token().await?;
        self.cache.insert(
            self.credentials.tenant_id.clone(),
            response.access_token.clone(),
            Duration::from_secs(response.expires_in),
        );

        Ok(response.access_token)
    }

    /// Forget the current token, typically after the API rejected it
    pub fn invalidate(&self) {
        self.cache.invalidate(&self.credentials.tenant_id);
    }

    async fn request_token(&self) -> Result<TokenResponse, Error> {
        let url = Url::parse(&format!("{}/{}/oauth2/v2.0/token", self.authority, self.credentials.tenant_id))
            .map_err(|e| Error::URL(e.to_string()))?;

        debug!(authority = %self.authority, "requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", FABRIC_SCOPE),
        ];

        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Authentication(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Error::Authentication(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Authentication(format!("token request error status={}, body={}", status, text)));
        }

        serde_json::from_str::<TokenResponse>(&text).map_err(|e| Error::Authentication(format!("invalid token response: {}", e)))
    }
}
