use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};

use crate::auth::TokenProvider;
use crate::{Credentials, Error};

/// Single GET attempt against the API, authenticated with a bearer token
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    tokens: TokenProvider,
}

impl HttpTransport {
    pub fn new(authority: &str, credentials: &Credentials, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("fabric-analytics"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            tokens: TokenProvider::new(client.clone(), authority, credentials),
            client,
        })
    }

    pub async fn get(&self, url: Url) -> Result<String, Error> {
        let token = self.tokens.token().await?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate();
        }

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
