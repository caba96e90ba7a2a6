//! REST client for the scrims backend.
//!
//! Every response passes through [`decode`], which parses into a typed value
//! and then runs [`Validate`] on it, so views never see half-formed data.

pub mod admin;
pub mod auth;
pub mod dropzone;
mod error;
pub mod lobby;
pub mod types;

pub use error::ApiError;

use gloo::net::http::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use types::Validate;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self { base: base.into(), token }
    }

    pub fn url(&self, path: &str) -> String {
        let base = self.base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn builder(&self, method: Method, path: &str, auth: bool) -> Result<RequestBuilder, ApiError> {
        let mut builder = RequestBuilder::new(&self.url(path)).method(method);
        if auth {
            let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        Ok(builder)
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        auth: bool,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let builder = self.builder(method, path, auth)?;
        let request = match body {
            Some(b) => builder.json(b)?,
            None => builder.build()?,
        };
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !response.ok() {
            return Err(ApiError::from_status(status, &text));
        }
        Ok(text)
    }

    /// Public GET.
    pub async fn get<T: DeserializeOwned + Validate>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute(Method::GET, path, false, None::<&()>).await?;
        decode(&text)
    }

    /// GET with the bearer token.
    pub async fn get_auth<T: DeserializeOwned + Validate>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute(Method::GET, path, true, None::<&()>).await?;
        decode(&text)
    }

    /// Unauthenticated JSON request (login/register).
    pub async fn send_public<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned + Validate,
    {
        let text = self.execute(method, path, false, Some(body)).await?;
        decode(&text)
    }

    /// Authenticated mutation; the response body is not inspected.
    pub async fn send<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(method, path, true, Some(body)).await.map(|_| ())
    }

    /// Authenticated mutation without a body.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.execute(method, path, true, None::<&()>).await.map(|_| ())
    }
}

pub(crate) fn decode<T: DeserializeOwned + Validate>(text: &str) -> Result<T, ApiError> {
    let body = if text.trim().is_empty() { "null" } else { text };
    let value: T = serde_json::from_str(body)?;
    value.validate().map_err(ApiError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{LobbyDetails, SummaryRow};

    #[test]
    fn url_joins_base_and_path() {
        let c = ApiClient::new("/api/", None);
        assert_eq!(c.url("/lobbies/3/details"), "/api/lobbies/3/details");
        assert_eq!(c.url("auth/account"), "/api/auth/account");
        let c = ApiClient::new("https://scrims.example", None);
        assert_eq!(c.url("/games/9/results"), "https://scrims.example/games/9/results");
    }

    #[test]
    fn decode_validates_after_parsing() {
        let ok: LobbyDetails = decode(r#"{"id":1,"name":"Friday","code":"ABC123"}"#).unwrap();
        assert_eq!(ok.code, "ABC123");
        let err = decode::<LobbyDetails>(r#"{"id":1,"name":"Friday","code":""}"#).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = decode::<Vec<SummaryRow>>(r#"{"rows":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
