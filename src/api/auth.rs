use gloo::net::http::Method;

use super::types::{Account, AccountPatch, Credentials, LoginResponse, Registration};
use super::{ApiClient, ApiError};

pub async fn login(client: &ApiClient, creds: &Credentials) -> Result<LoginResponse, ApiError> {
    client.send_public(Method::POST, "/auth/login", creds).await
}

/// Registers and then logs in with the same credentials.
pub async fn register(client: &ApiClient, reg: &Registration) -> Result<LoginResponse, ApiError> {
    let _: serde_json::Value = client.send_public(Method::POST, "/auth/register", reg).await?;
    let creds = Credentials {
        username: reg.username.clone(),
        password: reg.password.clone(),
    };
    login(client, &creds).await
}

pub async fn account(client: &ApiClient) -> Result<Account, ApiError> {
    client.get_auth("/auth/account").await
}

pub async fn update_account(client: &ApiClient, patch: &AccountPatch) -> Result<(), ApiError> {
    client.send(Method::PATCH, "/auth/account", patch).await
}

pub async fn delete_account(client: &ApiClient) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, "/auth/account").await
}
