//! Login, logout and user account operations
//!
//! Authentication sits outside the store: the shell logs in before the
//! store starts, and every later request picks the token up from the
//! shared TokenStore.

use std::sync::Arc;

use serde_json::json;

use stockpile_core::prelude::*;
use stockpile_core::types::{Credentials, LoginResponse, User};

use crate::client::{with_segment, ApiClient};

const LOGIN_LINK: &str = "login";
const USER_LINK: &str = "user";

/// Account operations against the API server.
pub struct UserClient {
    client: Arc<ApiClient>,
}

impl UserClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token and persist it.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = self.client.url_for(LOGIN_LINK)?;
        let response: LoginResponse = self.client.post_json(url, credentials).await?;
        self.client.tokens.set(&response.id_token)?;
        info!("logged in as {}", credentials.email);
        Ok(())
    }

    /// Drop the stored token. Purely local; the server keeps no session.
    pub fn logout(&self) -> Result<()> {
        self.client.tokens.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Whether a token is currently stored.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.client.tokens.get(), Ok(Some(_)))
    }

    /// The account the stored token belongs to.
    pub async fn current_user(&self) -> Result<User> {
        let url = self.client.url_for(USER_LINK)?;
        self.client.get_json(url).await
    }

    /// Update the account's profile fields.
    pub async fn edit_user(&self, user: &User) -> Result<User> {
        let url = self.client.url_for(USER_LINK)?;
        self.client.put_json(url, user).await
    }

    /// Change the account password. The server rejects a wrong old password
    /// with a message body.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let url = with_segment(self.client.url_for(USER_LINK)?, "password")?;
        let body = json!({
            "oldPassword": old_password,
            "newPassword": new_password,
        });
        self.client.put_no_content(url, &body).await
    }
}
