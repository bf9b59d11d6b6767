use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    state::OAuth2Client,
};

const FALLBACK_USERNAME: &str = "meeple";
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 30;
const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Profile returned by the provider's OpenID Connect userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct ProviderProfile {
    /// Stable subject identifier of the user at the provider.
    pub sub: String,
    pub preferred_username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ProviderProfile {
    /// Username derived from the provider's preferred username, the e-mail local part, or
    /// the display name, in that order, reduced to lowercase letters, digits and `_`.
    pub fn username(&self) -> String {
        let email_local = self
            .email
            .as_deref()
            .and_then(|email| email.split('@').next());

        [
            self.preferred_username.as_deref(),
            email_local,
            self.name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(sanitize_username)
        .find(|name| name.len() >= MIN_USERNAME_LENGTH)
        .unwrap_or_else(|| FALLBACK_USERNAME.to_string())
    }

    pub fn display_name(&self) -> String {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.username());

        name.chars().take(MAX_DISPLAY_NAME_LENGTH).collect()
    }
}

fn sanitize_username(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .trim_matches('_')
        .chars()
        .take(MAX_USERNAME_LENGTH)
        .collect()
}

/// OAuth2 authorization-code login against the configured provider.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    pub userinfo_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        userinfo_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            userinfo_url,
        }
    }

    /// Authorization URL and the CSRF token the callback must echo back.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url()
    }

    /// Exchanges the authorization code, fetches the provider profile and upserts the user.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the provider redirect
    /// - `set_admin` - Grant admin; otherwise the stored admin flag is left untouched
    ///
    /// # Returns
    /// - `Ok(User)` - The logged-in user
    /// - `Err(AppError::AuthErr(TokenExchange))` - The provider rejected the code
    /// - `Err(AppError::ReqwestErr)` - Userinfo request failed
    pub async fn callback(
        &self,
        authorization_code: String,
        set_admin: bool,
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let profile = self.fetch_profile(&token).await?;
        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                username: profile.username(),
                display_name: profile.display_name(),
                provider_id: profile.sub,
                is_admin: set_admin.then_some(true),
            })
            .await?;

        if set_admin {
            tracing::info!("User {} has been set as admin", user.username);
        }

        Ok(user)
    }

    async fn fetch_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<ProviderProfile, AppError> {
        let profile = self
            .http_client
            .get(self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<ProviderProfile>()
            .await?;

        Ok(profile)
    }
}
