//! Application state shared across all request handlers.
//!
//! `AppState` is built once at startup and cloned into every handler through Axum's state
//! extraction. Every field is cheap to clone: the database handle is a pool, the HTTP and
//! OAuth clients are reference counted, and the admin code and change feed share their
//! inner state through `Arc`s.

use std::path::PathBuf;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use super::{
    config::Config,
    service::{admin::AdminCodeService, change_feed::ChangeFeed, storage::StorageService},
};

/// OAuth2 client with the authorization and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// HTTP client for the OAuth provider, configured without redirects.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// One-time code granting admin on login while no admin exists.
    pub admin_code_service: AdminCodeService,

    /// Broadcast of data changes streamed at `/api/changes`.
    pub changes: ChangeFeed,

    /// Root directory of the upload buckets.
    pub storage_dir: PathBuf,
    pub max_upload_bytes: usize,

    /// Base URL of the web app, target of the post-login redirect.
    pub app_url: String,
    pub oauth_userinfo_url: String,
}

impl AppState {
    pub fn new(
        config: &Config,
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        admin_code_service: AdminCodeService,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            admin_code_service,
            changes: ChangeFeed::new(),
            storage_dir: PathBuf::from(&config.storage_dir),
            max_upload_bytes: config.max_upload_bytes,
            app_url: config.app_url.clone(),
            oauth_userinfo_url: config.oauth_userinfo_url.clone(),
        }
    }

    /// Upload storage rooted at the configured directory.
    pub fn storage(&self) -> StorageService<'_> {
        StorageService::new(&self.storage_dir, self.max_upload_bytes)
    }
}
