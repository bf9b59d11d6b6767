//! One-time admin bootstrap code.
//!
//! When the server starts without any admin user, a code is generated and a login link
//! carrying it is logged. Logging in through that link grants admin to the account. The code
//! lives in memory only, expires after 60 seconds and is consumed by its first use.

use rand::{distr::Alphanumeric, Rng};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const ADMIN_CODE_TTL_SECONDS: u64 = 60;
const ADMIN_CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(ADMIN_CODE_TTL_SECONDS))
    }

    fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a fresh 32 character code, replacing any previous one.
    pub async fn generate(&self) -> String {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ADMIN_CODE_LENGTH)
            .map(char::from)
            .collect();

        *self.code.write().await = Some(AdminCode::new(code.clone(), self.ttl));
        code
    }

    /// Checks `input_code` against the stored code.
    ///
    /// A matching code is consumed. An expired code is dropped and never matches. A wrong
    /// code leaves the stored one in place.
    pub async fn validate_and_consume(&self, input_code: &str) -> bool {
        let mut code = self.code.write().await;

        match code.as_ref() {
            Some(stored) if stored.is_expired() => {
                *code = None;
                false
            }
            Some(stored) if stored.code == input_code => {
                *code = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub async fn has_valid_code(&self) -> bool {
        let mut code = self.code.write().await;

        match code.as_ref() {
            Some(stored) if stored.is_expired() => {
                *code = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    #[cfg(test)]
    pub async fn invalidate(&self) {
        *self.code.write().await = None;
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

/// Login link that redeems `code`.
pub fn admin_login_url(app_url: &str, code: &str) -> String {
    format!(
        "{}/api/auth/login?admin_code={}",
        app_url.trim_end_matches('/'),
        code
    )
}
