use std::collections::HashSet;

use crate::config::SecurityConfig;
use crate::models::User;

/// Scheme prefix accepted in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from an `Authorization` header value.
///
/// The header must start with exactly `"Bearer "`. The token is the segment
/// after the first space, up to the next one. Returns `None` for a missing
/// prefix or an empty token.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let header = header?;
    if !header.starts_with(BEARER_PREFIX) {
        return None;
    }

    header.split(' ').nth(1).filter(|token| !token.is_empty())
}

/// Decides which identities may see every service request
#[derive(Debug, Clone, Default)]
pub struct PrivilegePolicy {
    emails: HashSet<String>,
    role: Option<String>,
}

impl PrivilegePolicy {
    pub fn new<I, S>(emails: I, role: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
            role,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            config.privileged_emails.iter().cloned(),
            config.privileged_role.clone(),
        )
    }

    /// Exact, case-sensitive email match, or a matching `app_metadata.role`
    pub fn is_privileged(&self, user: &User) -> bool {
        if let Some(email) = user.email.as_deref() {
            if self.emails.contains(email) {
                return true;
            }
        }

        match (&self.role, user.role()) {
            (Some(required), Some(actual)) => required == actual,
            _ => false,
        }
    }
}
