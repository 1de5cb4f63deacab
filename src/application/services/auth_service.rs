//! Identity provider backed by configured bearer tokens.
//!
//! Credential storage is deliberately out of scope for this core: identity
//! is an opaque capability resolved per request. The concrete provider here
//! is a static token map loaded from configuration, one entry per token in
//! the form `token=user` or `token=user:admin`, comma-separated.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};

use crate::domain::entities::Identity;
use crate::error::AppError;

/// Resolves bearer tokens to identities.
pub struct AuthService {
    tokens: HashMap<String, Identity>,
}

impl AuthService {
    /// Parses a configured token map string.
    ///
    /// Example: `"s3cret=alice,r00t=admin-user:admin"`. An empty spec is
    /// valid and yields a provider that only ever resolves the anonymous
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed entries, duplicate tokens, or an
    /// unknown role suffix.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut tokens = HashMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, subject) = entry
                .split_once('=')
                .with_context(|| format!("token entry '{entry}' is missing '='"))?;

            if token.is_empty() {
                bail!("token entry '{entry}' has an empty token");
            }

            let identity = match subject.split_once(':') {
                None if !subject.is_empty() => Identity::user(subject),
                Some((user, "admin")) if !user.is_empty() => Identity::admin(user),
                _ => bail!("token entry '{entry}' has a malformed subject"),
            };

            if tokens.insert(token.to_string(), identity).is_some() {
                bail!("duplicate token in API_TOKENS");
            }
        }

        Ok(Self { tokens })
    }

    /// Resolves the request's bearer token to an identity.
    ///
    /// No token means the anonymous identity. A token that is present but
    /// unknown is rejected, so a mistyped credential fails loudly instead of
    /// silently downgrading to anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown token.
    pub fn resolve(&self, bearer: Option<&str>) -> Result<Identity, AppError> {
        match bearer {
            None => Ok(Identity::anonymous()),
            Some(token) => self
                .tokens
                .get(token)
                .cloned()
                .ok_or_else(AppError::unauthorized),
        }
    }
}
