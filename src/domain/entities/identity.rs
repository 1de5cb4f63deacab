//! Request identity resolved by the identity provider.

/// The caller's identity for a single request.
///
/// Transient, derived from the request's bearer token per request and never
/// persisted. `user_id == None` is the anonymous identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub is_admin: bool,
}

impl Identity {
    /// The identity of a request carrying no credentials.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            is_admin: false,
        }
    }

    /// A regular authenticated user.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_admin: false,
        }
    }

    /// An administrator.
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_admin: true,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
