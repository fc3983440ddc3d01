//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep auth state as simple data so callers can store/clear it without side effects.
//! - Treat blank tokens as unauthenticated.
//! - Leave header transport to the API client to keep core DOM-free.

use terracasa_api_models::{AuthResponse, User};

/// Signed-in user plus the bearer token issued for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// Cached user profile.
    pub user: User,
}

impl Session {
    /// Whether the token is usable.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Active authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No session.
    #[default]
    Anonymous,
    /// A restored or freshly issued session.
    SignedIn(Session),
}

impl AuthState {
    /// State for an optional session; sessions without credentials count as anonymous.
    #[must_use]
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(session) if session.has_credentials() => Self::SignedIn(session),
            _ => Self::Anonymous,
        }
    }

    #[must_use]
    /// Whether this auth state carries a usable token.
    pub fn has_credentials(&self) -> bool {
        self.session().is_some_and(Session::has_credentials)
    }

    /// Session when signed in.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::Anonymous => None,
        }
    }

    /// Signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(|session| &session.user)
    }

    /// Bearer token when signed in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().map(|session| session.token.as_str())
    }
}

/// `Authorization` header value for a token; blank tokens produce no header.
#[must_use]
pub fn bearer_header(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: User {
                id: "u1".to_string(),
                email: "ana@example.com".to_string(),
                ..User::default()
            },
        }
    }

    #[test]
    fn blank_tokens_are_anonymous() {
        assert_eq!(AuthState::from_session(Some(session("  "))), AuthState::Anonymous);
        assert_eq!(AuthState::from_session(None), AuthState::Anonymous);
        let state = AuthState::from_session(Some(session("abc")));
        assert!(state.has_credentials());
        assert_eq!(state.token(), Some("abc"));
        assert_eq!(state.user().map(|user| user.id.as_str()), Some("u1"));
    }

    #[test]
    fn bearer_header_requires_token() {
        assert_eq!(bearer_header(""), None);
        assert_eq!(bearer_header(" t0k "), Some("Bearer t0k".to_string()));
    }
}
