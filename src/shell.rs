use crate::api::{AuthService, AuthToken};
use crate::core::task::TaskId;

/// Session state decided once at startup. There is no mid-session token
/// refresh; a signed-out user restarts the app after signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated(AuthToken),
    Anonymous,
}

impl AuthState {
    pub async fn resolve<A: AuthService>(auth: &A) -> Self {
        match auth.token().await {
            Some(token) => Self::Authenticated(token),
            None => Self::Anonymous,
        }
    }

    pub fn root_screen(&self) -> RootScreen {
        match self {
            Self::Authenticated(_) => RootScreen::Home,
            Self::Anonymous => RootScreen::SignIn,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Anonymous => None,
        }
    }
}

/// Which screen the window opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootScreen {
    SignIn,
    Home,
}

/// Navigation requests the task list hands to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    EditTask(TaskId),
    NewTask,
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct FixedAuth(Option<AuthToken>);

    #[async_trait]
    impl AuthService for FixedAuth {
        async fn token(&self) -> Option<AuthToken> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn stored_token_opens_home() {
        let state = AuthState::resolve(&FixedAuth(Some("tok-123".to_string()))).await;
        assert_eq!(state, AuthState::Authenticated("tok-123".to_string()));
        assert_eq!(state.root_screen(), RootScreen::Home);
        assert_eq!(state.token(), Some(&"tok-123".to_string()));
    }

    #[tokio::test]
    async fn missing_token_opens_sign_in() {
        let state = AuthState::resolve(&FixedAuth(None)).await;
        assert_eq!(state, AuthState::Anonymous);
        assert_eq!(state.root_screen(), RootScreen::SignIn);
        assert_eq!(state.token(), None);
    }
}
