//! Profile screen state
//!
//! A read model assembled from the session and the wardrobe; sign-out
//! itself lives in [`crate::auth`] and the navigation reset in the app-ui
//! auth gate.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{AuthError, AuthService};
use crate::wardrobe::Wardrobe;

/// Errors that can occur building the profile view
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Viewing the profile requires a session
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Wardrobe stats could not be loaded
    #[error(transparent)]
    Wardrobe(#[from] crate::wardrobe::WardrobeError),
}

/// Summary shown at the top of the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name from the session
    pub display_name: String,
    /// Account email
    pub email: String,
    /// Items currently in the wardrobe
    pub wardrobe_count: usize,
}

/// Profile read-model flow
#[derive(Clone)]
pub struct ProfileFlow {
    auth: Arc<AuthService>,
    wardrobe: Wardrobe,
}

impl ProfileFlow {
    /// Flow over the auth service and wardrobe
    pub fn new(auth: Arc<AuthService>, wardrobe: Wardrobe) -> Self {
        Self { auth, wardrobe }
    }

    /// Assemble the profile summary for the signed-in user
    pub async fn profile(&self) -> Result<UserProfile, ProfileError> {
        let session = self
            .auth
            .current_session()
            .await
            .ok_or(AuthError::NoSession)?;
        let wardrobe_count = self.wardrobe.list_items().await?.len();

        Ok(UserProfile {
            display_name: session.display_name,
            email: session.email,
            wardrobe_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::wardrobe::{seed_items, WardrobeItem};
    use std::time::Duration;
    use storage::MemoryStore;

    async fn flow() -> ProfileFlow {
        let auth = Arc::new(AuthService::with_delay(Duration::from_millis(0)));
        let store: Arc<MemoryStore<WardrobeItem>> =
            Arc::new(MemoryStore::seeded(seed_items()).await.unwrap());
        ProfileFlow::new(auth, Wardrobe::new(store))
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let flow = flow().await;
        let err = flow.profile().await.unwrap_err();
        assert!(matches!(err, ProfileError::Auth(AuthError::NoSession)));
    }

    #[tokio::test]
    async fn test_profile_summarizes_session_and_wardrobe() {
        let flow = flow().await;
        flow.auth
            .sign_in(&Credentials {
                email: "test@smartvazi.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        let profile = flow.profile().await.unwrap();
        assert_eq!(profile.email, "test@smartvazi.com");
        assert_eq!(profile.wardrobe_count, 6);
    }
}
