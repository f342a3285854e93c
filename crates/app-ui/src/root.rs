//! Root navigator and auth gate
//!
//! Decides which top-level surface is mounted and performs the stack
//! resets around auth transitions. Login and logout both replace the
//! entire history: there is no back path across the gate.

use crate::navigation::{Navigator, Route};

/// Top-level surface of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootScreen {
    /// First-run carousel
    Onboarding,
    /// Login / signup / recovery stack
    Auth,
    /// The signed-in app
    MainApp,
}

impl Route {
    /// Which top-level surface this route belongs to
    pub fn root_screen(&self) -> RootScreen {
        match self {
            Route::Onboarding => RootScreen::Onboarding,
            Route::Login | Route::Signup | Route::ForgotPassword => RootScreen::Auth,
            _ => RootScreen::MainApp,
        }
    }
}

/// Gate between the auth stack and the signed-in app
pub struct AuthGate {
    navigator: Navigator,
}

impl AuthGate {
    /// Gate over the given navigator
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    /// The route to mount at cold start
    pub fn initial_route(onboarded: bool, signed_in: bool) -> Route {
        if !onboarded {
            Route::Onboarding
        } else if signed_in {
            Route::Home
        } else {
            Route::Login
        }
    }

    /// Onboarding finished: move to login without keeping the carousel
    /// on the back stack
    pub fn complete_onboarding(&self) {
        self.navigator.replace(Route::Login);
    }

    /// Sign-in succeeded: the auth stack is unreachable from here on
    pub fn login_succeeded(&self) {
        tracing::info!("auth gate: entering main app");
        self.navigator.reset(vec![Route::Home], 0);
    }

    /// Sign-out: the main app is unreachable from here on
    pub fn logout(&self) {
        tracing::info!("auth gate: returning to login");
        self.navigator.reset(vec![Route::Login], 0);
    }

    /// The underlying navigator
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_route_selection() {
        assert_eq!(AuthGate::initial_route(false, false), Route::Onboarding);
        assert_eq!(AuthGate::initial_route(false, true), Route::Onboarding);
        assert_eq!(AuthGate::initial_route(true, false), Route::Login);
        assert_eq!(AuthGate::initial_route(true, true), Route::Home);
    }

    #[test]
    fn test_login_reset_makes_auth_unreachable() {
        let navigator = Navigator::new(Route::Login);
        navigator.navigate(Route::Signup);
        let gate = AuthGate::new(navigator.clone());

        gate.login_succeeded();

        assert_eq!(navigator.current(), Route::Home);
        assert!(!navigator.can_go_back());
        // Back is a no-op at the new root.
        navigator.go_back();
        assert_eq!(navigator.current(), Route::Home);
    }

    #[test]
    fn test_logout_reset_makes_main_app_unreachable() {
        let navigator = Navigator::new(Route::Home);
        navigator.navigate(Route::Profile);
        let gate = AuthGate::new(navigator.clone());

        gate.logout();

        assert_eq!(navigator.current(), Route::Login);
        assert!(!navigator.can_go_back());
    }

    #[test]
    fn test_onboarding_replaced_not_stacked() {
        let navigator = Navigator::new(Route::Onboarding);
        let gate = AuthGate::new(navigator.clone());

        gate.complete_onboarding();

        assert_eq!(navigator.current(), Route::Login);
        assert_eq!(navigator.depth(), 1);
    }

    #[test]
    fn test_root_screen_classification() {
        assert_eq!(Route::Onboarding.root_screen(), RootScreen::Onboarding);
        assert_eq!(Route::Signup.root_screen(), RootScreen::Auth);
        assert_eq!(Route::WardrobeList.root_screen(), RootScreen::MainApp);
    }
}
