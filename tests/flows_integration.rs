//! End-to-end flow tests across the workspace crates
//!
//! Exercises the auth gate, wardrobe browsing, marketplace pagination,
//! and outfit generation the way the app shell drives them.

use std::sync::Arc;
use std::time::Duration;

use vazi::app_core::auth::{AuthService, Credentials, SignupForm};
use vazi::app_core::marketplace::MockListingFetcher;
use vazi::app_core::stylist::{ModestyLevel, StyleMeFlow, Stylist};
use vazi::app_core::wardrobe::{seed_items, Category, Wardrobe, WardrobePageFetcher};
use vazi::app_state::{AsyncStatus, Paginator, RunOutcome};
use vazi::app_ui::{AuthGate, Navigator, Route};
use vazi::storage::MemoryStore;

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn test_cold_start_through_login_and_logout() {
    let navigator = Navigator::new(AuthGate::initial_route(false, false));
    assert_eq!(navigator.current(), Route::Onboarding);

    let gate = AuthGate::new(navigator.clone());
    gate.complete_onboarding();
    assert_eq!(navigator.current(), Route::Login);
    assert!(!navigator.can_go_back());

    let auth = AuthService::with_delay(Duration::ZERO);

    // Wrong password: no session, no navigation.
    let bad = Credentials {
        email: "test@smartvazi.com".to_string(),
        password: "wrong".to_string(),
    };
    assert!(auth.sign_in(&bad).await.is_err());
    assert!(auth.current_session().await.is_none());
    assert_eq!(navigator.current(), Route::Login);

    // Seeded test account succeeds and resets the stack.
    let good = Credentials {
        email: "test@smartvazi.com".to_string(),
        password: "password".to_string(),
    };
    let session = auth.sign_in(&good).await.unwrap();
    assert_eq!(session.email, "test@smartvazi.com");
    gate.login_succeeded();
    assert_eq!(navigator.current(), Route::Home);
    assert!(!navigator.can_go_back());

    // Logout is symmetric: back to login, main app unreachable.
    auth.sign_out().await;
    gate.logout();
    assert!(auth.current_session().await.is_none());
    assert_eq!(navigator.current(), Route::Login);
    assert!(!navigator.can_go_back());
}

#[tokio::test]
async fn test_signup_validation_blocks_submission() {
    let auth = AuthService::with_delay(Duration::ZERO);

    let form = SignupForm {
        full_name: "New User".to_string(),
        email: "new@smartvazi.com".to_string(),
        password: "longenough".to_string(),
        confirm_password: "different".to_string(),
        agreed_to_terms: true,
    };
    let err = auth.sign_up(&form).await.unwrap_err();
    assert_eq!(err.to_error_info().message, "Passwords do not match.");

    // A valid form creates a usable account.
    let form = SignupForm {
        confirm_password: "longenough".to_string(),
        ..form
    };
    let session = auth.sign_up(&form).await.unwrap();
    assert_eq!(session.display_name, "New User");
}

// =============================================================================
// Wardrobe
// =============================================================================

#[tokio::test]
async fn test_wardrobe_crud_and_pagination() {
    let store = Arc::new(MemoryStore::seeded(seed_items()).await.unwrap());
    let wardrobe = Wardrobe::new(store.clone());

    // Seeded data is visible and addressable.
    let items = wardrobe.list_items().await.unwrap();
    assert_eq!(items.len(), 6);
    let first = wardrobe.get_item("wd1").await.unwrap();

    // Wear tracking updates in place.
    let worn = wardrobe.mark_worn("wd1").await.unwrap();
    assert_eq!(worn.wear_count, first.wear_count + 1);

    // Pagination over the same store, filtered by category.
    let paginator = Paginator::new(Arc::new(WardrobePageFetcher::new(store)));
    assert_eq!(
        paginator.set_category(Some(Category::Tops.to_string())).await,
        RunOutcome::Applied
    );
    let state = paginator.state();
    assert_eq!(state.status, AsyncStatus::Success);
    let tops = state.data.unwrap();
    assert!(tops.iter().all(|item| item.category == Category::Tops));
    assert!(!state.has_more);
}

// =============================================================================
// Marketplace
// =============================================================================

#[tokio::test]
async fn test_marketplace_browse_search_and_load_more() {
    let paginator = Paginator::new(Arc::new(MockListingFetcher::new()));

    // Initial page fills one screen and leaves more behind.
    assert_eq!(paginator.load_initial().await, RunOutcome::Applied);
    let state = paginator.state();
    assert_eq!(state.data.as_ref().unwrap().len(), 6);
    assert!(state.has_more);

    // Narrowing the search restarts from page one.
    assert_eq!(
        paginator.set_search(Some("jacket".to_string())).await,
        RunOutcome::Applied
    );
    let state = paginator.state();
    assert_eq!(state.page, 1);
    assert_eq!(state.data.as_ref().unwrap().len(), 6);
    assert!(state.has_more);

    // Second page completes the 8 matches; a third request is a no-op.
    assert_eq!(paginator.load_more().await, RunOutcome::Applied);
    let state = paginator.state();
    assert_eq!(state.data.as_ref().unwrap().len(), 8);
    assert!(!state.has_more);
    assert_eq!(paginator.load_more().await, RunOutcome::Ignored);

    // Re-applying identical filters does not refetch.
    assert_eq!(
        paginator.set_search(Some("jacket".to_string())).await,
        RunOutcome::Ignored
    );
}

// =============================================================================
// Stylist
// =============================================================================

#[tokio::test]
async fn test_style_me_generation_happy_path() {
    let flow = StyleMeFlow::new(Arc::new(Stylist::with_delay(Duration::ZERO)));

    // Missing occasion blocks generation without touching state.
    assert_eq!(flow.generate().await, RunOutcome::Ignored);
    assert_eq!(flow.state().status, AsyncStatus::Idle);

    flow.set_occasion("Dinner party");
    flow.toggle_color("Coral");
    flow.set_modesty(ModestyLevel::Expressive);

    assert_eq!(flow.generate().await, RunOutcome::Applied);
    let state = flow.state();
    assert_eq!(state.status, AsyncStatus::Success);
    let outfits = state.data.unwrap();
    assert_eq!(outfits.len(), 2);
    assert_eq!(outfits[0].name, "Chic Conference Look");
}
