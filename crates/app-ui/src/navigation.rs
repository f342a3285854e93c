//! Navigation system for Vazi
//!
//! Type-safe routes, the navigation stack, and the serialized navigator.
//! Route parameters are typed payloads owned by the navigating screen and
//! read-only to the destination; the only sanctioned write-back is the
//! merge operation, which updates an existing stack entry instead of
//! pushing a duplicate screen.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use app_core::stylist::{Outfit, StyleCriteria};
use app_state::ItemRef;
use parking_lot::Mutex;
use thiserror::Error;

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application, with their parameter contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    // Entry
    /// First-run carousel
    Onboarding,

    // Auth
    /// Sign-in form
    Login,
    /// Account creation form
    Signup,
    /// Password recovery form
    ForgotPassword,

    // Main app
    /// Landing screen
    Home,
    /// Wardrobe grid
    WardrobeList,
    /// Single wardrobe item
    ItemDetail {
        /// Id of the item to show
        item_id: String,
    },
    /// New item form
    AddItem,
    /// Edit form for an existing item
    EditItem {
        /// Id of the item to edit
        item_id: String,
    },
    /// Full-screen wardrobe picker (selection sub-flow)
    WardrobeSelection {
        /// The caller's selection when the picker opened
        initial_selection: Vec<ItemRef>,
    },
    /// Stylist criteria form
    StyleMe {
        /// Must-include items, written back by the picker via merge
        selected_items: Vec<ItemRef>,
    },
    /// Generated outfit suggestions
    OutfitResults {
        /// The generated outfits
        outfits: Vec<Outfit>,
        /// The criteria that produced them
        criteria: StyleCriteria,
    },
    /// Single outfit on a virtual model
    OutfitVisualizer {
        /// Id of the outfit to render
        outfit_id: String,
    },
    /// Marketplace grid
    MarketplaceHome {
        /// Active search term
        search: Option<String>,
        /// Active category filter
        category: Option<String>,
    },
    /// Single marketplace listing
    ListingDetail {
        /// Id of the listing to show
        listing_id: String,
    },
    /// Account summary and settings
    Profile,

    /// Unknown deep link target
    NotFound,
}

/// Screen identity without parameters
///
/// Merge navigation targets a screen kind: the params differ between the
/// entry on the stack and the merge payload, the kind must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    /// [`Route::Onboarding`]
    Onboarding,
    /// [`Route::Login`]
    Login,
    /// [`Route::Signup`]
    Signup,
    /// [`Route::ForgotPassword`]
    ForgotPassword,
    /// [`Route::Home`]
    Home,
    /// [`Route::WardrobeList`]
    WardrobeList,
    /// [`Route::ItemDetail`]
    ItemDetail,
    /// [`Route::AddItem`]
    AddItem,
    /// [`Route::EditItem`]
    EditItem,
    /// [`Route::WardrobeSelection`]
    WardrobeSelection,
    /// [`Route::StyleMe`]
    StyleMe,
    /// [`Route::OutfitResults`]
    OutfitResults,
    /// [`Route::OutfitVisualizer`]
    OutfitVisualizer,
    /// [`Route::MarketplaceHome`]
    MarketplaceHome,
    /// [`Route::ListingDetail`]
    ListingDetail,
    /// [`Route::Profile`]
    Profile,
    /// [`Route::NotFound`]
    NotFound,
}

impl Route {
    /// The screen kind of this route
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Onboarding => RouteKind::Onboarding,
            Route::Login => RouteKind::Login,
            Route::Signup => RouteKind::Signup,
            Route::ForgotPassword => RouteKind::ForgotPassword,
            Route::Home => RouteKind::Home,
            Route::WardrobeList => RouteKind::WardrobeList,
            Route::ItemDetail { .. } => RouteKind::ItemDetail,
            Route::AddItem => RouteKind::AddItem,
            Route::EditItem { .. } => RouteKind::EditItem,
            Route::WardrobeSelection { .. } => RouteKind::WardrobeSelection,
            Route::StyleMe { .. } => RouteKind::StyleMe,
            Route::OutfitResults { .. } => RouteKind::OutfitResults,
            Route::OutfitVisualizer { .. } => RouteKind::OutfitVisualizer,
            Route::MarketplaceHome { .. } => RouteKind::MarketplaceHome,
            Route::ListingDetail { .. } => RouteKind::ListingDetail,
            Route::Profile => RouteKind::Profile,
            Route::NotFound => RouteKind::NotFound,
        }
    }

    /// Whether this screen sits behind the auth gate
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Route::Onboarding
                | Route::Login
                | Route::Signup
                | Route::ForgotPassword
                | Route::NotFound
        )
    }

    /// Display title for the screen header
    pub fn title(&self) -> &'static str {
        match self {
            Route::Onboarding => "Welcome",
            Route::Login => "Log In",
            Route::Signup => "Create Account",
            Route::ForgotPassword => "Reset Password",
            Route::Home => "Home",
            Route::WardrobeList => "My Wardrobe",
            Route::ItemDetail { .. } => "Item Details",
            Route::AddItem => "Add Item",
            Route::EditItem { .. } => "Edit Item",
            Route::WardrobeSelection { .. } => "Select Items",
            Route::StyleMe { .. } => "Style Me",
            Route::OutfitResults { .. } => "Your Outfits",
            Route::OutfitVisualizer { .. } => "Visualizer",
            Route::MarketplaceHome { .. } => "Marketplace",
            Route::ListingDetail { .. } => "Listing",
            Route::Profile => "Profile",
            Route::NotFound => "Not Found",
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Onboarding
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// Errors raised by navigation contract violations
///
/// These are defects in the calling code, not runtime conditions: the
/// navigator logs them loudly and asserts in debug builds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A merge targeted a screen kind not present on the stack
    #[error("merge target not on stack: {0:?}")]
    MergeTargetMissing(RouteKind),

    /// A reset was issued with no routes
    #[error("reset requires at least one route")]
    EmptyReset,

    /// A reset index pointed outside its route list
    #[error("reset index {index} out of bounds for {len} routes")]
    InvalidResetIndex {
        /// The requested active index
        index: usize,
        /// Number of routes supplied
        len: usize,
    },

    /// A restored stack snapshot carried no entries
    #[error("restored stack has no entries")]
    EmptySnapshot,
}

/// One entry on the navigation stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route and its params
    pub route: Route,
    /// Unique key identifying this screen instance
    pub key: String,
    /// Set when a merge wrote new params that the screen has not read yet
    #[serde(default)]
    pub merge_pending: bool,
}

impl StackEntry {
    /// New entry with a fresh instance key
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
            merge_pending: false,
        }
    }
}

/// Ordered sequence of screen instances, bottom to top
///
/// Never empty; `pop` stops at the root, `reset` validates its input, and
/// deserialization rejects an empty snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StackSnapshot")]
pub struct NavigationStack {
    entries: Vec<StackEntry>,
}

/// Raw wire form of a stack, before the non-empty invariant is checked
#[derive(Deserialize)]
struct StackSnapshot {
    entries: Vec<StackEntry>,
}

impl TryFrom<StackSnapshot> for NavigationStack {
    type Error = NavigationError;

    fn try_from(snapshot: StackSnapshot) -> Result<Self, Self::Error> {
        if snapshot.entries.is_empty() {
            return Err(NavigationError::EmptySnapshot);
        }
        Ok(Self {
            entries: snapshot.entries,
        })
    }
}

impl NavigationStack {
    /// Stack with a single initial route
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![StackEntry::new(initial)],
        }
    }

    /// Push a new screen instance
    pub fn push(&mut self, route: Route) {
        self.entries.push(StackEntry::new(route));
    }

    /// Replace the top screen with a new instance
    pub fn replace(&mut self, route: Route) {
        if let Some(top) = self.entries.last_mut() {
            *top = StackEntry::new(route);
        }
    }

    /// Discard all history and install a fixed route set
    ///
    /// `index` selects the active route; routes above it are not retained
    /// (the active entry is always the top of the stack).
    pub fn reset(&mut self, routes: Vec<Route>, index: usize) -> Result<(), NavigationError> {
        if routes.is_empty() {
            return Err(NavigationError::EmptyReset);
        }
        if index >= routes.len() {
            return Err(NavigationError::InvalidResetIndex {
                index,
                len: routes.len(),
            });
        }
        self.entries = routes
            .into_iter()
            .take(index + 1)
            .map(StackEntry::new)
            .collect();
        Ok(())
    }

    /// Pop the top screen; returns false at the root
    pub fn pop(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Update the params of an existing entry and pop back to it
    ///
    /// The entry keeps its instance key: the destination screen is updated,
    /// not remounted, and no duplicate is pushed. Fails if no entry of the
    /// target kind is on the stack.
    pub fn merge_to(&mut self, route: Route) -> Result<(), NavigationError> {
        let kind = route.kind();
        let Some(pos) = self.entries.iter().rposition(|e| e.route.kind() == kind) else {
            return Err(NavigationError::MergeTargetMissing(kind));
        };
        self.entries[pos].route = route;
        self.entries[pos].merge_pending = true;
        self.entries.truncate(pos + 1);
        Ok(())
    }

    /// The current (top) entry
    pub fn current(&self) -> &StackEntry {
        self.entries.last().expect("stack is never empty")
    }

    /// Consume a pending merge on the current entry
    ///
    /// Returns the merged route exactly once; subsequent calls return
    /// `None` until another merge lands.
    pub fn consume_merge(&mut self) -> Option<Route> {
        let top = self.entries.last_mut().expect("stack is never empty");
        if top.merge_pending {
            top.merge_pending = false;
            Some(top.route.clone())
        } else {
            None
        }
    }

    /// Whether a back navigation is possible
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Number of entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// All entries, bottom to top
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// A navigation mutation
#[derive(Debug, Clone, PartialEq)]
pub enum NavCommand {
    /// Push a new screen
    Navigate(Route),
    /// Replace the current screen
    Replace(Route),
    /// Discard history and install a fixed route set
    Reset {
        /// Routes to install
        routes: Vec<Route>,
        /// Active route index
        index: usize,
    },
    /// Merge params back into an existing entry
    MergeTo(Route),
    /// Pop the current screen
    Back,
}

struct NavigatorInner {
    stack: Mutex<NavigationStack>,
    queue: Mutex<VecDeque<NavCommand>>,
    draining: AtomicBool,
}

/// Process-wide navigation handle
///
/// All mutations funnel through a single-writer command queue: a command
/// dispatched from inside an in-flight transition (a timer firing
/// mid-gesture, a completion callback navigating) is enqueued and applied
/// after the current one, never interleaved.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<NavigatorInner>,
}

impl Navigator {
    /// Navigator rooted at the given route
    pub fn new(initial: Route) -> Self {
        Self {
            inner: Arc::new(NavigatorInner {
                stack: Mutex::new(NavigationStack::new(initial)),
                queue: Mutex::new(VecDeque::new()),
                draining: AtomicBool::new(false),
            }),
        }
    }

    /// Push a screen
    pub fn navigate(&self, route: Route) {
        let _ = self.dispatch(NavCommand::Navigate(route));
    }

    /// Replace the current screen
    pub fn replace(&self, route: Route) {
        let _ = self.dispatch(NavCommand::Replace(route));
    }

    /// Discard history and install a fixed route set
    pub fn reset(&self, routes: Vec<Route>, index: usize) {
        let result = self.dispatch(NavCommand::Reset { routes, index });
        debug_assert!(result.is_ok(), "invalid reset: {result:?}");
    }

    /// Merge params back into an existing entry
    ///
    /// A missing target is a programmer error: it fails the debug build and
    /// degrades to a logged no-op in release.
    pub fn merge_to(&self, route: Route) -> Result<(), NavigationError> {
        let result = self.dispatch(NavCommand::MergeTo(route));
        debug_assert!(result.is_ok(), "merge target missing: {result:?}");
        result
    }

    /// Pop the current screen, if possible
    pub fn go_back(&self) {
        let _ = self.dispatch(NavCommand::Back);
    }

    /// Enqueue a command and drain the queue unless a drain is in progress
    ///
    /// The returned result reflects commands applied by this call's drain;
    /// a command picked up by another in-progress drain reports `Ok`.
    pub fn dispatch(&self, command: NavCommand) -> Result<(), NavigationError> {
        self.inner.queue.lock().push_back(command);

        if self.inner.draining.swap(true, Ordering::AcqRel) {
            // A drain is already running and will pick this command up.
            return Ok(());
        }

        let mut result = Ok(());
        loop {
            let next = self.inner.queue.lock().pop_front();
            match next {
                Some(command) => {
                    if let Err(err) = self.apply(command) {
                        tracing::error!(%err, "navigation contract violation");
                        result = Err(err);
                    }
                }
                None => {
                    self.inner.draining.store(false, Ordering::Release);
                    if self.inner.queue.lock().is_empty() {
                        break;
                    }
                    if self.inner.draining.swap(true, Ordering::AcqRel) {
                        break;
                    }
                }
            }
        }
        result
    }

    fn apply(&self, command: NavCommand) -> Result<(), NavigationError> {
        let mut stack = self.inner.stack.lock();
        tracing::debug!(?command, depth = stack.depth(), "applying navigation");
        match command {
            NavCommand::Navigate(route) => {
                stack.push(route);
                Ok(())
            }
            NavCommand::Replace(route) => {
                stack.replace(route);
                Ok(())
            }
            NavCommand::Reset { routes, index } => stack.reset(routes, index),
            NavCommand::MergeTo(route) => stack.merge_to(route),
            NavCommand::Back => {
                stack.pop();
                Ok(())
            }
        }
    }

    /// The current route
    pub fn current(&self) -> Route {
        self.inner.stack.lock().current().route.clone()
    }

    /// Consume a pending merge on the current entry
    pub fn take_merged(&self) -> Option<Route> {
        self.inner.stack.lock().consume_merge()
    }

    /// Whether a back navigation is possible
    pub fn can_go_back(&self) -> bool {
        self.inner.stack.lock().can_go_back()
    }

    /// Stack depth
    pub fn depth(&self) -> usize {
        self.inner.stack.lock().depth()
    }

    /// Snapshot of the stack
    pub fn stack(&self) -> NavigationStack {
        self.inner.stack.lock().clone()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
