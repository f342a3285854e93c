//! Deep-link router
//!
//! Parses URL paths into typed routes. Routes carrying rich payloads
//! (outfit results, selection hand-offs) are reachable only through
//! in-app navigation, not deep links; their paths land on the nearest
//! parameterless screen.

use std::collections::HashMap;

use crate::navigation::Route;

/// Parameters extracted from a matched path
type RouteParams = HashMap<String, String>;

/// Route pattern for matching
struct RoutePattern {
    /// Pattern segments
    segments: Vec<PatternSegment>,
    /// Route builder
    builder: fn(RouteParams) -> Option<Route>,
}

/// Segment type in a pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// URL Router for parsing paths to routes
pub struct Router {
    /// Route patterns
    patterns: Vec<RoutePattern>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self {
            patterns: Vec::new(),
        };

        router.add_route("/", |_| Some(Route::Home));
        router.add_route("/onboarding", |_| Some(Route::Onboarding));

        // Auth
        router.add_route("/login", |_| Some(Route::Login));
        router.add_route("/signup", |_| Some(Route::Signup));
        router.add_route("/forgot-password", |_| Some(Route::ForgotPassword));

        // Wardrobe. Literal segments are registered before "/wardrobe/:id"
        // so "add" and "select" are not swallowed as item ids.
        router.add_route("/wardrobe", |_| Some(Route::WardrobeList));
        router.add_route("/wardrobe/add", |_| Some(Route::AddItem));
        router.add_route("/wardrobe/select", |_| {
            Some(Route::WardrobeSelection {
                initial_selection: Vec::new(),
            })
        });
        router.add_route("/wardrobe/:id", |params| {
            Some(Route::ItemDetail {
                item_id: params.get("id")?.clone(),
            })
        });
        router.add_route("/wardrobe/:id/edit", |params| {
            Some(Route::EditItem {
                item_id: params.get("id")?.clone(),
            })
        });

        // Stylist
        router.add_route("/style-me", |_| {
            Some(Route::StyleMe {
                selected_items: Vec::new(),
            })
        });
        router.add_route("/outfit/:id", |params| {
            Some(Route::OutfitVisualizer {
                outfit_id: params.get("id")?.clone(),
            })
        });

        // Marketplace
        router.add_route("/marketplace", |params| {
            Some(Route::MarketplaceHome {
                search: params.get("search").cloned(),
                category: params.get("category").cloned(),
            })
        });
        router.add_route("/marketplace/listing/:id", |params| {
            Some(Route::ListingDetail {
                listing_id: params.get("id")?.clone(),
            })
        });

        // Account
        router.add_route("/profile", |_| Some(Route::Profile));

        router
    }

    /// Add a route pattern
    fn add_route(&mut self, pattern: &str, builder: fn(RouteParams) -> Option<Route>) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(param) = s.strip_prefix(':') {
                    PatternSegment::Param(param.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        self.patterns.push(RoutePattern { segments, builder });
    }

    /// Match a path to a route
    pub fn match_path(&self, path: &str) -> Route {
        let (pathname, query) = if let Some(idx) = path.find('?') {
            (&path[..idx], Some(&path[idx + 1..]))
        } else {
            (path, None)
        };

        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        for pattern in &self.patterns {
            if let Some(params) = self.match_pattern(&pattern.segments, &path_segments, query) {
                if let Some(route) = (pattern.builder)(params) {
                    return route;
                }
            }
        }

        tracing::debug!(path, "no route matched");
        Route::NotFound
    }

    /// Match a pattern against path segments
    fn match_pattern(
        &self,
        pattern: &[PatternSegment],
        path: &[&str],
        query: Option<&str>,
    ) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            // Special case: root path
            if pattern.is_empty() && path.is_empty() {
                let mut params = RouteParams::new();
                self.parse_query(query, &mut params);
                return Some(params);
            }
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, actual) in pattern.iter().zip(path.iter()) {
            match segment {
                PatternSegment::Literal(expected) => {
                    if expected != *actual {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.insert(
                        name.clone(),
                        urlencoding::decode(actual).ok()?.into_owned(),
                    );
                }
            }
        }

        self.parse_query(query, &mut params);

        Some(params)
    }

    /// Parse query string into params
    fn parse_query(&self, query: Option<&str>, params: &mut RouteParams) {
        if let Some(query) = query {
            for pair in query.split('&') {
                if let Some((key, value)) = pair.split_once('=') {
                    if let Ok(decoded) = urlencoding::decode(value) {
                        params.insert(key.to_string(), decoded.into_owned());
                    }
                }
            }
        }
    }
}

impl Route {
    /// Convert a route to its URL path
    pub fn to_path(&self) -> String {
        match self {
            Route::Onboarding => "/onboarding".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::Home => "/".to_string(),
            Route::WardrobeList => "/wardrobe".to_string(),
            Route::ItemDetail { item_id } => {
                format!("/wardrobe/{}", urlencoding::encode(item_id))
            }
            Route::AddItem => "/wardrobe/add".to_string(),
            Route::EditItem { item_id } => {
                format!("/wardrobe/{}/edit", urlencoding::encode(item_id))
            }
            Route::WardrobeSelection { .. } => "/wardrobe/select".to_string(),
            Route::StyleMe { .. } => "/style-me".to_string(),
            Route::OutfitResults { .. } => "/style-me".to_string(),
            Route::OutfitVisualizer { outfit_id } => {
                format!("/outfit/{}", urlencoding::encode(outfit_id))
            }
            Route::MarketplaceHome { search, category } => {
                let mut query = Vec::new();
                if let Some(search) = search {
                    query.push(format!("search={}", urlencoding::encode(search)));
                }
                if let Some(category) = category {
                    query.push(format!("category={}", urlencoding::encode(category)));
                }
                if query.is_empty() {
                    "/marketplace".to_string()
                } else {
                    format!("/marketplace?{}", query.join("&"))
                }
            }
            Route::ListingDetail { listing_id } => {
                format!("/marketplace/listing/{}", urlencoding::encode(listing_id))
            }
            Route::Profile => "/profile".to_string(),
            Route::NotFound => "/".to_string(),
        }
    }
}
