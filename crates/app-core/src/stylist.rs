//! AI Stylist flows
//!
//! Outfit generation is a static lookup table returned after a simulated
//! backend delay; the flow around it (criteria form, validation, async
//! state) is real and a generation backend slots in behind [`Stylist`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use app_state::{AsyncController, AsyncState, ErrorInfo, FetchMode, ItemRef, RunOutcome, SelectionSet};

/// How covered the suggested outfits should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModestyLevel {
    /// Maximum coverage
    Conservative,
    /// Middle ground
    #[default]
    Moderate,
    /// Anything goes
    Expressive,
}

/// What the user asked the stylist for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCriteria {
    /// The occasion to dress for (required)
    pub occasion: String,
    /// Where the occasion takes place
    pub location: Option<String>,
    /// Free-form mood ("casual chic", "bold")
    pub style_mood: Option<String>,
    /// Preferred colors, toggled on the form
    pub preferred_colors: Vec<String>,
    /// Wardrobe items the outfits must include
    pub must_include_items: Vec<ItemRef>,
    /// Coverage preference
    pub modesty_level: ModestyLevel,
}

/// A generated outfit suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    /// Stable id
    pub id: String,
    /// Display name
    pub name: String,
    /// Preview image
    pub image_url: String,
    /// The wardrobe items composing the outfit
    pub items: Vec<ItemRef>,
}

/// Errors that can occur during stylist operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StylistError {
    /// Criteria validation failure; surfaced inline
    #[error("Please tell us the occasion.")]
    MissingOccasion,
}

/// Color options offered on the criteria form
pub fn color_options() -> Vec<&'static str> {
    vec![
        "Red", "Blue", "Green", "Black", "White", "Yellow", "Pink", "Purple", "Orange", "Brown",
        "Grey", "Multi-color",
    ]
}

/// The outfit generation backend (mocked as a lookup table)
pub struct Stylist {
    lookup: Vec<Outfit>,
    delay: Duration,
}

impl Stylist {
    /// Stylist with the seeded lookup table and production delay
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    /// Stylist with an explicit simulated delay
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            lookup: seed_outfits(),
            delay,
        }
    }

    /// Validate criteria before generating
    pub fn validate(criteria: &StyleCriteria) -> Result<(), StylistError> {
        if criteria.occasion.trim().is_empty() {
            return Err(StylistError::MissingOccasion);
        }
        Ok(())
    }

    /// Produce outfit suggestions for the criteria
    pub async fn generate(&self, criteria: &StyleCriteria) -> Result<Vec<Outfit>, ErrorInfo> {
        Self::validate(criteria).map_err(|e| ErrorInfo::validation(e.to_string()))?;
        tracing::debug!(occasion = %criteria.occasion, "generating outfits");
        tokio::time::sleep(self.delay).await;
        Ok(self.lookup.clone())
    }
}

impl Default for Stylist {
    fn default() -> Self {
        Self::new()
    }
}

/// State behind the Style Me screen
///
/// Owns the criteria form and the async generation lifecycle. The caller
/// navigates to results when `generate` yields outfits.
pub struct StyleMeFlow {
    stylist: Arc<Stylist>,
    criteria: parking_lot::Mutex<StyleCriteria>,
    controller: AsyncController<Vec<Outfit>>,
}

impl StyleMeFlow {
    /// Flow over a stylist backend
    pub fn new(stylist: Arc<Stylist>) -> Self {
        Self {
            stylist,
            criteria: parking_lot::Mutex::new(StyleCriteria::default()),
            controller: AsyncController::new(),
        }
    }

    /// Current criteria snapshot
    pub fn criteria(&self) -> StyleCriteria {
        self.criteria.lock().clone()
    }

    /// Set the occasion field
    pub fn set_occasion(&self, occasion: impl Into<String>) {
        self.criteria.lock().occasion = occasion.into();
    }

    /// Toggle a preferred color chip on the form
    pub fn toggle_color(&self, color: &str) {
        let mut criteria = self.criteria.lock();
        if let Some(pos) = criteria.preferred_colors.iter().position(|c| c == color) {
            criteria.preferred_colors.remove(pos);
        } else {
            criteria.preferred_colors.push(color.to_string());
        }
    }

    /// Set the modesty level from the picker modal
    pub fn set_modesty(&self, level: ModestyLevel) {
        self.criteria.lock().modesty_level = level;
    }

    /// Apply a confirmed wardrobe selection to the must-include list
    pub fn apply_selection(&self, selection: Vec<ItemRef>) {
        self.criteria.lock().must_include_items = SelectionSet::from_items(selection).into_items();
    }

    /// Run generation through the async state machine
    pub async fn generate(&self) -> RunOutcome {
        let criteria = self.criteria();
        if Stylist::validate(&criteria).is_err() {
            // Validation is inline form state, not a fetch lifecycle event.
            return RunOutcome::Ignored;
        }
        let stylist = Arc::clone(&self.stylist);
        self.controller
            .run(FetchMode::Initial, async move {
                stylist.generate(&criteria).await
            })
            .await
    }

    /// Snapshot of the generation state
    pub fn state(&self) -> AsyncState<Vec<Outfit>> {
        self.controller.state()
    }

    /// Mark the screen as unmounted
    pub fn detach(&self) {
        self.controller.detach();
    }
}

/// Seed outfit lookup table
pub fn seed_outfits() -> Vec<Outfit> {
    vec![
        Outfit {
            id: "outfit_1".to_string(),
            name: "Chic Conference Look".to_string(),
            image_url: "https://via.placeholder.com/300/D1D1D1/333333?text=Outfit+1".to_string(),
            items: vec![
                ItemRef::new("wd1", "Blue Denim Jacket"),
                ItemRef::new("wd3", "Classic White Tee"),
            ],
        },
        Outfit {
            id: "outfit_2".to_string(),
            name: "Elegant Evening Attire".to_string(),
            image_url: "https://via.placeholder.com/300/333333/FFFFFF?text=Outfit+2".to_string(),
            items: vec![
                ItemRef::new("wd2", "Floral Summer Dress"),
                ItemRef::new("wd6", "Leather Handbag"),
            ],
        },
    ]
}
