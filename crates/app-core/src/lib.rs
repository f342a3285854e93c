//! Core application logic for Vazi
//!
//! This crate contains the feature flows behind each screen group: auth,
//! wardrobe, stylist, marketplace, and profile. Flows own validation and
//! domain state; navigation and presentation live in `app-ui`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod marketplace;
pub mod profile;
pub mod stylist;
pub mod wardrobe;
