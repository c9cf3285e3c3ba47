//! Alloy composition calculator
//!
//! Given an alloy recipe and a desired quantity, works out how many nuggets
//! of each base metal are needed, keeping every component inside its
//! recipe range while one of them is adjusted.

pub mod balancer;
pub mod catalog;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod models;
pub mod report;
pub mod sample;
pub mod session;
pub mod template;
pub mod units;

pub use balancer::{recompute, Nuggets, Outcome};
pub use catalog::RecipeCatalog;
pub use error::{DataLoadError, SessionError};
pub use session::Session;
