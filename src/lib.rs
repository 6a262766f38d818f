//! Brand onboarding wizard — headless engine for the marketing console.

pub mod analyzer;
pub mod config;
pub mod content;
pub mod error;
pub mod store;
pub mod submit;
pub mod wizard;
