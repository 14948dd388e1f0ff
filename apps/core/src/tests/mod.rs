//! Test Module
//!
//! Test suite for the Soul Link core.
//!
//! ## Test Categories
//! - `brain_tests`: lexicon and questionnaire classifiers, suggestions, wellness
//! - `database_tests`: session document store on disk and in memory
//! - `actor_tests`: mock remote model, HTTP client through the gateways
//! - `supervisor_tests`: supervisor operations and request serialization
//! - `integration_tests`: full journaling workflows

pub mod actor_tests;
pub mod brain_tests;
