//! # Engine Module
//!
//! The stateful layer of the library: it turns streams of candidate face
//! sequences into a list of distinct, checked cages.
//!
//! ## Overview
//!
//! A search owns exactly one [`session::SearchSession`], which holds the
//! signature table used for duplicate removal, the acceptance bound and the
//! running counters. Candidates flow from a strategy producer through the
//! [`candidate::CandidateEvaluator`], which builds, checks, regularizes and
//! fingerprints each one before registering it against the session.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search strategies, regularization and signature settings
//! - **Candidates** ([`candidate`]) - The per-sequence life cycle and its outcomes
//! - **Sessions** ([`session`]) - Duplicate table, acceptance bound and statistics
//! - **Strategies** ([`strategies`]) - Exhaustive, templated, jiggle and explicit producers
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod candidate;
pub mod config;
pub mod error;
pub mod progress;
pub mod session;
pub mod strategies;
pub(crate) mod utils;
