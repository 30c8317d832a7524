//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (confidence, IDs, timestamps, errors)
//! - `project` - Project attributes, platforms and budget tiers
//! - `analysis` - Per-unit results plus pure scoring (risk, financial, confidence rules)
//! - `synthesis` - Pure reduction of unit results into a final recommendation
//! - `conversation` - Caller-owned conversation state for narrative calls

pub mod analysis;
pub mod conversation;
pub mod foundation;
pub mod project;
pub mod synthesis;
