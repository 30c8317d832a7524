//! Greenlight - Film and TV project greenlighting engine
//!
//! This crate evaluates a proposed media project by fanning it out to
//! independent analysis units (market, financial, risk), then reducing their
//! results into a single GO / CONDITIONAL GO / NO-GO recommendation with an
//! aggregate confidence score.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
