//! oralis-engine
//!
//! The deterministic decision stages of the advisory pipeline. Every stage
//! is a pure function of its inputs and the injected [`Catalog`]:
//!
//! - [`tags::extract_tags`]: answers → tags
//! - [`drivers::derive_drivers`]: tags → driver state
//! - [`scenario::match_scenario`]: driver state → best scenario
//! - [`tone::resolve_tone`]: driver state → report tone
//! - [`select::select_content`]: driver state + scenario → content selections
//! - [`compose::compose_report`]: selections + fetched text → composed report
//!
//! [`Catalog`]: oralis_rules::Catalog

pub mod compose;
pub mod drivers;
pub mod placeholder;
pub mod scenario;
pub mod select;
pub mod tags;
pub mod tone;
