//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Cardinal direction flags used as sides, corners and axis selectors
//! - Vector type and axis-addressed vector helpers
//! - Logging setup

pub mod direction;
pub mod logging;
pub mod math;
