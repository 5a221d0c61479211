//! dropsize-core: Completion dropdown sizing for terminal UIs
//!
//! This crate provides:
//! - The sizing policy table and the pure sizing calculation
//! - Recompute-on-change tracking for live terminal heights
//! - JSON configuration for overriding the policy table

pub mod config;
pub mod sizing;
pub mod tracker;

// Re-export commonly used types
pub use config::{Config, ConfigError, CONFIG_FILE_NAME};
pub use sizing::{
    compute, Breakpoints, PolicyError, ReservedSpace, SizingPolicy, SizingResult, SizingTier,
    WindowLimits, BREAKPOINTS, DEFAULT_POLICY, RESERVED_SPACE, TOTAL_RESERVED_SPACE,
    WINDOW_LIMITS,
};
pub use tracker::{spawn_window_size_watcher, WindowSizeTracker};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
