//! Completion window sizing.
//!
//! Maps a terminal row count to the number of completion items a dropdown
//! should render. The calculation is total: zero, negative, and huge row
//! counts all clamp into a valid [`SizingResult`].
//!
//! Sizing tiers (default policy):
//! - fewer than 10 rows: minimum window (3 items)
//! - 10..=40 rows: everything left after the reserved chrome, capped
//! - more than 40 rows: 70% of the available height, capped
//!
//! Terminals shorter than 15 rows are flagged compact and capped at 5 items.
//! Rows 10..=14 are therefore compact but still use the mid-terminal formula.

use serde::{Deserialize, Serialize};

/// Rows taken by fixed UI chrome around the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedSpace {
    /// Input line plus its border.
    pub input_line: u16,
    /// Help panel.
    pub help_text: u16,
    /// Scroll indicator row.
    pub indicators: u16,
    /// Vertical margins.
    pub padding: u16,
    /// Status message line.
    pub status_messages: u16,
}

impl ReservedSpace {
    /// Total rows unavailable to the list.
    pub const fn total(&self) -> u16 {
        self.input_line
            .saturating_add(self.help_text)
            .saturating_add(self.indicators)
            .saturating_add(self.padding)
            .saturating_add(self.status_messages)
    }
}

impl Default for ReservedSpace {
    fn default() -> Self {
        RESERVED_SPACE
    }
}

/// Terminal heights at which the dropdown changes mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Below this many rows the dropdown is compact.
    pub compact: u16,
    /// Above this many rows the large-terminal formula applies.
    pub large: u16,
}

impl Default for Breakpoints {
    fn default() -> Self {
        BREAKPOINTS
    }
}

/// Bounds on the number of items shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowLimits {
    /// Never show fewer than this.
    pub minimum: u16,
    /// Ceiling in normal mode.
    pub maximum: u16,
    /// Ceiling in compact mode.
    pub compact: u16,
}

impl Default for WindowLimits {
    fn default() -> Self {
        WINDOW_LIMITS
    }
}

/// Default chrome reservations.
pub const RESERVED_SPACE: ReservedSpace = ReservedSpace {
    input_line: 2,
    help_text: 2,
    indicators: 1,
    padding: 2,
    status_messages: 1,
};

/// Sum of [`RESERVED_SPACE`].
pub const TOTAL_RESERVED_SPACE: u16 = RESERVED_SPACE.total();

/// Default breakpoints.
pub const BREAKPOINTS: Breakpoints = Breakpoints {
    compact: 15,
    large: 40,
};

/// Default window limits.
pub const WINDOW_LIMITS: WindowLimits = WindowLimits {
    minimum: 3,
    maximum: 15,
    compact: 5,
};

/// The default sizing policy table.
pub const DEFAULT_POLICY: SizingPolicy = SizingPolicy {
    reserved: RESERVED_SPACE,
    breakpoints: BREAKPOINTS,
    limits: WINDOW_LIMITS,
    ultra_small_rows: 10,
    large_fill_percent: 70,
    available_floor: 3,
};

/// Policy table driving [`SizingPolicy::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingPolicy {
    /// Rows reserved for chrome.
    pub reserved: ReservedSpace,
    /// Mode breakpoints.
    pub breakpoints: Breakpoints,
    /// Window bounds.
    pub limits: WindowLimits,
    /// Terminals shorter than this always get the minimum window.
    pub ultra_small_rows: u16,
    /// Percentage of available height used on large terminals.
    pub large_fill_percent: u8,
    /// Floor on the available height.
    pub available_floor: u16,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        DEFAULT_POLICY
    }
}

/// Which sizing branch produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingTier {
    /// Terminal too short for anything but the minimum window.
    UltraSmall,
    /// Window fills the available height up to the cap.
    Standard,
    /// Window uses a fraction of the available height.
    Large,
}

impl std::fmt::Display for SizingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UltraSmall => write!(f, "ultra-small"),
            Self::Standard => write!(f, "standard"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// How the completion dropdown should be sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizingResult {
    /// Number of items to render.
    pub window_size: usize,
    /// Same as `available_height`.
    pub max_visible_items: usize,
    /// Rows left for the list after chrome.
    pub available_height: usize,
    /// Whether the terminal is short enough for compact mode.
    pub is_compact_mode: bool,
}

/// Compute sizing with the default policy.
pub fn compute(terminal_rows: i32) -> SizingResult {
    DEFAULT_POLICY.compute(terminal_rows)
}

impl SizingPolicy {
    /// Compute the dropdown size for a terminal with `terminal_rows` rows.
    pub fn compute(&self, terminal_rows: i32) -> SizingResult {
        let rows = i64::from(terminal_rows);
        let available = (rows - i64::from(self.reserved.total()))
            .max(i64::from(self.available_floor));

        let is_compact_mode = rows < i64::from(self.breakpoints.compact);
        let max_window = i64::from(if is_compact_mode {
            self.limits.compact
        } else {
            self.limits.maximum
        });
        let minimum = i64::from(self.limits.minimum);

        let window = match self.tier(terminal_rows) {
            SizingTier::UltraSmall => minimum,
            SizingTier::Large => {
                (available * i64::from(self.large_fill_percent) / 100).min(max_window)
            }
            SizingTier::Standard => available.min(max_window),
        };
        let window_size = window.min(max_window).max(minimum);

        SizingResult {
            window_size: to_count(window_size),
            max_visible_items: to_count(available),
            available_height: to_count(available),
            is_compact_mode,
        }
    }

    /// Which sizing branch applies to `terminal_rows`.
    pub fn tier(&self, terminal_rows: i32) -> SizingTier {
        let rows = i64::from(terminal_rows);
        if rows < i64::from(self.ultra_small_rows) {
            SizingTier::UltraSmall
        } else if rows > i64::from(self.breakpoints.large) {
            SizingTier::Large
        } else {
            SizingTier::Standard
        }
    }

    /// Check that the table is internally consistent.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let limits = self.limits;
        if limits.minimum == 0 {
            return Err(PolicyError::ZeroMinimum);
        }
        if limits.minimum > limits.compact {
            return Err(PolicyError::MinimumAboveCompact {
                minimum: limits.minimum,
                compact: limits.compact,
            });
        }
        if limits.compact > limits.maximum {
            return Err(PolicyError::CompactAboveMaximum {
                compact: limits.compact,
                maximum: limits.maximum,
            });
        }
        if self.breakpoints.compact > self.breakpoints.large {
            return Err(PolicyError::BreakpointOrder {
                compact: self.breakpoints.compact,
                large: self.breakpoints.large,
            });
        }
        if !(1..=100).contains(&self.large_fill_percent) {
            return Err(PolicyError::FillPercent(self.large_fill_percent));
        }
        if self.available_floor == 0 {
            return Err(PolicyError::ZeroAvailableFloor);
        }
        Ok(())
    }
}

// Values reaching here are already floored at a positive policy bound.
fn to_count(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

/// Inconsistent sizing policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Minimum window of zero items.
    #[error("limits.minimum must be at least 1")]
    ZeroMinimum,

    /// Minimum exceeds the compact ceiling.
    #[error("limits.minimum ({minimum}) exceeds limits.compact ({compact})")]
    MinimumAboveCompact { minimum: u16, compact: u16 },

    /// Compact ceiling exceeds the normal ceiling.
    #[error("limits.compact ({compact}) exceeds limits.maximum ({maximum})")]
    CompactAboveMaximum { compact: u16, maximum: u16 },

    /// Breakpoints out of order.
    #[error("breakpoints.compact ({compact}) exceeds breakpoints.large ({large})")]
    BreakpointOrder { compact: u16, large: u16 },

    /// Fill percentage outside 1..=100.
    #[error("large_fill_percent must be within 1..=100, got {0}")]
    FillPercent(u8),

    /// Available height floor of zero rows.
    #[error("available_floor must be at least 1")]
    ZeroAvailableFloor,
}
