//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for user-facing messages.
pub const APP_NAME: &str = "sampletidy";

/// Detector label marking a manually placed segment.
///
/// Manual placements represent deliberate user intent; merge resolution
/// prefers this label over any automated-detector label.
pub const MANUAL_DETECTOR: &str = "manual";

/// Score assigned to manually placed segments.
pub const MANUAL_SCORE: f32 = 1.0;

/// Default duplicate-matching tolerance for the CLI, in seconds.
///
/// Zero means exact start/end equality. The core library takes the
/// tolerance per call and holds no default of its own.
pub const DEFAULT_EPSILON: f64 = 0.0;

/// Suffix appended to the input filename when no output path is given.
pub const TIDY_OUTPUT_SUFFIX: &str = ".tidy.csv";

/// Score value bounds.
pub mod score {
    /// Minimum valid score value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid score value.
    pub const MAX: f32 = 1.0;
}
