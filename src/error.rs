//! Error types for sampletidy.

/// Result type alias for sampletidy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for sampletidy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Segment has a malformed time interval.
    #[error(
        "invalid segment {id}: interval [{start}, {end}) must have finite endpoints and start < end"
    )]
    InvalidSegment {
        /// Identity of the offending segment.
        id: crate::segment::SegmentId,
        /// Start time in seconds.
        start: f64,
        /// End time in seconds.
        end: f64,
    },

    /// Duplicate-matching tolerance is negative.
    #[error("tolerance must be non-negative, got {value}")]
    NegativeTolerance {
        /// The rejected tolerance value in seconds.
        value: f64,
    },

    /// Failed to parse a segment file.
    #[error("failed to parse segment file '{path}'")]
    SegmentParseFailed {
        /// Path to the segment file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Segment file contains a malformed record.
    #[error("invalid segment file format: {message}")]
    InvalidSegmentFormat {
        /// Description of the format error.
        message: String,
    },

    /// Failed to write a segment file.
    #[error("failed to write segment file '{path}'")]
    SegmentWrite {
        /// Path to the segment file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to create the output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a JSON report.
    #[error("failed to serialize JSON report")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
