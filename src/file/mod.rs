//! Segment file reading and writing.
//!
//! The CLI plays the role of the surrounding editor for batch use: it loads
//! a segment list from CSV, recomputes groups, applies a resolver, and
//! writes the resulting collection back.

mod parser;
mod writer;

pub use parser::parse_segment_file;
pub use writer::write_segment_file;
