//! Segment files: naming, rotation policy and the rotating stream
//!
//! Segments are plain append-only files. Rotated segments are left on disk
//! untouched.

mod name;
mod rotation;
mod stream;

pub use name::{latest_sequence, parse_sequence, segment_name, ERR_EXTENSION, LOG_EXTENSION};
pub use rotation::{next_sequence, should_rotate};
pub use stream::{SegmentHandle, SegmentStream};
