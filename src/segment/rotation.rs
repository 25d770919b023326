//! Size-based rotation policy

use crate::error::Result;

use super::name::parse_sequence;

/// Whether writing `incoming` bytes would push a segment past `max`
///
/// A total that overflows `u64` is past any limit.
pub fn should_rotate(current_size: u64, incoming_size: u64, max_size: u64) -> bool {
    current_size
        .checked_add(incoming_size)
        .map_or(true, |total| total > max_size)
}

/// Sequence of the segment that replaces `current_name` in the same generation
pub fn next_sequence(current_name: &str, extension: &str) -> Result<u64> {
    Ok(parse_sequence(current_name, extension)? + 1)
}
