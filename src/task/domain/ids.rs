//! Task identifier and its canonical string codec.

use super::InvalidTaskId;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the canonical hyphenated identifier surface form.
const CANONICAL_LEN: usize = 36;

/// Byte offsets of the group separators in the 8-4-4-4-12 layout.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Decodes an external identifier string.
    ///
    /// Only the canonical hyphenated form (`8-4-4-4-12` hexadecimal digits,
    /// either case) is accepted. The simple, braced and URN forms that
    /// [`Uuid::parse_str`] tolerates are rejected, as is any surrounding
    /// whitespace or trailing input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTaskId`] when `raw` is not a canonical identifier.
    pub fn decode(raw: &str) -> Result<Self, InvalidTaskId> {
        if !is_canonical_hyphenated(raw) {
            return Err(InvalidTaskId(raw.to_owned()));
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidTaskId(raw.to_owned()))
    }
}

fn is_canonical_hyphenated(raw: &str) -> bool {
    raw.len() == CANONICAL_LEN
        && raw.bytes().enumerate().all(|(position, byte)| {
            if HYPHEN_POSITIONS.contains(&position) {
                byte == b'-'
            } else {
                byte.is_ascii_hexdigit()
            }
        })
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = InvalidTaskId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::decode(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
