use serde::{Deserialize, Serialize};
use std::fmt;

/// Local sequential id of a pending mutation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationId(i64);

impl MutationId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Mutation ID must be positive".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
