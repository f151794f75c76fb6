//! Per-call wall-clock budget
//!
//! Encode/decode accept a deadline and check it cooperatively while walking
//! sub-elements. Expiry aborts the call with a typed error; intermediate
//! buffers are call-local, so no partial state survives.

use std::time::{Duration, Instant};

/// Wall-clock budget for a single encode/decode call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// Budget expiring after the given duration.
    pub fn after(budget: Duration) -> Self {
        Deadline {
            expires_at: Some(Instant::now() + budget),
        }
    }

    /// Budget expiring at an absolute instant.
    pub fn at(instant: Instant) -> Self {
        Deadline {
            expires_at: Some(instant),
        }
    }

    /// No budget; the call runs to completion.
    pub fn unlimited() -> Self {
        Deadline { expires_at: None }
    }

    /// Whether the budget is exhausted.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() >= expires_at,
            None => false,
        }
    }
}
