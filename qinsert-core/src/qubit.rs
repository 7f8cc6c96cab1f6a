//! Qubit addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit
///
/// # Example
/// ```
/// use qinsert_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}
