//! Per-item outcomes for batch operations with partial-progress semantics.
//!
//! Creation and registration commit each item on its own. A failed item is
//! recorded here and left out of the externally visible result; it never
//! fails the whole request.

use std::fmt;

/// Why a batch item was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The caller's key does not own the identifier.
    NotOwned,
    /// The identifier text is not a valid token.
    MalformedIdentifier,
    /// The location is not an acceptable URI.
    InvalidLocation {
        /// Validation diagnostic.
        reason: String,
    },
    /// The store rejected the write.
    Store {
        /// Store diagnostic.
        message: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOwned => write!(f, "identifier not owned by caller"),
            Self::MalformedIdentifier => write!(f, "malformed identifier"),
            Self::InvalidLocation { reason } => write!(f, "invalid location: {reason}"),
            Self::Store { message } => write!(f, "store rejected item: {message}"),
        }
    }
}

/// Outcome of one input item, keyed by its input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome<T> {
    /// The item was durably written.
    Committed(T),
    /// The item was left untouched.
    Skipped(SkipReason),
}

/// Ordered outcomes for every input item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport<T> {
    outcomes: Vec<ItemOutcome<T>>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    /// Create an empty report sized for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// Record a committed item.
    pub fn commit(&mut self, value: T) {
        self.outcomes.push(ItemOutcome::Committed(value));
    }

    /// Record a skipped item.
    pub fn skip(&mut self, reason: SkipReason) {
        self.outcomes.push(ItemOutcome::Skipped(reason));
    }

    /// Outcomes in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[ItemOutcome<T>] {
        &self.outcomes
    }

    /// Number of skipped items.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, ItemOutcome::Skipped(_)))
            .count()
    }

    /// Committed values in input order, dropping skipped items.
    #[must_use]
    pub fn into_committed(self) -> Vec<T> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                ItemOutcome::Committed(value) => Some(value),
                ItemOutcome::Skipped(_) => None,
            })
            .collect()
    }
}
