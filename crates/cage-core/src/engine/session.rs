use super::error::EngineError;
use crate::core::canonical::{Registration, Signature, SignatureTable};

/// Largest duplicate table a search may ask for up front.
pub const MAX_TABLE_CAPACITY: usize = 1 << 24;

/// Table size used when neither the caller nor the search bound suggests one.
pub const DEFAULT_TABLE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub candidates: usize,
    pub invalid: usize,
    pub duplicates: usize,
    pub accepted: usize,
    pub enantiomorphs: usize,
}

/// Shared state of one search: the signatures seen so far, the acceptance
/// bound and the running counters.
///
/// Every candidate of a search is registered against the same session, and
/// only through it, so two searches never see each other's cages.
#[derive(Debug, Clone)]
pub struct SearchSession {
    table: SignatureTable,
    max_accepted: Option<usize>,
    stats: SessionStats,
    stopped_early: bool,
}

impl SearchSession {
    /// Creates a session whose table is pre-sized for `capacity` signatures.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CapacityExceeded`] if `capacity` is above
    /// [`MAX_TABLE_CAPACITY`].
    pub fn new(
        capacity: usize,
        tolerance: f64,
        max_accepted: Option<usize>,
    ) -> Result<Self, EngineError> {
        if capacity > MAX_TABLE_CAPACITY {
            return Err(EngineError::CapacityExceeded {
                what: "signature table capacity",
                requested: capacity as u64,
                limit: MAX_TABLE_CAPACITY as u64,
            });
        }
        Ok(Self {
            table: SignatureTable::with_capacity(capacity, tolerance),
            max_accepted,
            stats: SessionStats::default(),
            stopped_early: false,
        })
    }

    pub fn is_duplicate(&self, signature: &Signature) -> bool {
        self.table.find(signature).is_some()
    }

    pub fn register(&mut self, signature: Signature) -> Registration {
        self.table.register(signature)
    }

    /// Returns `true` once the acceptance bound has been reached.
    pub fn is_full(&self) -> bool {
        self.max_accepted
            .is_some_and(|limit| self.stats.accepted >= limit)
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SessionStats {
        &mut self.stats
    }

    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    pub(crate) fn mark_stopped_early(&mut self) {
        self.stopped_early = true;
    }
}
