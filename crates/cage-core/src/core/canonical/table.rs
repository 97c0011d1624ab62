use super::signature::{DEFAULT_SIGNATURE_TOLERANCE, Signature};

/// Outcome of offering a signature to a [`SignatureTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Matches the entry at `index`; nothing was stored.
    Duplicate { index: usize },
    /// Stored as a new entry at `index`.
    Inserted { index: usize },
}

impl Registration {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Registration::Duplicate { .. })
    }

    pub fn index(&self) -> usize {
        match *self {
            Registration::Duplicate { index } | Registration::Inserted { index } => index,
        }
    }
}

/// Growing set of accepted signatures compared with a fixed tolerance.
#[derive(Debug, Clone)]
pub struct SignatureTable {
    entries: Vec<Signature>,
    tolerance: f64,
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURE_TOLERANCE)
    }
}

impl SignatureTable {
    pub fn new(tolerance: f64) -> Self {
        Self::with_capacity(0, tolerance)
    }

    /// Creates an empty table pre-sized for `capacity` entries. The table
    /// still grows past the hint.
    pub fn with_capacity(capacity: usize, tolerance: f64) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            tolerance,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.entries.iter()
    }

    /// Returns the index of the first stored signature matching `signature`.
    pub fn find(&self, signature: &Signature) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.matches(signature, self.tolerance))
    }

    /// Stores `signature` unless an equivalent one is already present.
    pub fn register(&mut self, signature: Signature) -> Registration {
        if let Some(index) = self.find(&signature) {
            return Registration::Duplicate { index };
        }
        self.entries.push(signature);
        Registration::Inserted {
            index: self.entries.len() - 1,
        }
    }
}
