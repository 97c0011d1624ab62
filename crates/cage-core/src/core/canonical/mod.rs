//! Canonical signatures and duplicate detection.
//!
//! A [`Signature`] is the sorted spectrum of a cage's distance matrix; a
//! [`SignatureTable`] keeps the signatures of accepted cages and reports
//! whether a new one matches any of them within tolerance.

pub mod signature;
pub mod table;

pub use signature::{DEFAULT_SIGNATURE_TOLERANCE, Signature, SignatureKind, signature};
pub use table::{Registration, SignatureTable};
