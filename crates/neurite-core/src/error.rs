//! Initialization error type for the finite-volume lowering.
//!
//! Lowering a population of cells either succeeds completely or fails with a
//! [`ModelError`] before any engine state is observable. The per-step
//! `advance` path is total on well-formed input and has no error channel;
//! numerical blow-up is surfaced through the engine's physicality check
//! instead of an error.

use std::error::Error;
use std::fmt;

/// Errors from lowering cell descriptions into an engine.
///
/// All variants are fatal at initialization time: the engine constructor
/// returns the error and drops any partially-built state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// The cell collection was empty.
    NoCells,

    /// A cell yielded zero compartments.
    EmptyCell {
        /// Index of the malformed cell in the input collection.
        cell: usize,
    },

    /// A soma segment mapped to a number of CVs other than one.
    SomaCompartments {
        /// Index of the owning cell.
        cell: usize,
        /// Number of CVs the soma was allocated.
        count: usize,
    },

    /// A mechanism name was not present in the catalogue.
    UnknownMechanism {
        /// The unresolved mechanism name.
        name: String,
    },

    /// A location referenced a segment outside its cell.
    InvalidLocation {
        /// Index of the owning cell.
        cell: usize,
        /// The out-of-range segment index.
        segment: usize,
    },

    /// The number of emitted handles disagreed with the per-cell totals.
    HandleCountMismatch {
        /// Which handle family mismatched (`"detector"`, `"target"`, `"probe"`).
        kind: &'static str,
        /// Total counted across the cell descriptions.
        expected: usize,
        /// Number of handles actually emitted.
        actual: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCells => write!(f, "cell collection is empty"),
            Self::EmptyCell { cell } => {
                write!(f, "cell {cell} has zero compartments")
            }
            Self::SomaCompartments { cell, count } => {
                write!(
                    f,
                    "soma of cell {cell} allocated {count} compartments, expected exactly 1"
                )
            }
            Self::UnknownMechanism { name } => {
                write!(f, "mechanism '{name}' is not in the catalogue")
            }
            Self::InvalidLocation { cell, segment } => {
                write!(f, "cell {cell} has no segment {segment}")
            }
            Self::HandleCountMismatch {
                kind,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{kind} handle count mismatch: cells declare {expected}, emitted {actual}"
                )
            }
        }
    }
}

impl Error for ModelError {}
