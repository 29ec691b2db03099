//! Core types and handles for the neurite cable-equation engine.
//!
//! This is the leaf crate with zero internal neurite dependencies. It defines
//! the vocabulary shared by the rest of the workspace: control-volume handles,
//! ion species, state-field selectors, the initialization error type, the
//! compartment partition helper, and the geometric and physiological
//! constants that the finite-volume lowering relies on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod handle;
pub mod math;
pub mod partition;

// Re-export core types at crate root for convenience.
pub use error::ModelError;
pub use handle::{DetectorHandle, IonKind, ProbeHandle, StateField, TargetHandle};
pub use partition::Partition;
