//! Neurite: multi-compartment neuron simulation on an implicit
//! finite-volume cable discretization.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all neurite sub-crates. For most users, adding `neurite` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use neurite::prelude::*;
//!
//! // A soma with squid-axon kinetics and a current clamp.
//! let mut cell = Cell::new();
//! let soma = cell.add_soma(9.4).unwrap();
//! cell.add_mechanism(soma, "hh").unwrap();
//! cell.add_stimulus(Location::new(0, 0.5), IClamp::new(10.0, 100.0, 0.1)).unwrap();
//! cell.add_probe(Location::new(0, 0.5), ProbeKind::MembraneVoltage).unwrap();
//!
//! // Lower it and step the implicit solver.
//! let (mut engine, handles) = FvmEngine::new(&[cell]).unwrap();
//! for _ in 0..1000 {
//!     engine.advance(0.01);
//! }
//! assert!(engine.is_physical_solution());
//! assert_eq!(engine.probe(handles.probes[0]), engine.voltage()[0]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `neurite-core` | Handles, errors, partitions, constants |
//! | [`cell`] | `neurite-cell` | Morphological cell descriptions |
//! | [`mech`] | `neurite-mech` | Mechanism trait, ion state, catalogue |
//! | [`engine`] | `neurite-engine` | The lowered finite-volume engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Handles, errors, partitions, and physical constants (`neurite-core`).
pub use neurite_core as types;

/// Morphological cell descriptions (`neurite-cell`).
///
/// Build [`cell::Cell`] trees of soma and cable segments, annotated with
/// mechanisms, synapses, clamps, detectors, and probes.
pub use neurite_cell as cell;

/// Mechanisms and ion state (`neurite-mech`).
///
/// The [`mech::Mechanism`] trait is the main extension point; the standard
/// [`mech::Catalogue`] ships `hh`, `pas`, and `expsyn`.
pub use neurite_mech as mech;

/// The lowered finite-volume multi-cell engine (`neurite-engine`).
///
/// [`engine::FvmEngine`] flattens a cell population and advances the
/// implicit cable discretization step by step.
pub use neurite_engine as engine;

/// Common imports for typical neurite usage.
///
/// ```rust
/// use neurite::prelude::*;
/// ```
pub mod prelude {
    // Cell descriptions
    pub use neurite_cell::{Cell, IClamp, Location, Membrane, ProbeKind};

    // Core handles and errors
    pub use neurite_core::{
        DetectorHandle, IonKind, ModelError, ProbeHandle, StateField, TargetHandle,
    };

    // Mechanisms
    pub use neurite_mech::{Catalogue, MechContext, Mechanism, MechanismKind};

    // Engine
    pub use neurite_engine::{EngineConfig, FvmEngine, Handles};
}
