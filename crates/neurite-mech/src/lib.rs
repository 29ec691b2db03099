//! Membrane and synaptic mechanisms for the neurite engine.
//!
//! A [`Mechanism`] is a dynamical model of a membrane current (density
//! mechanism) or synaptic process (point process) acting on a declared set
//! of control volumes. Mechanisms own their internal state; the engine owns
//! the shared voltage/current arrays and ion state, and lends them to each
//! mechanism per call through a [`MechContext`].
//!
//! The crate ships the reference catalogue the validation suite uses:
//! [`Hh`] (squid-axon sodium/potassium kinetics), [`Pas`] (linear leak),
//! and [`ExpSyn`] (single-exponential synaptic conductance).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalogue;
pub mod expsyn;
pub mod hh;
pub mod ion;
pub mod mechanism;
pub mod pas;

pub use catalogue::{Catalogue, CatalogueError, MechanismFactory};
pub use expsyn::ExpSyn;
pub use hh::Hh;
pub use ion::IonState;
pub use mechanism::{MechContext, Mechanism, MechanismKind};
pub use pas::Pas;
