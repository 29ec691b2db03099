//! The [`Mechanism`] trait and the per-call [`MechContext`].
//!
//! Mechanisms never hold references into engine storage. Each engine call
//! lends the shared arrays through a short-lived context, so the engine
//! stays the sole owner of voltage, current, and ion state while mechanisms
//! keep only their node index and private state vectors.

use crate::ion::IonState;
use indexmap::IndexMap;
use neurite_core::IonKind;

/// Whether a mechanism is distributed over membrane or localized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MechanismKind {
    /// Acts across a CV set with membrane-area-scaled current densities.
    Density,
    /// Acts at individual CVs and receives discrete events.
    Point,
}

/// Borrowed views of engine state lent to a mechanism for one call.
///
/// `voltage` is read-only (it is produced by the solver); `current` is a
/// read-modify-write accumulator and mechanisms must only touch the entries
/// named by their node index. `t` and `dt` describe the step being taken.
pub struct MechContext<'a> {
    /// Simulation time at the start of the step [ms].
    pub t: f64,
    /// Step width [ms].
    pub dt: f64,
    /// Membrane potential per CV [mV].
    pub voltage: &'a [f64],
    /// Current density accumulator per CV [mA/cm²].
    pub current: &'a mut [f64],
    /// Ion state blocks, keyed by kind; present only for ions some
    /// mechanism uses.
    pub ions: &'a IndexMap<IonKind, IonState>,
}

impl<'a> MechContext<'a> {
    /// The shared state block for an ion, if any mechanism bound it.
    pub fn ion(&self, kind: IonKind) -> Option<&IonState> {
        self.ions.get(&kind)
    }
}

/// A dynamical model of a membrane current or synaptic process.
///
/// # Contract
///
/// - All methods must stay within the CV set named by `node_index()`;
///   `current` entries outside it belong to other mechanisms.
/// - `compute_current` and `advance_state` must be deterministic; the
///   engine calls mechanisms in declaration order and that order is
///   observable through floating-point accumulation.
/// - `net_receive` is meaningful only for [`MechanismKind::Point`]
///   mechanisms; the default is a no-op.
///
/// # Object safety
///
/// The trait is object-safe; the engine stores mechanisms as
/// `Vec<Box<dyn Mechanism>>`.
pub trait Mechanism: Send + std::fmt::Debug {
    /// Catalogue name, for diagnostics.
    fn name(&self) -> &str;

    /// Density or point process.
    fn kind(&self) -> MechanismKind;

    /// Global CV indices this mechanism acts on.
    ///
    /// Sorted and distinct for density mechanisms; in slot (lid) order,
    /// possibly with repeats, for point processes.
    fn node_index(&self) -> &[u32];

    /// Whether this mechanism reads the given ion's state.
    fn uses_ion(&self, _ion: IonKind) -> bool {
        false
    }

    /// Accept the slot map for an ion this mechanism uses.
    ///
    /// `slots[k]` is the position of `node_index()[k]` within the ion's
    /// own node index; the binder computes and hands over one map per used
    /// ion before the first step.
    fn bind_ion(&mut self, _ion: IonKind, _slots: Vec<u32>) {}

    /// Accept the per-CV surface areas [µm²].
    ///
    /// Point processes need them to convert point currents (nA) into the
    /// density (mA/cm²) the solver integrates; the default ignores them.
    fn set_areas(&mut self, _areas: &[f64]) {}

    /// Reset internal state to its steady state at the present voltage.
    fn init(&mut self, ctx: &mut MechContext<'_>);

    /// Add this mechanism's contribution to `ctx.current` over its nodes.
    fn compute_current(&mut self, ctx: &mut MechContext<'_>);

    /// Integrate internal state across one step of width `ctx.dt`.
    fn advance_state(&mut self, ctx: &mut MechContext<'_>);

    /// Deliver a discrete event of the given weight to slot `lid`.
    fn net_receive(&mut self, _lid: u32, _weight: f64) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Run one `init` call against plain vectors; returns the context
    /// pieces for further calls.
    pub(crate) fn empty_ions() -> IndexMap<IonKind, IonState> {
        IndexMap::new()
    }

    pub(crate) fn ctx<'a>(
        t: f64,
        dt: f64,
        voltage: &'a [f64],
        current: &'a mut [f64],
        ions: &'a IndexMap<IonKind, IonState>,
    ) -> MechContext<'a> {
        MechContext {
            t,
            dt,
            voltage,
            current,
            ions,
        }
    }
}
