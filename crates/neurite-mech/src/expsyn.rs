//! Single-exponential synaptic conductance (`expsyn`).
//!
//! A point process: each slot owns a conductance `g` [µS] that decays
//! exponentially with time constant `tau` and jumps by the event weight on
//! `net_receive`. The synaptic current is the point current `g·(v − e)`
//! [nA] spread over the surface of the owning CV.

use crate::mechanism::{MechContext, Mechanism, MechanismKind};
use neurite_core::constants::POINT_CURRENT_TO_DENSITY;

/// Default decay time constant [ms].
pub const TAU: f64 = 2.0;
/// Default synaptic reversal potential [mV].
pub const E: f64 = 0.0;

/// The `expsyn` point-process mechanism.
#[derive(Clone, Debug)]
pub struct ExpSyn {
    node_index: Vec<u32>,
    g: Vec<f64>,
    cv_area: Vec<f64>,
    tau: f64,
    e: f64,
}

impl ExpSyn {
    /// Instantiate with one slot per entry of `node_index`, in lid order.
    ///
    /// The binder must hand over CV surface areas through
    /// [`Mechanism::set_areas`] before the first step; until then every
    /// slot assumes a unit area.
    pub fn new(node_index: Vec<u32>) -> Self {
        let n = node_index.len();
        Self {
            node_index,
            g: vec![0.0; n],
            cv_area: vec![1.0; n],
            tau: TAU,
            e: E,
        }
    }

    /// Slot conductances [µS], in lid order.
    pub fn conductance(&self) -> &[f64] {
        &self.g
    }
}

impl Mechanism for ExpSyn {
    fn name(&self) -> &str {
        "expsyn"
    }

    fn kind(&self) -> MechanismKind {
        MechanismKind::Point
    }

    fn node_index(&self) -> &[u32] {
        &self.node_index
    }

    fn set_areas(&mut self, areas: &[f64]) {
        self.cv_area = self
            .node_index
            .iter()
            .map(|&cv| areas[cv as usize])
            .collect();
    }

    fn init(&mut self, _ctx: &mut MechContext<'_>) {
        self.g.fill(0.0);
    }

    fn compute_current(&mut self, ctx: &mut MechContext<'_>) {
        for (k, &cv) in self.node_index.iter().enumerate() {
            let v = ctx.voltage[cv as usize];
            // µS · mV = nA, spread over the CV surface as mA/cm².
            let point_current = self.g[k] * (v - self.e);
            ctx.current[cv as usize] += POINT_CURRENT_TO_DENSITY * point_current / self.cv_area[k];
        }
    }

    fn advance_state(&mut self, ctx: &mut MechContext<'_>) {
        let decay = (-ctx.dt / self.tau).exp();
        for g in &mut self.g {
            *g *= decay;
        }
    }

    fn net_receive(&mut self, lid: u32, weight: f64) {
        if let Some(g) = self.g.get_mut(lid as usize) {
            *g += weight;
        }
    }
}
