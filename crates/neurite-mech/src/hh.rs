//! Squid-axon sodium/potassium kinetics (`hh`).
//!
//! The classic three-gate formulation: a transient sodium conductance
//! `gnabar·m³h`, a delayed-rectifier potassium conductance `gkbar·n⁴`, and a
//! linear leak. Gating variables relax toward their voltage-dependent steady
//! states with an exponential-Euler update, which is exact for the
//! per-step-frozen rate coefficients and unconditionally stable.

use crate::mechanism::{MechContext, Mechanism, MechanismKind};
use neurite_core::constants;
use neurite_core::IonKind;

/// Default peak sodium conductance [S/cm²].
pub const GNABAR: f64 = 0.12;
/// Default peak potassium conductance [S/cm²].
pub const GKBAR: f64 = 0.036;
/// Default leak conductance [S/cm²].
pub const GL: f64 = 3e-4;
/// Default leak reversal potential [mV].
pub const EL: f64 = -54.3;

/// The `hh` density mechanism.
#[derive(Clone, Debug)]
pub struct Hh {
    node_index: Vec<u32>,
    na_slots: Vec<u32>,
    k_slots: Vec<u32>,
    m: Vec<f64>,
    h: Vec<f64>,
    n: Vec<f64>,
    gnabar: f64,
    gkbar: f64,
    gl: f64,
    el: f64,
}

impl Hh {
    /// Instantiate over a CV index set with the default conductances.
    pub fn new(node_index: Vec<u32>) -> Self {
        let n = node_index.len();
        Self {
            node_index,
            na_slots: Vec::new(),
            k_slots: Vec::new(),
            m: vec![0.0; n],
            h: vec![0.0; n],
            n: vec![0.0; n],
            gnabar: GNABAR,
            gkbar: GKBAR,
            gl: GL,
            el: EL,
        }
    }

    fn reversal(&self, ctx: &MechContext<'_>, ion: IonKind, slots: &[u32], k: usize) -> f64 {
        match (ctx.ion(ion), slots.get(k)) {
            (Some(state), Some(&slot)) => state.reversal_potential()[slot as usize],
            _ => match ion {
                IonKind::Na => constants::NA_REVERSAL_POTENTIAL,
                IonKind::K => constants::K_REVERSAL_POTENTIAL,
                IonKind::Ca => constants::ca_reversal_potential(),
            },
        }
    }
}

impl Mechanism for Hh {
    fn name(&self) -> &str {
        "hh"
    }

    fn kind(&self) -> MechanismKind {
        MechanismKind::Density
    }

    fn node_index(&self) -> &[u32] {
        &self.node_index
    }

    fn uses_ion(&self, ion: IonKind) -> bool {
        matches!(ion, IonKind::Na | IonKind::K)
    }

    fn bind_ion(&mut self, ion: IonKind, slots: Vec<u32>) {
        match ion {
            IonKind::Na => self.na_slots = slots,
            IonKind::K => self.k_slots = slots,
            IonKind::Ca => {}
        }
    }

    fn init(&mut self, ctx: &mut MechContext<'_>) {
        for (k, &cv) in self.node_index.iter().enumerate() {
            let v = ctx.voltage[cv as usize];
            let (m_inf, _) = gate_m(v);
            let (h_inf, _) = gate_h(v);
            let (n_inf, _) = gate_n(v);
            self.m[k] = m_inf;
            self.h[k] = h_inf;
            self.n[k] = n_inf;
        }
    }

    fn compute_current(&mut self, ctx: &mut MechContext<'_>) {
        for (k, &cv) in self.node_index.iter().enumerate() {
            let v = ctx.voltage[cv as usize];
            let ena = self.reversal(ctx, IonKind::Na, &self.na_slots, k);
            let ek = self.reversal(ctx, IonKind::K, &self.k_slots, k);

            let gna = self.gnabar * self.m[k] * self.m[k] * self.m[k] * self.h[k];
            let n2 = self.n[k] * self.n[k];
            let gk = self.gkbar * n2 * n2;

            // S/cm² · mV = mA/cm².
            let i = gna * (v - ena) + gk * (v - ek) + self.gl * (v - self.el);
            ctx.current[cv as usize] += i;
        }
    }

    fn advance_state(&mut self, ctx: &mut MechContext<'_>) {
        let dt = ctx.dt;
        for (k, &cv) in self.node_index.iter().enumerate() {
            let v = ctx.voltage[cv as usize];
            let (m_inf, m_tau) = gate_m(v);
            let (h_inf, h_tau) = gate_h(v);
            let (n_inf, n_tau) = gate_n(v);
            self.m[k] = exp_euler(self.m[k], m_inf, m_tau, dt);
            self.h[k] = exp_euler(self.h[k], h_inf, h_tau, dt);
            self.n[k] = exp_euler(self.n[k], n_inf, n_tau, dt);
        }
    }
}

/// One exponential-Euler relaxation step toward `inf` with time constant
/// `tau`.
fn exp_euler(x: f64, inf: f64, tau: f64, dt: f64) -> f64 {
    inf + (x - inf) * (-dt / tau).exp()
}

/// `x / (exp(x/y) − 1)`, guarded near the removable singularity at `x = 0`.
fn vtrap(x: f64, y: f64) -> f64 {
    if (x / y).abs() < 1e-6 {
        y * (1.0 - x / y / 2.0)
    } else {
        x / ((x / y).exp() - 1.0)
    }
}

fn gate_m(v: f64) -> (f64, f64) {
    let alpha = 0.1 * vtrap(-(v + 40.0), 10.0);
    let beta = 4.0 * (-(v + 65.0) / 18.0).exp();
    rates(alpha, beta)
}

fn gate_h(v: f64) -> (f64, f64) {
    let alpha = 0.07 * (-(v + 65.0) / 20.0).exp();
    let beta = 1.0 / ((-(v + 35.0) / 10.0).exp() + 1.0);
    rates(alpha, beta)
}

fn gate_n(v: f64) -> (f64, f64) {
    let alpha = 0.01 * vtrap(-(v + 55.0), 10.0);
    let beta = 0.125 * (-(v + 65.0) / 80.0).exp();
    rates(alpha, beta)
}

fn rates(alpha: f64, beta: f64) -> (f64, f64) {
    let sum = alpha + beta;
    (alpha / sum, 1.0 / sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanism::testing;
    use proptest::prelude::*;

    #[test]
    fn init_sets_resting_steady_state() {
        let mut hh = Hh::new(vec![0]);
        let voltage = vec![-65.0];
        let mut current = vec![0.0];
        let ions = testing::empty_ions();
        hh.init(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));

        // Textbook steady-state values at rest.
        assert!((hh.m[0] - 0.0529).abs() < 1e-3, "m = {}", hh.m[0]);
        assert!((hh.h[0] - 0.5961).abs() < 1e-3, "h = {}", hh.h[0]);
        assert!((hh.n[0] - 0.3177).abs() < 1e-3, "n = {}", hh.n[0]);
    }

    #[test]
    fn state_is_stationary_at_steady_state() {
        let mut hh = Hh::new(vec![0]);
        let voltage = vec![-65.0];
        let mut current = vec![0.0];
        let ions = testing::empty_ions();
        hh.init(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));
        let (m0, h0, n0) = (hh.m[0], hh.h[0], hh.n[0]);

        hh.advance_state(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));
        assert!((hh.m[0] - m0).abs() < 1e-12);
        assert!((hh.h[0] - h0).abs() < 1e-12);
        assert!((hh.n[0] - n0).abs() < 1e-12);
    }

    #[test]
    fn depolarization_opens_m_gate() {
        let mut hh = Hh::new(vec![0]);
        let rest = vec![-65.0];
        let mut current = vec![0.0];
        let ions = testing::empty_ions();
        hh.init(&mut testing::ctx(0.0, 0.01, &rest, &mut current, &ions));
        let m0 = hh.m[0];

        let depolarized = vec![-20.0];
        for _ in 0..100 {
            hh.advance_state(&mut testing::ctx(0.0, 0.01, &depolarized, &mut current, &ions));
        }
        assert!(hh.m[0] > m0 * 5.0, "m failed to open: {}", hh.m[0]);
    }

    #[test]
    fn current_accumulates_only_on_own_nodes() {
        let mut hh = Hh::new(vec![1]);
        let voltage = vec![-65.0, -20.0, -65.0];
        let mut current = vec![0.0; 3];
        let ions = testing::empty_ions();
        hh.init(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));
        hh.compute_current(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));
        assert_eq!(current[0], 0.0);
        assert_eq!(current[2], 0.0);
        assert_ne!(current[1], 0.0);
    }

    #[test]
    fn vtrap_is_continuous_at_zero() {
        let near = vtrap(1e-9, 10.0);
        let at = vtrap(0.0, 10.0);
        assert!((near - at).abs() < 1e-6);
        assert!((at - 10.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn gates_stay_in_unit_interval(v in -120.0f64..60.0) {
            for (inf, tau) in [gate_m(v), gate_h(v), gate_n(v)] {
                prop_assert!((0.0..=1.0).contains(&inf), "inf = {inf} at v = {v}");
                prop_assert!(tau > 0.0, "tau = {tau} at v = {v}");
            }
        }

        #[test]
        fn exp_euler_is_a_contraction(
            x in 0.0f64..1.0,
            inf in 0.0f64..1.0,
            tau in 0.01f64..20.0,
            dt in 0.001f64..0.1,
        ) {
            let next = exp_euler(x, inf, tau, dt);
            prop_assert!((next - inf).abs() <= (x - inf).abs() + 1e-15);
        }
    }
}
