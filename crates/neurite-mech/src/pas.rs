//! Linear leak conductance (`pas`).

use crate::mechanism::{MechContext, Mechanism, MechanismKind};

/// Default leak conductance [S/cm²].
pub const G: f64 = 1e-3;
/// Default leak reversal potential [mV].
pub const E: f64 = -65.0;

/// The `pas` density mechanism: `i = g·(v − e)`.
///
/// Stateless; `init` and `advance_state` have nothing to do.
#[derive(Clone, Debug)]
pub struct Pas {
    node_index: Vec<u32>,
    g: f64,
    e: f64,
}

impl Pas {
    /// Instantiate over a CV index set with the default parameters.
    pub fn new(node_index: Vec<u32>) -> Self {
        Self {
            node_index,
            g: G,
            e: E,
        }
    }

    /// Instantiate with an explicit conductance [S/cm²] and reversal [mV].
    pub fn with_parameters(node_index: Vec<u32>, g: f64, e: f64) -> Self {
        Self { node_index, g, e }
    }
}

impl Mechanism for Pas {
    fn name(&self) -> &str {
        "pas"
    }

    fn kind(&self) -> MechanismKind {
        MechanismKind::Density
    }

    fn node_index(&self) -> &[u32] {
        &self.node_index
    }

    fn init(&mut self, _ctx: &mut MechContext<'_>) {}

    fn compute_current(&mut self, ctx: &mut MechContext<'_>) {
        for &cv in &self.node_index {
            let v = ctx.voltage[cv as usize];
            ctx.current[cv as usize] += self.g * (v - self.e);
        }
    }

    fn advance_state(&mut self, _ctx: &mut MechContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanism::testing;

    #[test]
    fn no_current_at_reversal() {
        let mut pas = Pas::new(vec![0]);
        let voltage = vec![E];
        let mut current = vec![0.0];
        let ions = testing::empty_ions();
        pas.compute_current(&mut testing::ctx(0.0, 0.01, &voltage, &mut current, &ions));
        assert_eq!(current[0], 0.0);
    }

    #[test]
    fn current_is_linear_in_displacement() {
        let ions = testing::empty_ions();
        let mut pas = Pas::new(vec![0]);

        let mut i_10 = vec![0.0];
        pas.compute_current(&mut testing::ctx(0.0, 0.01, &[E + 10.0], &mut i_10, &ions));
        let mut i_20 = vec![0.0];
        pas.compute_current(&mut testing::ctx(0.0, 0.01, &[E + 20.0], &mut i_20, &ions));

        assert!((i_20[0] - 2.0 * i_10[0]).abs() < 1e-15);
        assert!((i_10[0] - G * 10.0).abs() < 1e-15);
    }
}
