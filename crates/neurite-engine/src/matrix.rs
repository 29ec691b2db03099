//! The tree-sparse backward-Euler system and its O(N) solver.
//!
//! One implicit step solves `M·V = r` where `M` is symmetric with non-zeros
//! only on the diagonal and on the `(i, parent[i])` edges. Because each
//! cell's compartments are numbered so that `parent[i] < i` away from the
//! root, a single reverse sweep eliminates every off-diagonal and a forward
//! sweep back-substitutes: Gaussian elimination without fill-in.
//!
//! # Units
//!
//! The diagonal is kept in µm² (CV areas). `face_alpha` carries
//! µm·m²/(cm·s), and 1 µm·m²/(cm·s) = 10⁻⁴ m²/s = 10⁵ µm²/ms, so
//! `1e5·dt·face_alpha` lands in µm² alongside the areas. On the right-hand
//! side, (mA/cm²)/(F/m²) = 10 mV/ms, so `10·dt/cv_capacitance` converts the
//! accumulated current density into a voltage increment in mV.

use neurite_core::constants::{CURRENT_TO_MV_PER_MS, FACE_ALPHA_TO_UM2_PER_MS};

/// The matrix `M` and right-hand side of one implicit step, stored as
/// per-CV bands over the parent-indexed tree.
///
/// For `i > 0` with parent `p`: `d[i]` is the diagonal entry `M[i][i]`,
/// `u[i]` the entry `M[p][i]`, and `l[i]` the entry `M[i][p]`. Cell roots
/// are self-parented and carry zero off-diagonals.
#[derive(Clone, Debug)]
pub struct TreeMatrix {
    parent: Vec<u32>,
    d: Vec<f64>,
    u: Vec<f64>,
    l: Vec<f64>,
    rhs: Vec<f64>,
}

impl TreeMatrix {
    /// Create an all-zero system over a parent vector.
    pub fn new(parent: Vec<u32>) -> Self {
        debug_assert!(parent.iter().enumerate().all(|(i, &p)| p as usize <= i));
        let n = parent.len();
        Self {
            parent,
            d: vec![0.0; n],
            u: vec![0.0; n],
            l: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    /// Number of CVs.
    pub fn size(&self) -> usize {
        self.parent.len()
    }

    /// Assemble the system for a step of width `dt` [ms].
    ///
    /// `d[i] = area[i] + Σ couplings`, off-diagonals are the negated
    /// couplings, and `rhs[i] = area[i]·(voltage[i] −
    /// (10·dt/cv_capacitance[i])·current[i])`. All couplings are positive,
    /// so the system is strictly diagonally dominant.
    pub fn assemble(
        &mut self,
        dt: f64,
        area: &[f64],
        face_alpha: &[f64],
        cv_capacitance: &[f64],
        voltage: &[f64],
        current: &[f64],
    ) {
        let n = self.size();
        self.d.copy_from_slice(area);
        self.u.fill(0.0);
        self.l.fill(0.0);

        for i in 1..n {
            let a = FACE_ALPHA_TO_UM2_PER_MS * dt * face_alpha[i];
            self.d[i] += a;
            self.l[i] = -a;
            self.u[i] = -a;
            self.d[self.parent[i] as usize] += a;
        }

        for i in 0..n {
            let factor = CURRENT_TO_MV_PER_MS * dt / cv_capacitance[i];
            self.rhs[i] = area[i] * (voltage[i] - factor * current[i]);
        }
    }

    /// Solve the assembled system in place; the solution replaces the RHS.
    ///
    /// Reverse sweep: eliminate each CV from its parent's row. Forward
    /// sweep: back-substitute from each cell's root outward. Cell roots are
    /// handled by the same arithmetic because their off-diagonals are zero.
    pub fn solve(&mut self) {
        let n = self.size();
        for i in (1..n).rev() {
            let p = self.parent[i] as usize;
            let f = self.u[i] / self.d[i];
            self.d[p] -= f * self.l[i];
            self.rhs[p] -= f * self.rhs[i];
        }
        for i in 0..n {
            let p = self.parent[i] as usize;
            self.rhs[i] = (self.rhs[i] - self.l[i] * self.rhs[p]) / self.d[i];
        }
    }

    /// The right-hand side; after [`TreeMatrix::solve`], the solution.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// The diagonal band.
    pub fn diagonal(&self) -> &[f64] {
        &self.d
    }

    /// The upper band (`M[parent[i]][i]`); zero at cell roots.
    pub fn upper(&self) -> &[f64] {
        &self.u
    }

    /// The lower band (`M[i][parent[i]]`); zero at cell roots.
    pub fn lower(&self) -> &[f64] {
        &self.l
    }
}
