//! The time-stepping engine over the lowered state.

use crate::binder::{bind, Handles};
use crate::geometry::Geometry;
use crate::graph::CompartmentGraph;
use crate::matrix::TreeMatrix;
use indexmap::IndexMap;
use neurite_cell::{Cell, IClamp};
use neurite_core::constants::{POINT_CURRENT_TO_DENSITY, RESTING_POTENTIAL};
use neurite_core::{DetectorHandle, IonKind, ModelError, ProbeHandle, StateField, TargetHandle};
use neurite_mech::{Catalogue, IonState, MechContext, Mechanism};

/// Construction-time options for an engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Initial membrane potential, applied by `reset` [mV].
    pub resting_potential: f64,
    /// Mechanism name resolution; defaults to the standard catalogue.
    pub catalogue: Catalogue,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resting_potential: RESTING_POTENTIAL,
            catalogue: Catalogue::standard(),
        }
    }
}

/// The lowered finite-volume multi-cell engine.
///
/// Owns every dense array and mechanism for its lifetime. One caller at a
/// time mutates it; parallelism sits above the engine, with spike routing
/// between steps. No method suspends and no allocation happens during
/// [`FvmEngine::advance`].
///
/// # Examples
///
/// ```
/// use neurite_cell::{Cell, IClamp, Location};
/// use neurite_engine::FvmEngine;
///
/// let mut cell = Cell::new();
/// let soma = cell.add_soma(9.4).unwrap();
/// cell.add_mechanism(soma, "hh").unwrap();
/// cell.add_stimulus(Location::new(0, 0.5), IClamp::new(10.0, 100.0, 0.1)).unwrap();
///
/// let (mut engine, _handles) = FvmEngine::new(&[cell]).unwrap();
/// for _ in 0..100 {
///     engine.advance(0.01);
/// }
/// assert!(engine.is_physical_solution());
/// ```
pub struct FvmEngine {
    t: f64,
    resting_potential: f64,
    graph: CompartmentGraph,
    geometry: Geometry,
    voltage: Vec<f64>,
    current: Vec<f64>,
    matrix: TreeMatrix,
    mechanisms: Vec<Box<dyn Mechanism>>,
    synapse_base: usize,
    ions: IndexMap<IonKind, IonState>,
    stimuli: Vec<(u32, IClamp)>,
    num_probes: usize,
}

impl FvmEngine {
    /// Lower a cell population with the default configuration.
    ///
    /// Returns the engine plus the handle arrays, emitted in
    /// cell-declaration order. Fails without observable state on malformed
    /// input; see [`ModelError`] for the taxonomy.
    pub fn new(cells: &[Cell]) -> Result<(Self, Handles), ModelError> {
        Self::with_config(cells, EngineConfig::default())
    }

    /// Lower a cell population with explicit options.
    pub fn with_config(
        cells: &[Cell],
        config: EngineConfig,
    ) -> Result<(Self, Handles), ModelError> {
        let graph = CompartmentGraph::build(cells)?;
        let geometry = Geometry::compute(cells, &graph)?;
        let bound = bind(cells, &graph, &geometry, &config.catalogue)?;

        let n = graph.len();
        let matrix = TreeMatrix::new(graph.parent().to_vec());
        let num_probes = bound.handles.probes.len();

        let mut engine = Self {
            t: 0.0,
            resting_potential: config.resting_potential,
            graph,
            geometry,
            voltage: vec![0.0; n],
            current: vec![0.0; n],
            matrix,
            mechanisms: bound.mechanisms,
            synapse_base: bound.synapse_base,
            ions: bound.ions,
            stimuli: bound.stimuli,
            num_probes,
        };
        engine.reset();
        Ok((engine, bound.handles))
    }

    /// Take one implicit step of width `dt` [ms].
    ///
    /// The order below is normative: currents must be complete before the
    /// matrix is assembled, and the solve must finish before mechanism
    /// state reads the new voltages. Mechanisms run in declaration order
    /// both times; that order is observable through floating-point
    /// accumulation and is part of the contract.
    pub fn advance(&mut self, dt: f64) {
        let Self {
            t,
            geometry,
            voltage,
            current,
            matrix,
            mechanisms,
            ions,
            stimuli,
            ..
        } = self;

        // 1. Zero the accumulator.
        current.fill(0.0);

        // 2. Mechanism current contributions.
        for mech in mechanisms.iter_mut() {
            let mut ctx = MechContext {
                t: *t,
                dt,
                voltage,
                current,
                ions,
            };
            mech.compute_current(&mut ctx);
        }

        // 3. Stimulus injection: current_ = i_m − i_e.
        for &(cv, clamp) in stimuli.iter() {
            let ie = clamp.amplitude(*t);
            current[cv as usize] -=
                POINT_CURRENT_TO_DENSITY * ie / geometry.area[cv as usize];
        }

        // 4–5. Assemble and solve; the solution lands in the RHS array.
        matrix.assemble(
            dt,
            &geometry.area,
            &geometry.face_alpha,
            &geometry.cv_capacitance,
            voltage,
            current,
        );
        matrix.solve();
        voltage.copy_from_slice(matrix.rhs());

        // 6. Integrate mechanism state against the fresh voltages.
        for mech in mechanisms.iter_mut() {
            let mut ctx = MechContext {
                t: *t,
                dt,
                voltage,
                current,
                ions,
            };
            mech.advance_state(&mut ctx);
        }

        // 7. Advance the clock.
        *t += dt;
    }

    /// Deliver a synaptic event of the given weight [µS].
    ///
    /// Legal between steps only; events delivered between steps `k` and
    /// `k + 1` are observed by step `k + 1`.
    pub fn deliver_event(&mut self, handle: TargetHandle, weight: f64) {
        let index = self.synapse_base + handle.mechanism as usize;
        if let Some(mech) = self.mechanisms.get_mut(index) {
            mech.net_receive(handle.lid, weight);
        }
    }

    /// Revert dynamic state: voltage to rest, clock to zero, mechanism
    /// state to its steady state. Structure and handles are untouched, and
    /// the operation is idempotent.
    pub fn reset(&mut self) {
        let Self {
            t,
            resting_potential,
            voltage,
            current,
            mechanisms,
            ions,
            ..
        } = self;
        voltage.fill(*resting_potential);
        *t = 0.0;
        for mech in mechanisms.iter_mut() {
            let mut ctx = MechContext {
                t: 0.0,
                dt: 0.0,
                voltage,
                current,
                ions,
            };
            mech.init(&mut ctx);
        }
    }

    /// Membrane potential per CV [mV].
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Current density per CV as of the last step [mA/cm²].
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// CV surface areas [µm²].
    pub fn areas(&self) -> &[f64] {
        &self.geometry.area
    }

    /// The flattened compartment topology.
    pub fn graph(&self) -> &CompartmentGraph {
        &self.graph
    }

    /// Direct access to the step system, for inspection.
    pub fn matrix(&self) -> &TreeMatrix {
        &self.matrix
    }

    /// Simulation time [ms].
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Total number of CVs.
    pub fn size(&self) -> usize {
        self.voltage.len()
    }

    /// Number of probe handles emitted at initialization.
    pub fn num_probes(&self) -> usize {
        self.num_probes
    }

    /// The voltage a detector observes [mV].
    pub fn detector_voltage(&self, handle: DetectorHandle) -> f64 {
        self.voltage[handle.0 as usize]
    }

    /// Read one probe.
    pub fn probe(&self, handle: ProbeHandle) -> f64 {
        self.state_field(handle.field)[handle.cv as usize]
    }

    /// The dense array behind a state-field selector.
    pub fn state_field(&self, field: StateField) -> &[f64] {
        match field {
            StateField::Voltage => &self.voltage,
            StateField::Current => &self.current,
        }
    }

    /// Whether the solution is within physically plausible bounds.
    ///
    /// Checks the first CV's potential against ±1000 mV; a cheap blow-up
    /// detector for the outer driver, not an error condition.
    pub fn is_physical_solution(&self) -> bool {
        let v = self.voltage[0];
        v > -1000.0 && v < 1000.0
    }
}
