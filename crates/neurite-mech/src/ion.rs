//! Shared ion species state.

use neurite_core::constants;
use neurite_core::IonKind;

/// State block for one ion species, shared by every mechanism using it.
///
/// Owns three arrays over the union of the using mechanisms' CV sets:
/// reversal potential [mV], internal concentration [mM], and external
/// concentration [mM]. Mechanisms address it through the slot maps the
/// binder computes, never through CV indices directly.
#[derive(Clone, Debug)]
pub struct IonState {
    kind: IonKind,
    node_index: Vec<u32>,
    reversal_potential: Vec<f64>,
    internal_concentration: Vec<f64>,
    external_concentration: Vec<f64>,
}

impl IonState {
    /// Create the state block over a sorted, deduplicated CV index set,
    /// filled with the species' default physiological values.
    pub fn new(kind: IonKind, node_index: Vec<u32>) -> Self {
        debug_assert!(node_index.windows(2).all(|w| w[0] < w[1]));
        let n = node_index.len();
        let (ev, xi, xo) = match kind {
            IonKind::Na => (
                constants::NA_REVERSAL_POTENTIAL,
                constants::NA_INTERNAL_CONCENTRATION,
                constants::NA_EXTERNAL_CONCENTRATION,
            ),
            IonKind::K => (
                constants::K_REVERSAL_POTENTIAL,
                constants::K_INTERNAL_CONCENTRATION,
                constants::K_EXTERNAL_CONCENTRATION,
            ),
            IonKind::Ca => (
                constants::ca_reversal_potential(),
                constants::CA_INTERNAL_CONCENTRATION,
                constants::CA_EXTERNAL_CONCENTRATION,
            ),
        };
        Self {
            kind,
            node_index,
            reversal_potential: vec![ev; n],
            internal_concentration: vec![xi; n],
            external_concentration: vec![xo; n],
        }
    }

    /// Which species this block holds.
    pub fn kind(&self) -> IonKind {
        self.kind
    }

    /// The CV indices covered, sorted and distinct.
    pub fn node_index(&self) -> &[u32] {
        &self.node_index
    }

    /// Number of covered CVs.
    pub fn len(&self) -> usize {
        self.node_index.len()
    }

    /// Whether the block covers no CVs.
    pub fn is_empty(&self) -> bool {
        self.node_index.is_empty()
    }

    /// Reversal potentials [mV], one per covered CV.
    pub fn reversal_potential(&self) -> &[f64] {
        &self.reversal_potential
    }

    /// Internal concentrations [mM], one per covered CV.
    pub fn internal_concentration(&self) -> &[f64] {
        &self.internal_concentration
    }

    /// External concentrations [mM], one per covered CV.
    pub fn external_concentration(&self) -> &[f64] {
        &self.external_concentration
    }

    /// The slot within this block that covers CV `cv`, if any.
    pub fn slot_of(&self, cv: u32) -> Option<u32> {
        self.node_index.binary_search(&cv).ok().map(|i| i as u32)
    }
}
