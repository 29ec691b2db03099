//! Strongly-typed handles and the closed ion / state-field enumerations.
//!
//! Handles are issued once by the mechanism binder during engine
//! initialization and stay valid for the lifetime of the engine. They are
//! plain indices under the hood; the newtypes keep the three address spaces
//! (control volumes, synaptic slots, state fields) from being mixed up.

use std::fmt;

/// One of the ionic species shared between membrane mechanisms.
///
/// The set is closed: every mechanism in the catalogue declares its ion
/// dependencies in terms of these three kinds, and the binder allocates one
/// shared state block per kind that at least one mechanism uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IonKind {
    /// Sodium.
    Na,
    /// Potassium.
    K,
    /// Calcium.
    Ca,
}

impl IonKind {
    /// All ion kinds, in binder iteration order.
    pub const fn all() -> [IonKind; 3] {
        [IonKind::Na, IonKind::K, IonKind::Ca]
    }

    /// Conventional lowercase species name (`"na"`, `"k"`, `"ca"`).
    pub const fn name(self) -> &'static str {
        match self {
            IonKind::Na => "na",
            IonKind::K => "k",
            IonKind::Ca => "ca",
        }
    }
}

impl fmt::Display for IonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selector for one of the per-CV state fields a probe can observe.
///
/// Probes address engine state through this selector plus a CV index rather
/// than through references into the engine, so the engine remains the sole
/// owner of its arrays. Extending the observable surface means adding a
/// variant here and one arm in the engine's field accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateField {
    /// Membrane potential [mV].
    Voltage,
    /// Transmembrane current density minus injected density [mA/cm²].
    Current,
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateField::Voltage => f.write_str("voltage"),
            StateField::Current => f.write_str("current"),
        }
    }
}

/// Handle to a spike detector: the global index of the CV it watches.
///
/// The detector observes `voltage[cv]`; threshold crossing is applied by the
/// outer driver, not by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DetectorHandle(pub u32);

impl fmt::Display for DetectorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to one synaptic slot of a point-process mechanism.
///
/// `mechanism` is relative to the engine's synapse base (0 is the first
/// point-process mechanism instantiated); `lid` addresses the slot within
/// that mechanism, in cell-declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetHandle {
    /// Point-process mechanism index, relative to the synapse base.
    pub mechanism: u32,
    /// Local slot id within the mechanism.
    pub lid: u32,
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mechanism, self.lid)
    }
}

/// Handle to a state probe: a field selector plus the CV it reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProbeHandle {
    /// Which state field the probe reads.
    pub field: StateField,
    /// Global CV index.
    pub cv: u32,
}

impl fmt::Display for ProbeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.field, self.cv)
    }
}
