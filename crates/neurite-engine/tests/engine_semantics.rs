//! Engine contract tests: reset, event delivery, probes, handle emission,
//! linearity, and rejection of ill-formed input.

use neurite_cell::{Cell, IClamp, Location, ProbeKind};
use neurite_core::{ModelError, StateField};
use neurite_engine::{EngineConfig, FvmEngine};
use neurite_test_utils::{passive_cable_cell, passive_soma, soma_with_synapse};

// ── Reset semantics ────────────────────────────────────────────────

#[test]
fn reset_restores_rest_and_replays_bit_identically() {
    let build = || {
        let mut cell = passive_soma();
        cell.add_stimulus(Location::new(0, 0.5), IClamp::new(2.0, 20.0, 0.08))
            .unwrap();
        cell
    };

    let (mut fresh, _) = FvmEngine::new(&[build()]).unwrap();
    let mut fresh_trace = Vec::new();
    for _ in 0..400 {
        fresh.advance(0.025);
        fresh_trace.push(fresh.voltage()[0].to_bits());
    }

    let (mut reused, _) = FvmEngine::new(&[build()]).unwrap();
    for _ in 0..137 {
        reused.advance(0.025);
    }
    reused.reset();
    assert_eq!(reused.time(), 0.0);
    assert!(reused.voltage().iter().all(|&v| v == -65.0));

    let mut replay_trace = Vec::new();
    for _ in 0..400 {
        reused.advance(0.025);
        replay_trace.push(reused.voltage()[0].to_bits());
    }
    assert_eq!(fresh_trace, replay_trace);
}

// ── Event delivery ─────────────────────────────────────────────────

#[test]
fn zero_weight_event_is_a_no_op() {
    let (mut control, _) = FvmEngine::new(&[soma_with_synapse()]).unwrap();
    let (mut stimulated, handles) = FvmEngine::new(&[soma_with_synapse()]).unwrap();
    let target = handles.targets[0];

    for step in 0..200 {
        if step == 50 {
            stimulated.deliver_event(target, 0.0);
        }
        control.advance(0.05);
        stimulated.advance(0.05);
    }
    assert_eq!(
        control.voltage()[0].to_bits(),
        stimulated.voltage()[0].to_bits()
    );
}

#[test]
fn synaptic_event_depolarizes_within_one_step() {
    let (mut control, _) = FvmEngine::new(&[soma_with_synapse()]).unwrap();
    let (mut stimulated, handles) = FvmEngine::new(&[soma_with_synapse()]).unwrap();
    let target = handles.targets[0];

    for _ in 0..100 {
        control.advance(0.1);
        stimulated.advance(0.1);
    }
    stimulated.deliver_event(target, 0.01);
    control.advance(0.1);
    stimulated.advance(0.1);

    let shift = stimulated.voltage()[0] - control.voltage()[0];
    assert!(shift > 1.0, "event shifted the soma by only {shift} mV");
    assert!(stimulated.is_physical_solution());
}

#[test]
fn events_address_slots_independently() {
    let mut cell = passive_soma();
    cell.add_synapse(Location::new(0, 0.5), "expsyn").unwrap();
    cell.add_synapse(Location::new(0, 0.5), "expsyn").unwrap();
    let (mut engine, handles) = FvmEngine::new(&[cell]).unwrap();
    assert_eq!(handles.targets.len(), 2);

    // Driving only the second slot still depolarizes, proving lid routing.
    engine.deliver_event(handles.targets[1], 0.005);
    engine.advance(0.1);
    assert!(engine.voltage()[0] > -65.0);
}

// ── Probes and observables ─────────────────────────────────────────

#[test]
fn voltage_probe_tracks_the_soma() {
    let mut cell = passive_soma();
    cell.add_stimulus(Location::new(0, 0.5), IClamp::new(0.0, 50.0, 0.05))
        .unwrap();
    cell.add_probe(Location::new(0, 0.5), ProbeKind::MembraneVoltage)
        .unwrap();
    let (mut engine, handles) = FvmEngine::new(&[cell]).unwrap();
    let probe = handles.probes[0];
    assert_eq!(probe.field, StateField::Voltage);
    assert_eq!(engine.num_probes(), 1);

    for _ in 0..100 {
        engine.advance(0.025);
        assert_eq!(engine.probe(probe).to_bits(), engine.voltage()[0].to_bits());
    }
}

#[test]
fn current_probe_reads_the_post_stimulus_accumulator() {
    let mut cell = passive_soma();
    cell.add_stimulus(Location::new(0, 0.5), IClamp::new(0.0, 50.0, 0.1))
        .unwrap();
    cell.add_probe(Location::new(0, 0.5), ProbeKind::MembraneCurrent)
        .unwrap();
    let (mut engine, handles) = FvmEngine::new(&[cell]).unwrap();
    let probe = handles.probes[0];

    // First step: the membrane is exactly at the leak reversal, so the
    // mechanism contributes nothing and the accumulator holds just the
    // injected density, i_m − i_e = −100·0.1/area.
    engine.advance(0.025);
    let expected = -100.0 * 0.1 / engine.areas()[0];
    let got = engine.probe(probe);
    assert!(
        (got - expected).abs() < 1e-12,
        "current probe read {got}, expected {expected}"
    );
}

#[test]
fn detector_reads_the_membrane_voltage() {
    let mut cell = passive_soma();
    cell.add_detector(Location::new(0, 0.5), 0.0).unwrap();
    let (engine, handles) = FvmEngine::new(&[cell]).unwrap();
    assert_eq!(engine.detector_voltage(handles.detectors[0]), -65.0);
}

// ── Handle emission totals and order ───────────────────────────────

#[test]
fn handle_counts_match_cell_totals() {
    let mut a = passive_cable_cell(4);
    a.add_detector(Location::new(0, 0.5), 0.0).unwrap();
    a.add_synapse(Location::new(1, 0.5), "expsyn").unwrap();
    a.add_probe(Location::new(0, 0.5), ProbeKind::MembraneVoltage)
        .unwrap();
    a.add_probe(Location::new(1, 1.0), ProbeKind::MembraneCurrent)
        .unwrap();

    let mut b = soma_with_synapse();
    b.add_detector(Location::new(0, 0.5), -10.0).unwrap();

    let cells = vec![a, b];
    let expected_detectors: usize = cells.iter().map(|c| c.detectors().len()).sum();
    let expected_targets: usize = cells.iter().map(|c| c.synapses().len()).sum();
    let expected_probes: usize = cells.iter().map(|c| c.probes().len()).sum();

    let (engine, handles) = FvmEngine::new(&cells).unwrap();
    assert_eq!(handles.detectors.len(), expected_detectors);
    assert_eq!(handles.targets.len(), expected_targets);
    assert_eq!(handles.probes.len(), expected_probes);
    assert_eq!(engine.num_probes(), expected_probes);

    // Cell a's detector precedes cell b's, and b's sits in b's CV block.
    assert!(handles.detectors[0].0 < handles.detectors[1].0);
    assert_eq!(
        handles.detectors[1].0,
        engine.graph().cell_compartments().range(1).start
    );
}

// ── Passive linearity ──────────────────────────────────────────────

#[test]
fn passive_response_scales_linearly_with_stimulus() {
    let deflection = |amplitude: f64| -> f64 {
        let mut cell = passive_soma();
        cell.add_stimulus(Location::new(0, 0.5), IClamp::new(0.0, 50.0, amplitude))
            .unwrap();
        let (mut engine, _) = FvmEngine::new(&[cell]).unwrap();
        for _ in 0..400 {
            engine.advance(0.025);
        }
        engine.voltage()[0] - (-65.0)
    };

    let single = deflection(0.05);
    let double = deflection(0.10);
    assert!(single > 0.0);
    assert!(
        ((double - 2.0 * single) / single).abs() < 1e-9,
        "single = {single}, double = {double}"
    );
}

// ── Multi-cell independence ────────────────────────────────────────

#[test]
fn cells_do_not_couple_through_the_matrix() {
    let mut driven = passive_soma();
    driven
        .add_stimulus(Location::new(0, 0.5), IClamp::new(0.0, 50.0, 0.1))
        .unwrap();
    let quiet = passive_cable_cell(3);

    let (mut engine, _) = FvmEngine::new(&[driven, quiet]).unwrap();
    for _ in 0..200 {
        engine.advance(0.025);
    }

    // The driven soma moved; every CV of the quiet cell stayed at rest.
    assert!(engine.voltage()[0] > -64.0);
    for &v in &engine.voltage()[1..] {
        assert!((v - (-65.0)).abs() < 1e-9, "quiet cell drifted to {v}");
    }
}

// ── Ill-formed input ───────────────────────────────────────────────

#[test]
fn empty_population_is_rejected() {
    assert!(matches!(
        FvmEngine::new(&[]).err(),
        Some(ModelError::NoCells)
    ));
}

#[test]
fn zero_compartment_cell_is_rejected_without_partial_state() {
    let cells = vec![passive_soma(), Cell::new()];
    match FvmEngine::new(&cells).err() {
        Some(ModelError::EmptyCell { cell }) => assert_eq!(cell, 1),
        other => panic!("expected EmptyCell, got {other:?}"),
    }
}

#[test]
fn unknown_mechanism_is_rejected() {
    let mut cell = Cell::new();
    let soma = cell.add_soma(9.4).unwrap();
    cell.add_mechanism(soma, "kdr2").unwrap();
    match FvmEngine::new(&[cell]).err() {
        Some(ModelError::UnknownMechanism { name }) => assert_eq!(name, "kdr2"),
        other => panic!("expected UnknownMechanism, got {other:?}"),
    }
}

#[test]
fn restricted_catalogue_applies() {
    let mut config = EngineConfig::default();
    config.catalogue = neurite_mech::Catalogue::empty();
    match FvmEngine::with_config(&[passive_soma()], config).err() {
        Some(ModelError::UnknownMechanism { name }) => assert_eq!(name, "pas"),
        other => panic!("expected UnknownMechanism, got {other:?}"),
    }
}
