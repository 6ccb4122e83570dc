//! Invariants that must hold after every step
//!
//! - Determinism: same seed and inputs give bit-identical fields
//! - No penetration: edge-normal velocity is exactly zero
//! - Speed bound: each velocity component stays within `max_speed`
//! - Temperature never exceeds `max_temp`

mod common;

use convection_sim_core::{ConvectionSimulation, ControlParams, SimulationConfig};

const WIDTH: usize = 60;
const HEIGHT: usize = 80;

fn assert_edge_normals_zero(sim: &ConvectionSimulation) {
    let (w, h) = (sim.width(), sim.height());
    for x in 0..w {
        assert_eq!(sim.velocity_y().get(x, 0), 0.0, "top edge x={x}");
        assert_eq!(sim.velocity_y().get(x, h - 1), 0.0, "bottom edge x={x}");
    }
    for y in 0..h {
        assert_eq!(sim.velocity_x().get(0, y), 0.0, "left edge y={y}");
        assert_eq!(sim.velocity_x().get(w - 1, y), 0.0, "right edge y={y}");
    }
}

#[test]
fn test_same_seed_is_bit_reproducible() {
    let mut a = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 1234).unwrap();
    let mut b = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 1234).unwrap();
    for sim in [&mut a, &mut b] {
        sim.set_heat_power(80.0);
        sim.set_diffusion_rate(20.0);
    }

    for _ in 0..60 {
        a.advance();
        b.advance();
    }

    let bits = |sim: &ConvectionSimulation| -> Vec<u32> {
        sim.temperature()
            .as_slice()
            .iter()
            .chain(sim.velocity_x().as_slice())
            .chain(sim.velocity_y().as_slice())
            .map(|v| v.to_bits())
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn test_different_seeds_diverge() {
    let a = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 1).unwrap();
    let b = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 2).unwrap();
    assert_ne!(a.temperature(), b.temperature());
}

#[test]
fn test_invariants_hold_every_step() {
    let mut sim = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 77).unwrap();
    sim.set_heat_power(100.0);
    let max_speed = sim.config().max_speed;
    let max_temp = sim.config().max_temp;

    for step in 0..150 {
        sim.advance();
        assert_edge_normals_zero(&sim);

        let fields = [sim.velocity_x(), sim.velocity_y()];
        for field in fields {
            assert!(
                field.as_slice().iter().all(|v| v.abs() <= max_speed),
                "speed bound violated at step {step}"
            );
        }
        assert!(
            sim.temperature()
                .as_slice()
                .iter()
                .all(|&t| t.is_finite() && t <= max_temp),
            "temperature out of range at step {step}"
        );
    }
}

#[test]
fn test_extreme_forcing_stays_bounded() {
    let mut config = SimulationConfig::default();
    config.buoyancy.rise_strength = 50.0;
    config.buoyancy.sink_strength = 50.0;
    config.heat_source.impulse *= 100.0;
    let mut sim = ConvectionSimulation::with_config(WIDTH, HEIGHT, config, 5).unwrap();
    sim.set_controls(ControlParams {
        heat_power: 0.5,
        diffusion_rate: 0.04,
    });

    for _ in 0..40 {
        sim.advance();
        assert_edge_normals_zero(&sim);
    }
    let stats = sim.stats();
    assert!(stats.peak_speed <= config.max_speed);
    assert!(stats.mean_temperature.is_finite());
}

#[test]
fn test_pause_and_resume_is_seamless() {
    let mut continuous = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 99).unwrap();
    let mut interrupted = continuous.clone();

    for _ in 0..20 {
        continuous.advance();
    }

    for _ in 0..10 {
        interrupted.advance();
    }
    // The host stops calling advance, renders a few paused frames, then resumes
    let mut frame = vec![0_u8; interrupted.pixel_buffer_len()];
    for _ in 0..3 {
        interrupted.render(&mut frame).unwrap();
    }
    for _ in 0..10 {
        interrupted.advance();
    }

    assert_eq!(continuous.fields(), interrupted.fields());
    assert_eq!(interrupted.step_count(), 20);
}

#[test]
fn test_control_change_applies_to_next_step() {
    let mut low = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 11).unwrap();
    let mut high = low.clone();
    low.set_heat_power(0.0);
    high.set_heat_power(100.0);

    low.advance();
    high.advance();

    let (low, high) = (low.stats(), high.stats());
    assert!(
        high.mean_temperature > low.mean_temperature,
        "more heat power must put more heat in"
    );
}

#[test]
fn test_raw_controls_cannot_break_bounds() {
    let mut sim = ConvectionSimulation::new(WIDTH, HEIGHT, 0.18, 21).unwrap();
    sim.set_controls(ControlParams {
        heat_power: f32::NAN,
        diffusion_rate: f32::INFINITY,
    });
    let max_speed = sim.config().max_speed;

    for _ in 0..5 {
        sim.advance();
    }

    let velocities = sim
        .velocity_x()
        .as_slice()
        .iter()
        .chain(sim.velocity_y().as_slice());
    for &v in velocities {
        assert!(v.is_finite() && v.abs() <= max_speed, "velocity {v} out of bounds");
    }
    assert!(sim.temperature().as_slice().iter().all(|t| t.is_finite()));
}

#[test]
fn test_default_grid_runs_stably() {
    let mut sim = ConvectionSimulation::new(160, 200, 0.18, 2024).unwrap();
    let mut frame = vec![0_u8; sim.pixel_buffer_len()];
    for _ in 0..60 {
        sim.advance();
    }
    sim.render(&mut frame).unwrap();

    let stats = sim.stats();
    assert!(stats.peak_temperature > 0.18 + 0.05, "source must heat up");
    assert!(stats.mean_temperature.is_finite());
    assert!(frame.chunks_exact(4).all(|px| px[3] == 255));
    // Warmest pixel is no longer the cold anchor
    assert!(frame.chunks_exact(4).any(|px| px[0] > 30));
}
