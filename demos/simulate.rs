use std::io::{self, StdoutLock, Write};

use keplerian_table::{presets, Body, OrbitSolver, Scales, SolverConfig, System};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Simulation days per tick.
const TICK: f64 = 1.0;
const SIMULATION_TICKS: u64 = 3650;
const PRINT_EVERY: u64 = 365;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut system = generate_solar_system();
    describe_system(&system);

    let mut lock = io::stdout().lock();
    eprintln!("Simulating {SIMULATION_TICKS} ticks...");
    for t in 0..SIMULATION_TICKS {
        system.tick(TICK);
        if t % PRINT_EVERY == 0 {
            writeln!(&mut lock, "=== Tick {t} ===").unwrap();
            print_all_body_positions(&mut lock, &system);
        }
    }
}

fn generate_solar_system() -> System {
    // Periods are given in years, ticks are in days. Internal velocities are
    // then AU per day; 1 AU/day is about 1731 km/s.
    let config = SolverConfig {
        scales: Scales {
            mass_scale: 5.972e24,
            velocity_to_kms: 1731.46,
            years_to_time: 365.25,
        },
        ..SolverConfig::default()
    };

    let mut rng = StdRng::seed_from_u64(2025);
    let mut system = System::new();

    for (name, params) in presets::planets::all() {
        let solver = OrbitSolver::with_rng(params, &config, &mut rng).unwrap();
        system.add_body(Body::new(name.to_string(), solver)).unwrap();
    }

    system
}

fn sorted_bodies(system: &System) -> Vec<&Body> {
    let mut bodies = system.get_bodies();
    bodies.sort_by(|a, b| {
        a.solver
            .get_orbital_period()
            .total_cmp(&b.solver.get_orbital_period())
    });
    bodies
}

fn describe_system(system: &System) {
    println!("{system}");

    for body in sorted_bodies(system) {
        let solver = &body.solver;
        println!(
            "{}: period {:.2} days, mass {:.3e} kg, pericenter {:.4} AU, apocenter {:.4} AU",
            body.name,
            solver.get_orbital_period(),
            body.mass(),
            solver.get_parameters().pericenter,
            solver.get_apocenter(),
        );
    }
}

fn print_all_body_positions(lock: &mut StdoutLock, system: &System) {
    for body in sorted_bodies(system) {
        let p = body.position;
        writeln!(
            lock,
            "{:>8}: ({:>9.4}, {:>9.4}, {:>9.4}) AU, {:>6.2} km/s",
            body.name,
            p.x,
            p.y,
            p.z,
            body.solver.get_velocity_magnitude(),
        )
        .unwrap();
    }
}
