//! Mech Solver Example - cantilever beam and the companion models
//!
//! Usage: `mech-example [cantilever.json]`. Without an argument the
//! reference cantilever (L = 1 m, steel, 100x100 mm section, 1 kN tip
//! load, 20 elements) is solved.

use anyhow::{Context, Result};

use mech_solver::prelude::*;
use mech_solver::results::SectionCheck;
use mech_solver::thermal::FlowArrangement;

fn load_input() -> Result<CantileverInput> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path))
        }
        None => Ok(CantileverInput::default()),
    }
}

fn print_cantilever(input: &CantileverInput) -> Result<()> {
    let result = input.analyze().context("cantilever analysis failed")?;

    println!("=== Cantilever Beam (Euler-Bernoulli FEA) ===\n");
    let beam = result.beam;
    println!(
        "L = {} m, E = {:.3e} Pa, I = {:.4e} m⁴, P = {} N, {} elements",
        beam.length(),
        beam.e(),
        beam.i(),
        input.load,
        beam.num_elements()
    );

    println!("\n{:>8} {:>16} {:>16}", "x (m)", "FEA y (m)", "exact y (m)");
    for node in &result.nodes {
        let exact = analytical_deflection(input.load, beam.e(), beam.i(), beam.length(), node.x);
        println!("{:>8.3} {:>16.6e} {:>16.6e}", node.x, node.y, exact);
    }

    let err = result.reference_error();
    println!("\nTip deflection: {:.6e} m", result.tip_deflection());
    println!("Tip rotation:   {:.6e} rad", result.tip_rotation());
    println!(
        "Fixed-end reactions: R = {:.3} N, M = {:.3} N·m",
        result.reactions.force, result.reactions.moment
    );
    println!(
        "Max |FEA - exact| = {:.3e} m, tip relative error = {:.3e}",
        err.max_abs, err.tip_relative
    );

    if let Some(check) = input.section_check(&result) {
        print_section_check(&check);
    }
    Ok(())
}

fn print_section_check(check: &SectionCheck) {
    println!("Mass: {:.3} kg, G = {:.3e} Pa", check.mass, check.shear_modulus);
    match check.max_bending_stress {
        Some(stress) => println!("Root bending stress: {:.3} MPa", stress / 1e6),
        None => println!("Root bending stress: section depth unknown"),
    }
}

fn print_round_bar() -> Result<()> {
    let material = Material::aluminum();
    let section = Section::circular(0.04);
    let beam = Beam::from_properties(1.5, &material, &section, 10)?;
    let result = analyze_cantilever(&beam, 300.0, &AnalysisOptions::default())?;

    println!("\n=== Aluminum Round Bar Cantilever (d = 40 mm) ===\n");
    println!("Tip deflection: {:.6e} m", result.tip_deflection());
    print_section_check(&result.section_check(&material, &section));
    Ok(())
}

fn print_diagrams() -> Result<()> {
    let diagrams = SimplySupportedBeam::new(10.0, 10_000.0, 4.0)
        .with_samples(11)
        .diagrams()?;

    println!("\n=== Simply Supported Beam: SFD / BMD ===\n");
    println!(
        "Ra = {:.1} N, Rb = {:.1} N",
        diagrams.reactions.left, diagrams.reactions.right
    );
    println!("{:>8} {:>12} {:>14}", "x (m)", "V (N)", "M (N·m)");
    for pt in &diagrams.points {
        println!("{:>8.2} {:>12.1} {:>14.1}", pt.x, pt.shear, pt.moment);
    }
    println!(
        "Max moment {:.1} N·m at x = {} m",
        diagrams.max_moment, diagrams.max_moment_position
    );
    Ok(())
}

fn print_conduction() -> Result<()> {
    let sim = HeatConduction1D::default();
    let history = sim.run()?;

    println!("\n=== 1D Heat Conduction (explicit FDM) ===\n");
    println!(
        "r = {:.4} (limit 0.5), t = {} s",
        sim.fourier_number(),
        history.end_time()
    );
    println!("{:>8} {:>12}", "x (m)", "T (°C)");
    for (x, t) in history.x.iter().zip(history.final_profile()) {
        println!("{:>8.3} {:>12.3}", x, t);
    }
    Ok(())
}

fn print_exchanger() -> Result<()> {
    let streams = ExchangerStreams {
        t_hot_in: 150.0,
        t_cold_in: 30.0,
        c_hot: 2000.0,
        c_cold: 4000.0,
    };
    let sweep = streams.sweep(5.0, 6)?;

    println!("\n=== Heat Exchanger Effectiveness (Cr = {:.2}) ===\n", sweep.capacity_ratio);
    print!("{:>6}", "NTU");
    for arrangement in FlowArrangement::ALL {
        print!(" {:>12}", format!("{:?}", arrangement));
    }
    println!();
    for (k, ntu) in sweep.ntu.iter().enumerate() {
        print!("{:>6.1}", ntu);
        for curve in &sweep.curves {
            print!(" {:>12.4}", curve.effectiveness[k]);
        }
        println!();
    }

    let pipe = DoublePipeExchanger {
        length: 10.0,
        d_inner: 0.05,
        t_hot_in: 120.0,
        t_cold_in: 20.0,
        m_hot: 0.5,
        m_cold: 0.8,
        cp_hot: 4180.0,
        cp_cold: 4180.0,
        u: 500.0,
        segments: 500,
    };
    let march = pipe.march()?;
    println!(
        "\nDouble pipe: Th_out = {:.2} °C, Tc_out = {:.2} °C, Q = {:.1} W, ε = {:.4}",
        march.t_hot_out, march.t_cold_out, march.duty, march.effectiveness
    );
    Ok(())
}

fn print_cycles() -> Result<()> {
    println!("\n=== Air-Standard Cycles ===\n");
    let cycles = [
        ("Otto", OttoCycle::default().solve()?),
        ("Diesel", DieselCycle::default().solve()?),
    ];
    for (name, cycle) in &cycles {
        println!("{} cycle, efficiency {:.2}%", name, cycle.efficiency * 100.0);
        println!("{:>6} {:>12} {:>10} {:>10}", "state", "P (atm)", "V", "T (K)");
        for (k, s) in cycle.states.iter().enumerate() {
            println!(
                "{:>6} {:>12.3} {:>10.4} {:>10.1}",
                k + 1,
                s.pressure,
                s.volume,
                s.temperature
            );
        }
        println!();
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let input = load_input()?;
    print_cantilever(&input)?;
    print_round_bar()?;
    print_diagrams()?;
    print_conduction()?;
    print_exchanger()?;
    print_cycles()?;

    println!("=== Done ===");
    Ok(())
}
