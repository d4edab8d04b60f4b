//! Command dispatch and the interactive front end. A thin shell: every
//! command is a pure call into the parser and calculator plus printing.

use std::io::{self, BufRead, Write as _};

use rayon::prelude::*;

use crate::data::{compare_against_reference, load_units_file, UnitRecord, REFERENCE_COMMIT};
use crate::force::{
    compute_base_force, find_force_bounds, Domain, ForceError, ForceResult, UnitStats,
};
use crate::uniques::{parse_uniques, Modifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rate,
    Batch,
    Compare,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("rate") => Some(Command::Rate),
        Some("batch") => Some(Command::Batch),
        Some("compare") => Some(Command::Compare),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Rate) => handle_rate(),
        Some(Command::Batch) => handle_batch(args),
        Some(Command::Compare) => handle_compare(args),
        None => {
            eprintln!("usage: forcecalc <rate|batch|compare>");
            eprintln!("  rate                                  interactive single-unit rating");
            eprintln!("  batch <units.json> [--csv <out.csv>]  rate every unit in a fixture");
            eprintln!("  compare <units.json> <reference.md>   check against the documented table");
            2
        }
    }
}

fn handle_rate() -> i32 {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let strength = prompt_f64(&mut input, "Strength: ");
    let ranged_strength = prompt_f64(&mut input, "Ranged strength (0 if none): ");
    let movement = prompt_f64(&mut input, "Movement: ");
    let naval = prompt_bool(&mut input, "Is it a naval unit? ");
    let nuke = prompt_bool(&mut input, "Is it a nuke? ");

    println!("Unique strings, one per line (blank line to finish):");
    let mut uniques = Vec::new();
    while let Some(line) = read_trimmed_line(&mut input) {
        if line.is_empty() {
            break;
        }
        uniques.push(line);
    }

    let stats = UnitStats {
        strength,
        ranged_strength,
        movement,
        domain: if naval { Domain::Water } else { Domain::Land },
    };
    let mut modifiers = parse_uniques(&uniques);
    if nuke && !modifiers.contains(&Modifier::NuclearWeapon) {
        modifiers.push(Modifier::NuclearWeapon);
    }

    match compute_base_force(&stats, &modifiers) {
        Ok(result) => {
            print_result(&result);
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn print_result(result: &ForceResult) {
    println!();
    println!("*************************");
    println!("Base Unit Force: {}", result.force);
    println!("{}", find_force_bounds(result.force));
    println!("*************************");
    println!(
        "base {:.2} | after movement {:.2} | flat +{:.0} | multiplier x{:.4}",
        result.breakdown.base,
        result.breakdown.after_movement,
        result.breakdown.flat_bonus,
        result.breakdown.multiplier
    );
}

fn handle_batch(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: forcecalc batch <units.json> [--csv <out.csv>]");
        return 2;
    };
    let csv_out = args
        .iter()
        .position(|arg| arg == "--csv")
        .and_then(|i| args.get(i + 1));

    let units = match load_units_file(path) {
        Ok(units) => units,
        Err(err) => {
            eprintln!("failed to load '{path}': {err}");
            return 1;
        }
    };

    // Evaluations share no state; rate them in parallel.
    let rated: Vec<(&UnitRecord, Result<ForceResult, ForceError>)> =
        units.par_iter().map(|unit| (unit, unit.rate())).collect();

    println!("{:<40} {:>10}", "Unit", "Force");
    println!("{}", "-".repeat(51));
    for (unit, outcome) in &rated {
        match outcome {
            Ok(result) => println!("{:<40} {:>10}", unit.name, result.force),
            Err(err) => eprintln!("skipped {}: {err}", unit.name),
        }
    }

    if let Some(out) = csv_out {
        if let Err(err) = write_batch_csv(out, &rated) {
            eprintln!("failed to write csv '{out}': {err}");
            return 1;
        }
        println!("wrote {out}");
    }
    0
}

fn write_batch_csv(
    path: &str,
    rated: &[(&UnitRecord, Result<ForceResult, ForceError>)],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["name", "strength", "ranged_strength", "movement", "force"])?;
    for (unit, outcome) in rated {
        let Ok(result) = outcome else { continue };
        let stats = unit.to_stats();
        writer.write_record([
            unit.name.as_str(),
            &stats.strength.to_string(),
            &stats.ranged_strength.to_string(),
            &stats.movement.to_string(),
            &result.force.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn handle_compare(args: &[String]) -> i32 {
    let (Some(units_path), Some(doc_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: forcecalc compare <units.json> <reference.md>");
        return 2;
    };

    let units = match load_units_file(units_path) {
        Ok(units) => units,
        Err(err) => {
            eprintln!("failed to load '{units_path}': {err}");
            return 1;
        }
    };
    let markdown = match std::fs::read_to_string(doc_path) {
        Ok(markdown) => markdown,
        Err(err) => {
            eprintln!("failed to read '{doc_path}': {err}");
            return 1;
        }
    };

    let rows = compare_against_reference(&units, &markdown);
    println!("expected values pinned at upstream revision {REFERENCE_COMMIT}");
    println!(
        "{:<40} {:>8} {:>12} {:>10}",
        "Unit", "Expected", "Computed", "Delta"
    );
    println!("{}", "-".repeat(75));
    for row in &rows {
        match (row.computed, row.delta()) {
            (Some(computed), Some(delta)) => println!(
                "{:<40} {:>8.2} {:>12.2} {:>10.2}",
                row.name, row.expected, computed, delta
            ),
            _ => println!(
                "{:<40} {:>8.2} {:>12} {:>10}",
                row.name, row.expected, "MISSING", "N/A"
            ),
        }
    }
    0
}

fn read_trimmed_line(input: &mut impl BufRead) -> Option<String> {
    let mut buffer = String::new();
    match input.read_line(&mut buffer) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buffer.trim().to_string()),
    }
}

fn prompt_line(input: &mut impl BufRead, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    read_trimmed_line(input)
}

/// Ask until a number arrives. EOF falls back to 0 so a closed stdin
/// cannot spin the prompt loop.
fn prompt_f64(input: &mut impl BufRead, label: &str) -> f64 {
    loop {
        let Some(line) = prompt_line(input, label) else {
            return 0.0;
        };
        match line.parse::<f64>() {
            Ok(value) => return value,
            Err(_) => eprintln!("enter a number"),
        }
    }
}

/// yes/y/true and no/n/false, re-asking on anything else. EOF means no.
fn prompt_bool(input: &mut impl BufRead, label: &str) -> bool {
    loop {
        let Some(line) = prompt_line(input, label) else {
            return false;
        };
        match line.to_lowercase().as_str() {
            "yes" | "y" | "true" => return true,
            "no" | "n" | "false" => return false,
            _ => eprintln!("answer yes or no"),
        }
    }
}
