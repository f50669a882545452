use super::cli_main::prompt;
use crate::Chemistry::adjacency_list::AdjacencyMolecule;
use crate::Estimator::arrhenius::{Arrhenius, ReactionSummary};
use crate::Estimator::errors::ServiceStatus;
use crate::Estimator::kinetics_service::estimate_reactions;
use crate::Utils::load_from_file::{QueryTask, load_query_from_file};
use crate::settings::ServiceConfig;
use prettytable::{Cell, Row, Table};
use std::fs;

pub fn query_menu(config: &ServiceConfig) {
    if let Err(e) = run_query(config) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}

fn run_query(config: &ServiceConfig) -> Result<(), String> {
    let path = prompt("Path to the task file: ");
    let task: QueryTask<AdjacencyMolecule> = load_query_from_file(&path)?;
    println!(
        "Querying {} with {} reactants and {} products...",
        config.address(),
        task.reactants.len(),
        task.products.len()
    );
    let estimation = estimate_reactions(config, &task.reactants, &task.products)
        .map_err(|e| e.to_string())?;
    if let ServiceStatus::Unavailable(reason) = &estimation.status {
        println!("\x1b[33m{}\x1b[0m", reason);
        return Ok(());
    }
    for notice in &estimation.notices {
        println!("\x1b[33mWARNING: {}\x1b[0m", notice);
    }
    if estimation.reactions.is_empty() {
        println!("The service found no matching reactions.");
        return Ok(());
    }
    let summaries: Vec<ReactionSummary> =
        estimation.reactions.iter().map(|r| r.summary()).collect();
    reactions_table(&summaries).printstd();

    let chosen = prompt("Rate constants k(T) for reaction number (empty to skip): ");
    if !chosen.is_empty() {
        let reaction = chosen
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| estimation.reactions.get(i))
            .ok_or_else(|| format!("'{}' is not a reaction number", chosen))?;
        println!("{}", reaction.equation());
        rate_table(&reaction.kinetics, 300.0, 2000.0, 18).printstd();
    }

    let export = prompt("Save results as JSON (file name, empty to skip): ");
    if !export.is_empty() {
        export_summaries(&export, &summaries)?;
        println!("Results have been written to {}", export);
    }
    Ok(())
}

pub fn reactions_table(summaries: &[ReactionSummary]) -> Table {
    let mut table = Table::new();
    let header = ["Reaction", "A", "units", "n", "Ea, kcal/mol", "comment"];
    table.add_row(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
    for s in summaries {
        table.add_row(Row::new(vec![
            Cell::new(&s.equation),
            Cell::new(&format!("{:e}", s.A)),
            Cell::new(&s.A_units),
            Cell::new(&s.n.to_string()),
            Cell::new(&s.Ea_kcal_mol.to_string()),
            Cell::new(&s.comment),
        ]));
    }
    table
}

/// k(T) on an even temperature grid
#[allow(non_snake_case)]
pub fn rate_table(kinetics: &Arrhenius, T_min: f64, T_max: f64, steps: usize) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("T, K"),
        Cell::new(&format!("k, {}", kinetics.A_units)),
    ]));
    for (T, k) in kinetics.K_const_for_T_range(T_min, T_max, steps) {
        table.add_row(Row::new(vec![
            Cell::new(&format!("{:.1}", T)),
            Cell::new(&format!("{:.4e}", k)),
        ]));
    }
    table
}

pub fn export_summaries(file_name: &str, summaries: &[ReactionSummary]) -> Result<(), String> {
    let content = serde_json::to_string_pretty(summaries)
        .map_err(|e| format!("Failed to serialize results: {}", e))?;
    fs::write(file_name, content).map_err(|e| format!("Failed to write '{}': {}", file_name, e))
}
