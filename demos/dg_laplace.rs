//! Solves the Laplace problem on the unit square and writes samples of the solution.
//!
//! Usage: `dg_laplace [config.json]`. The configuration is a JSON object with the fields of
//! `LaplaceConfig`, missing fields take their default values. Samples are written to
//! `result.data` as `x y value` lines on a 101 x 101 grid and a JSON report is printed.
use eyre::WrapErr;
use fenris_iga::io::write_samples;
use fenris_iga::mesh::procedural::evenly_spaced;
use fenris_iga::problem::{DgLaplace, LaplaceConfig, SineBumpSolution};
use std::fs;

fn load_config() -> eyre::Result<LaplaceConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read config {path}"))?;
            serde_json::from_str(&json).wrap_err_with(|| format!("Invalid config {path}"))
        }
        None => Ok(LaplaceConfig {
            elements: 32,
            ..LaplaceConfig::default()
        }),
    }
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let problem = DgLaplace::new(config)?;
    let solution = problem.solve(&SineBumpSolution)?;
    let report = problem.report(&solution, &SineBumpSolution)?;

    let (a, b) = problem.config().domain;
    let samples = evenly_spaced(a, b, 100);
    write_samples("result.data", &solution.function, &samples, &samples)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
