use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use jetalp::setup::{Configuration, InputError};
use jetalp::{JetAlp, Matrix3, StandardDeltas, energy_scan, photon_survival, alp_conversion};

fn print_matrix(name: &str, u: &Matrix3) {
    println!("{}:", name);
    for i in 0..3 {
        println!(
            "  [{: >12.5e} {:+.5e}i, {: >12.5e} {:+.5e}i, {: >12.5e} {:+.5e}i]",
            u[(i, 0)].re, u[(i, 0)].im, u[(i, 1)].re, u[(i, 1)].im, u[(i, 2)].re, u[(i, 2)].im,
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Prepare configuration file

    let args: Vec<String> = std::env::args().collect();
    let path = args
        .get(1)
        .ok_or(InputError::InvalidInputFile("no file supplied"))?;
    let path = PathBuf::from(path);
    let output_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut input = Configuration::from_file(&path)?;
    input.with_context("constants");

    let rho = input.initial_state()?;
    let energies = input.energies()?;

    let jet = JetAlp::new(input.jet()?, StandardDeltas)?;
    let config = jet.config();
    let grid = jet.grid()?;

    println!("Jet from {} pc to {} pc in {} domains", config.r_blr, config.r_max, grid.len());
    println!("B = {:e} G, n = {:e} cm^-3 at R_BLR, p = {}, s = {}", config.b, config.n, config.p, config.s);
    println!("g = {} x 1e-11 / GeV, m = {} neV, E = {} GeV, Psi = {} rad", config.g, config.m, config.e, config.psi);

    let runtime = std::time::Instant::now();
    let u = jet.transfer_matrix()?;
    let v = jet.analytical_transfer_matrix()?;
    tracing::info!(elapsed = ?runtime.elapsed(), "computed transfer matrix");

    print_matrix("Transfer matrix", &u);
    print_matrix("Single-step estimate", &v);

    let photons = photon_survival(&u, &rho);
    let alps = alp_conversion(&u, &rho);
    println!("Photon survival = {:.6}, ALP fraction = {:.6}", photons, alps);
    println!("Polarization after jet = {:.6}", rho.evolve(&u).linear_polarization());
    println!("Photon survival (single step) = {:.6}", photon_survival(&v, &rho));

    if !energies.is_empty() {
        let runtime = std::time::Instant::now();
        let spectrum = energy_scan(&jet, &energies, &rho)?;
        tracing::info!(energies = spectrum.len(), elapsed = ?runtime.elapsed(), "completed energy scan");

        let filename = output_dir.join("spectrum.dat");
        let mut file = File::create(&filename)?;
        writeln!(file, "# E [GeV]\tP_surv\tP_surv (single step)")?;
        for point in &spectrum {
            writeln!(file, "{:.6e}\t{:.8e}\t{:.8e}", point.energy, point.survival, point.analytical_survival)?;
        }
        println!("Wrote {} energies to {}", spectrum.len(), filename.display());
    }

    Ok(())
}
