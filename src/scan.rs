//! Photon survival as a function of energy

#[cfg(not(feature = "serial"))]
use rayon::prelude::*;

use crate::conversion::JetAlp;
use crate::error::Result;
use crate::mixing::DeltaTerms;
use crate::state::{DensityMatrix, photon_survival};

/// Photon survival probability at a single energy
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpectralPoint {
    /// Photon energy, GeV
    pub energy: f64,
    /// From the full chain of domains
    pub survival: f64,
    /// From the single-step estimate
    pub analytical_survival: f64,
}

/// Evaluates the photon survival probability of a beam with initial state
/// `rho` at each of `energies`. Energies are independent of one another and
/// computed in parallel; the first failure aborts the scan.
pub fn energy_scan<D>(jet: &JetAlp<D>, energies: &[f64], rho: &DensityMatrix) -> Result<Vec<SpectralPoint>>
where D: DeltaTerms + Clone + Send {
    let evaluate = |&energy: &f64| -> Result<SpectralPoint> {
        let jet = jet.at_energy(energy)?;
        let u = jet.transfer_matrix()?;
        let v = jet.analytical_transfer_matrix()?;
        Ok(SpectralPoint {
            energy,
            survival: photon_survival(&u, rho),
            analytical_survival: photon_survival(&v, rho),
        })
    };

    #[cfg(not(feature = "serial"))]
    let points = energies.par_iter().map(evaluate).collect();

    #[cfg(feature = "serial")]
    let points = energies.iter().map(evaluate).collect();

    points
}

/// `n` energies spaced evenly in logarithm between `emin` and `emax`
pub fn log_energies(emin: f64, emax: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![emin],
        _ => {
            let step = (emax / emin).ln() / ((n - 1) as f64);
            (0..n).map(|i| emin * (step * (i as f64)).exp()).collect()
        }
    }
}
