//! Terms of the photon-ALP mixing matrix
//!
//! All terms are momentum differences in kpc^-1, in the units customary
//! for galactic and cluster fields: electron densities in 1e-3 cm^-3,
//! field strengths in μG, couplings in 1e-11 GeV^-1, ALP masses in neV
//! and energies in GeV.

/// Source of the four kinds of mixing term. The propagator only relies on
/// this contract, so alternative parametrizations (or test doubles) can be
/// substituted for [`StandardDeltas`].
pub trait DeltaTerms: Sync {
    /// Plasma term, -ω_pl² / 2E, for density `n` (1e-3 cm^-3) and energy `e` (GeV)
    fn plasma(&self, n: f64, e: f64) -> f64;

    /// Vacuum birefringence (Euler-Heisenberg) term, (α/45π) (B/B_cr)² E,
    /// for field `b` (μG) and energy `e` (GeV)
    fn qed(&self, b: f64, e: f64) -> f64;

    /// Photon-ALP coupling term, g B / 2, for coupling `g` (1e-11 GeV^-1)
    /// and field `b` (μG)
    fn coupling(&self, g: f64, b: f64) -> f64;

    /// ALP mass term, -m² / 2E, for mass `m` (neV) and energy `e` (GeV)
    fn mass(&self, m: f64, e: f64) -> f64;
}

const PLASMA_COEFF: f64 = -1.1e-7;
const QED_COEFF: f64 = 4.1e-9;
const COUPLING_COEFF: f64 = 1.52e-2;
const MASS_COEFF: f64 = -7.8e-2;

/// Leading-order expressions for the mixing terms, neglecting photon
/// absorption and the CMB contribution to the photon dispersion.
#[derive(Debug, Copy, Clone, Default)]
pub struct StandardDeltas;

impl DeltaTerms for StandardDeltas {
    fn plasma(&self, n: f64, e: f64) -> f64 {
        PLASMA_COEFF * n / e
    }

    fn qed(&self, b: f64, e: f64) -> f64 {
        QED_COEFF * e * b * b
    }

    fn coupling(&self, g: f64, b: f64) -> f64 {
        COUPLING_COEFF * g * b
    }

    fn mass(&self, m: f64, e: f64) -> f64 {
        MASS_COEFF * m * m / e
    }
}
