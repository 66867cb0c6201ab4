//! Mixing matrix of the photon-ALP system in each domain
//!
//! In a domain of constant field, with the photon polarization basis rotated
//! by Ψ into the frame of the transverse field, the Hamiltonian is
//!
//!   | Δ_⊥  0    0    |
//!   | 0    Δ_∥  Δ_aγ |
//!   | 0    Δ_aγ Δ_a  |
//!
//! The lower block is diagonalized by a rotation through the mixing angle α,
//! with tan 2α = 2Δ_aγ / (Δ_∥ - Δ_a), so its eigenvalues follow in closed form.

use std::f64::consts;
use ndarray::{Array1, Zip};

use crate::constants::*;
use crate::jet::{JetConfig, DomainGrid};

mod deltas;
pub use self::deltas::*;

/// Mixing terms, mixing angle and eigenvalues in every domain, in pc^-1.
#[derive(Debug, Clone)]
pub struct MixingParameters {
    /// Δ_⊥ = Δ_pl + 2 Δ_QED
    pub dperp: Array1<f64>,
    /// Δ_∥ = Δ_pl + 3.5 Δ_QED
    pub dpar: Array1<f64>,
    /// Δ_aγ
    pub dag: Array1<f64>,
    /// Δ_a, identical in all domains
    pub da: Array1<f64>,
    /// Mixing angle α
    pub alpha: Array1<f64>,
    /// Δ_osc = [(Δ_∥ - Δ_a)² + 4 Δ_aγ²]^(1/2)
    pub dosc: Array1<f64>,
    pub ew1: Array1<f64>,
    pub ew2: Array1<f64>,
    pub ew3: Array1<f64>,
}

/// Mixing angle α = 0.5 atan(2 Δ_aγ / (Δ_∥ - Δ_a)).
///
/// At resonance, Δ_∥ = Δ_a, mixing is maximal and α = ±π/4 with the sign
/// of Δ_aγ. If Δ_aγ also vanishes the block is already diagonal and α = 0.
pub fn mixing_angle(dag: f64, dpar: f64, da: f64) -> f64 {
    let denom = dpar - da;
    if denom == 0.0 {
        if dag == 0.0 {
            0.0
        } else {
            dag.signum() * consts::FRAC_PI_4
        }
    } else {
        0.5 * (2.0 * dag / denom).atan()
    }
}

/// Returns (EW1, EW2, EW3) and Δ_osc for a single domain. EW2 <= EW3 always.
pub fn eigenvalues(dperp: f64, dpar: f64, dag: f64, da: f64) -> ([f64; 3], f64) {
    let dosc = ((dpar - da).powi(2) + 4.0 * dag * dag).sqrt();
    let ew = [
        dperp,
        0.5 * (dpar + da - dosc),
        0.5 * (dpar + da + dosc),
    ];
    (ew, dosc)
}

#[cfg(not(feature = "serial"))]
fn combine<F>(a: &Array1<f64>, b: &Array1<f64>, f: F) -> Array1<f64>
where F: Fn(f64, f64) -> f64 + Sync + Send {
    Zip::from(a).and(b).par_map_collect(|&a, &b| f(a, b))
}

#[cfg(feature = "serial")]
fn combine<F>(a: &Array1<f64>, b: &Array1<f64>, f: F) -> Array1<f64>
where F: Fn(f64, f64) -> f64 + Sync + Send {
    Zip::from(a).and(b).map_collect(|&a, &b| f(a, b))
}

impl MixingParameters {
    /// Evaluates the mixing terms at the field strength and density of
    /// each domain of `grid`.
    pub fn evaluate<D: DeltaTerms>(config: &JetConfig, grid: &DomainGrid, deltas: &D) -> MixingParameters {
        let e = config.e;
        let g = config.g;

        let plasma = grid.density().mapv(|n| deltas.plasma(n * DENSITY_TO_MILLI, e));
        let qed = grid.field().mapv(|b| deltas.qed(b * GAUSS_TO_MICROGAUSS, e));

        let dperp = combine(&plasma, &qed, |pl, qed| PER_KPC_TO_PER_PC * (pl + 2.0 * qed));
        let dpar = combine(&plasma, &qed, |pl, qed| PER_KPC_TO_PER_PC * (pl + 3.5 * qed));
        let dag = grid.field().mapv(|b| PER_KPC_TO_PER_PC * deltas.coupling(g, b * GAUSS_TO_MICROGAUSS));
        let da = Array1::from_elem(grid.len(), PER_KPC_TO_PER_PC * deltas.mass(config.m, e));

        let alpha = Zip::from(&dag).and(&dpar).and(&da).map_collect(|&dag, &dpar, &da| mixing_angle(dag, dpar, da));
        let dosc = Zip::from(&dag).and(&dpar).and(&da).map_collect(|&dag, &dpar, &da| eigenvalues(0.0, dpar, dag, da).1);

        let ew1 = dperp.clone();
        let ew2 = Zip::from(&dpar).and(&da).and(&dosc).map_collect(|&dpar, &da, &dosc| 0.5 * (dpar + da - dosc));
        let ew3 = Zip::from(&dpar).and(&da).and(&dosc).map_collect(|&dpar, &da, &dosc| 0.5 * (dpar + da + dosc));

        let degenerate = Zip::from(&dpar).and(&da).fold(0usize, |acc, &dpar, &da| if dpar == da {acc + 1} else {acc});
        if degenerate > 0 {
            tracing::debug!(domains = degenerate, "resonant domains, mixing angle set to maximal");
        }

        tracing::debug!(
            domains = grid.len(),
            dag_inner = dag.get(0).copied().unwrap_or(0.0),
            dosc_inner = dosc.get(0).copied().unwrap_or(0.0),
            "evaluated mixing parameters"
        );

        MixingParameters { dperp, dpar, dag, da, alpha, dosc, ew1, ew2, ew3 }
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// Eigenvalues (EW1, EW2, EW3) of domain `i`
    pub fn eigenvalues_at(&self, i: usize) -> [f64; 3] {
        [self.ew1[i], self.ew2[i], self.ew3[i]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only the coupling term is non-zero
    struct CouplingOnly;

    impl DeltaTerms for CouplingOnly {
        fn plasma(&self, _n: f64, _e: f64) -> f64 { 0.0 }
        fn qed(&self, _b: f64, _e: f64) -> f64 { 0.0 }
        fn coupling(&self, g: f64, b: f64) -> f64 { g * b }
        fn mass(&self, _m: f64, _e: f64) -> f64 { 0.0 }
    }

    #[test]
    fn mixing_angle_limits() {
        assert_eq!(mixing_angle(0.0, 1.0, 0.5), 0.0);
        assert_eq!(mixing_angle(0.0, 0.5, 0.5), 0.0);
        assert_eq!(mixing_angle(1.0, 0.5, 0.5), consts::FRAC_PI_4);
        assert_eq!(mixing_angle(-1.0, 0.5, 0.5), -consts::FRAC_PI_4);
        // weak mixing, α ≈ Δ_aγ / (Δ_∥ - Δ_a)
        let alpha = mixing_angle(1.0e-6, 2.0, 1.0);
        assert!( ((alpha - 1.0e-6) / 1.0e-6).abs() < 1.0e-9 );
    }

    #[test]
    fn eigenvalues_of_lower_block() {
        // the 2x2 block [[Δ_∥, Δ_aγ], [Δ_aγ, Δ_a]] has trace EW2 + EW3
        // and determinant EW2 EW3
        let (dpar, dag, da) = (-3.0, 0.7, 1.2);
        let ([_, ew2, ew3], _) = eigenvalues(0.0, dpar, dag, da);
        assert!( (ew2 + ew3 - (dpar + da)).abs() < 1.0e-12 );
        assert!( (ew2 * ew3 - (dpar * da - dag * dag)).abs() < 1.0e-12 );
    }

    #[test]
    fn eigenvalues_ordered_in_every_domain() {
        let config = JetConfig::default();
        let grid = DomainGrid::new(&config).unwrap();
        let mixing = MixingParameters::evaluate(&config, &grid, &StandardDeltas);
        assert_eq!(mixing.len(), grid.len());
        assert!(mixing.ew2.iter().zip(mixing.ew3.iter()).all(|(ew2, ew3)| ew2 <= ew3));
        assert!(mixing.dosc.iter().all(|d| *d >= 0.0));
        assert!(mixing.alpha.iter().all(|a| a.is_finite()));
        assert!(mixing.da.iter().all(|&da| da == mixing.da[0]));
    }

    #[test]
    fn rescaled_to_inverse_pc() {
        let config = JetConfig { r_max: 0.3001, ..Default::default() };
        let grid = DomainGrid::new(&config).unwrap();
        let mixing = MixingParameters::evaluate(&config, &grid, &StandardDeltas);
        // 0.01 G = 1e4 μG, Δ_aγ = 1.52e-2 g B kpc^-1
        let target = 1.52e-2 * 1.0e4 * 1.0e-3;
        println!("Dag = {:e} pc^-1, target = {:e}", mixing.dag[0], target);
        assert!( ((mixing.dag[0] - target) / target).abs() < 1.0e-12 );
        let target = -1.1e-7 * 1.0e11 * 1.0e-3 + 2.0 * 4.1e-9 * 1.0e8 * 1.0e-3;
        assert!( ((mixing.dperp[0] - target) / target).abs() < 1.0e-12 );
    }

    #[test]
    fn resonance_is_not_nan() {
        let config = JetConfig { r_max: 0.3001, ..Default::default() };
        let grid = DomainGrid::new(&config).unwrap();
        let mixing = MixingParameters::evaluate(&config, &grid, &CouplingOnly);
        assert_eq!(mixing.alpha[0], consts::FRAC_PI_4);
        let target = 2.0 * 1.0e4 * 1.0e-3;
        assert!( ((mixing.dosc[0] - target) / target).abs() < 1.0e-12 );
    }

    #[test]
    fn no_coupling_no_mixing() {
        let config = JetConfig { g: 0.0, ..Default::default() };
        let grid = DomainGrid::new(&config).unwrap();
        let mixing = MixingParameters::evaluate(&config, &grid, &StandardDeltas);
        assert!(mixing.dag.iter().all(|&d| d == 0.0));
        assert!(mixing.alpha.iter().all(|&a| a == 0.0));
    }
}
