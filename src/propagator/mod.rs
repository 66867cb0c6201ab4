//! Transfer matrices of single domains and of the whole jet

use num::complex::Complex;
#[cfg(not(feature = "serial"))]
use rayon::prelude::*;

use crate::constants::*;
use crate::error::{JetError, Result};
use crate::jet::{JetConfig, DomainGrid, field_at};
use crate::mixing::{DeltaTerms, MixingParameters};

mod matrix3;
pub use self::matrix3::*;

/// Orthogonal projectors onto the eigenstates of the mixing matrix in a
/// single domain.
///
/// With c = cos Ψ, s = sin Ψ, ca = cos α, sa = sin α, the eigenvectors are
///   v1 = (c, -s, 0)
///   v2 = (s sa, c sa, -ca)
///   v3 = (s ca, c ca, sa)
/// and Tk = vk vkᵀ. v1 is the photon polarization that does not couple to
/// the ALP, v2 and v3 span the mixed photon-ALP subspace.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projectors {
    pub t1: Matrix3,
    pub t2: Matrix3,
    pub t3: Matrix3,
}

impl Projectors {
    pub fn new(psi: f64, alpha: f64) -> Projectors {
        let (s, c) = psi.sin_cos();
        let (sa, ca) = alpha.sin_cos();
        Projectors {
            t1: Matrix3::outer([c, -s, 0.0]),
            t2: Matrix3::outer([s * sa, c * sa, -ca]),
            t3: Matrix3::outer([s * ca, c * ca, sa]),
        }
    }

    /// T1 + T2 + T3, which is the identity for a complete set
    pub fn sum(&self) -> Matrix3 {
        self.t1 + self.t2 + self.t3
    }

    /// Un = exp(i EW1 L) T1 + exp(i EW2 L) T2 + exp(i EW3 L) T3, the
    /// propagator through a domain of length `lcoh` (pc) with eigenvalues
    /// `ew` (pc^-1).
    pub fn propagator(&self, ew: [f64; 3], lcoh: f64) -> Matrix3 {
        let phase = |ew: f64| Complex::new(0.0, ew * lcoh).exp();
        phase(ew[0]) * self.t1 + phase(ew[1]) * self.t2 + phase(ew[2]) * self.t3
    }
}

/// Propagator of each domain, ordered from the inner edge outward.
pub fn domain_propagators(config: &JetConfig, grid: &DomainGrid, mixing: &MixingParameters) -> Vec<Matrix3> {
    let psi = config.psi;
    let lcoh = grid.coherence_lengths();
    let build = |i: usize| {
        Projectors::new(psi, mixing.alpha[i]).propagator(mixing.eigenvalues_at(i), lcoh[i])
    };

    #[cfg(not(feature = "serial"))]
    let un = (0..grid.len()).into_par_iter().map(build).collect();

    #[cfg(feature = "serial")]
    let un = (0..grid.len()).map(build).collect();

    un
}

/// Total transfer matrix U = Un[Nd-1] ... Un[1] Un[0]: the first domain
/// traversed is the rightmost factor.
pub fn compose(un: &[Matrix3]) -> Matrix3 {
    un.iter().fold(Matrix3::identity(), |u, un| *un * u)
}

/// Fails if upstream degeneracies leaked NaN or Inf into `u`.
pub fn check_finite(u: Matrix3) -> Result<Matrix3> {
    if u.is_finite() {
        Ok(u)
    } else {
        Err(JetError::NonFiniteResult)
    }
}

/// Approximate transfer matrix of the whole jet in a single step, for
/// strong mixing with a field decaying as r^-p (Tavecchio et al. 2012,
/// eq. 60). The effective phase is
///   x = Δ_aγ(B(Rmax)) (Rmax / R_BLR)^p R_BLR ln(Rmax / R_BLR),
/// which rotates the photon polarization along the field into the ALP.
pub fn analytical<D: DeltaTerms>(config: &JetConfig, deltas: &D) -> Result<Matrix3> {
    config.validate()?;
    let ratio = config.r_max / config.r_blr;
    let b_max = field_at(config, config.r_max);
    let dag = PER_KPC_TO_PER_PC * deltas.coupling(config.g, b_max * GAUSS_TO_MICROGAUSS);
    let x = dag * ratio.powf(config.p) * config.r_blr * ratio.ln();

    let mut u = Matrix3::zero();
    u[(0, 0)] = Complex::new(1.0, 0.0);
    u[(1, 1)] = Complex::new(x.cos(), 0.0);
    u[(1, 2)] = Complex::new(0.0, x.sin());
    u[(2, 1)] = u[(1, 2)];
    u[(2, 2)] = u[(1, 1)];

    tracing::debug!(phase = x, "single-step transfer matrix");
    check_finite(u)
}
