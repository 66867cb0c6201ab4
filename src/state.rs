//! Polarization density matrices of the photon-ALP beam

use crate::propagator::Matrix3;

/// Density matrix ρ of the three-state system (A_x, A_y, a). Evolves
/// under a transfer matrix U as ρ -> U ρ U†.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DensityMatrix(pub Matrix3);

impl DensityMatrix {
    /// Unpolarized photon beam, diag(1/2, 1/2, 0)
    pub fn unpolarized() -> Self {
        DensityMatrix(Matrix3::from_real([
            [0.5, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, 0.0, 0.0],
        ]))
    }

    /// Photons linearly polarized along the first transverse axis
    pub fn polarized_x() -> Self {
        DensityMatrix(Matrix3::outer([1.0, 0.0, 0.0]))
    }

    /// Photons linearly polarized along the second transverse axis
    pub fn polarized_y() -> Self {
        DensityMatrix(Matrix3::outer([0.0, 1.0, 0.0]))
    }

    /// Pure ALP beam
    pub fn alp() -> Self {
        DensityMatrix(Matrix3::outer([0.0, 0.0, 1.0]))
    }

    pub fn evolve(&self, u: &Matrix3) -> Self {
        DensityMatrix(*u * self.0 * u.adjoint())
    }

    pub fn trace(&self) -> f64 {
        self.0.trace().re
    }

    /// Probability of finding a photon, in either polarization
    pub fn photon_fraction(&self) -> f64 {
        self.0[(0, 0)].re + self.0[(1, 1)].re
    }

    /// Probability of finding an ALP
    pub fn alp_fraction(&self) -> f64 {
        self.0[(2, 2)].re
    }

    /// Degree of linear polarization of the photon component
    pub fn linear_polarization(&self) -> f64 {
        let rho = &self.0;
        let i = rho[(0, 0)].re + rho[(1, 1)].re;
        if i <= 0.0 {
            return 0.0;
        }
        let q = rho[(0, 0)].re - rho[(1, 1)].re;
        let u = 2.0 * rho[(0, 1)].re;
        (q * q + u * u).sqrt() / i
    }
}

/// Probability that a photon in initial state `rho` is still a photon after
/// traversing `u`: Tr[(P_x + P_y) U ρ U†]
pub fn photon_survival(u: &Matrix3, rho: &DensityMatrix) -> f64 {
    rho.evolve(u).photon_fraction()
}

/// Probability that a photon in initial state `rho` has converted into an
/// ALP after traversing `u`: Tr[P_a U ρ U†]
pub fn alp_conversion(u: &Matrix3, rho: &DensityMatrix) -> f64 {
    rho.evolve(u).alp_fraction()
}

#[cfg(test)]
mod tests {
    use approx::*;
    use crate::propagator::Projectors;
    use super::*;

    #[test]
    fn identity_conserves_state() {
        let rho = DensityMatrix::unpolarized();
        let u = Matrix3::identity();
        assert_eq!(photon_survival(&u, &rho), 1.0);
        assert_eq!(alp_conversion(&u, &rho), 0.0);
        assert_eq!(rho.linear_polarization(), 0.0);
        assert_eq!(DensityMatrix::polarized_y().linear_polarization(), 1.0);
    }

    #[test]
    fn unitary_evolution_conserves_probability() {
        let u = Projectors::new(0.6, 0.45).propagator([0.1, -1.3, 2.2], 1.9);
        for rho in [DensityMatrix::unpolarized(), DensityMatrix::polarized_x(), DensityMatrix::alp()].iter() {
            let out = rho.evolve(&u);
            assert_abs_diff_eq!(out.trace(), 1.0, epsilon = 1e-13);
            assert_abs_diff_eq!(out.photon_fraction() + out.alp_fraction(), 1.0, epsilon = 1e-13);
            // hermitian
            assert!(out.0.max_deviation(&out.0.adjoint()) < 1.0e-14);
        }
    }

    #[test]
    fn full_conversion() {
        // maximal mixing, Δ_osc L = π converts A_y completely
        let alpha = std::f64::consts::FRAC_PI_4;
        let u = Projectors::new(0.0, alpha).propagator([0.0, -0.5, 0.5], std::f64::consts::PI);
        let p = alp_conversion(&u, &DensityMatrix::polarized_y());
        println!("P(y -> a) = {}", p);
        assert_abs_diff_eq!(p, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(alp_conversion(&u, &DensityMatrix::polarized_x()), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(alp_conversion(&u, &DensityMatrix::unpolarized()), 0.5, epsilon = 1e-12);
    }
}
