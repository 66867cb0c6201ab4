//! Photon-ALP conversion along a jet

use crate::error::Result;
use crate::jet::{JetConfig, DomainGrid};
use crate::mixing::{DeltaTerms, MixingParameters, StandardDeltas};
use crate::propagator::{self, Matrix3};

/// Propagates photon-ALP states through the jet described by a
/// [`JetConfig`], using `D` to evaluate the terms of the mixing matrix.
///
/// Nothing is cached: every call to [`JetAlp::transfer_matrix`] rebuilds
/// the domains, mixing parameters and propagators from the configuration.
#[derive(Debug, Clone)]
pub struct JetAlp<D: DeltaTerms = StandardDeltas> {
    config: JetConfig,
    deltas: D,
}

impl JetAlp<StandardDeltas> {
    /// Jet with the default parameters and the standard mixing terms
    pub fn standard() -> Self {
        JetAlp { config: JetConfig::default(), deltas: StandardDeltas }
    }
}

impl<D: DeltaTerms + Clone> JetAlp<D> {
    pub fn new(config: JetConfig, deltas: D) -> Result<Self> {
        config.validate()?;
        Ok(JetAlp { config, deltas })
    }

    pub fn config(&self) -> &JetConfig {
        &self.config
    }

    /// Returns a new propagation with the named parameters replaced, see
    /// [`JetConfig::updated`].
    pub fn with_update<I, K>(&self, changes: I) -> Result<Self>
    where I: IntoIterator<Item = (K, f64)>, K: AsRef<str> {
        let config = self.config.updated(changes)?;
        Ok(JetAlp { config, deltas: self.deltas.clone() })
    }

    /// Same jet, different photon energy (GeV)
    pub fn at_energy(&self, e: f64) -> Result<Self> {
        self.with_update(Some(("E", e)))
    }

    pub fn grid(&self) -> Result<DomainGrid> {
        DomainGrid::new(&self.config)
    }

    pub fn mixing(&self) -> Result<MixingParameters> {
        let grid = self.grid()?;
        Ok(MixingParameters::evaluate(&self.config, &grid, &self.deltas))
    }

    /// Propagator of each domain, innermost first
    pub fn domain_propagators(&self) -> Result<Vec<Matrix3>> {
        let grid = self.grid()?;
        let mixing = MixingParameters::evaluate(&self.config, &grid, &self.deltas);
        Ok(propagator::domain_propagators(&self.config, &grid, &mixing))
    }

    /// Transfer matrix of the whole jet, the ordered product of the
    /// propagators of all domains.
    pub fn transfer_matrix(&self) -> Result<Matrix3> {
        let un = self.domain_propagators()?;
        let u = propagator::compose(&un);
        tracing::debug!(domains = un.len(), energy = self.config.e, "composed transfer matrix");
        propagator::check_finite(u)
    }

    /// Single-step approximation to [`JetAlp::transfer_matrix`]
    pub fn analytical_transfer_matrix(&self) -> Result<Matrix3> {
        propagator::analytical(&self.config, &self.deltas)
    }
}

#[cfg(test)]
mod tests {
    use num::complex::Complex;
    use crate::error::JetError;
    use super::*;

    /// Scenario of a blazar jet from the BLR out to 1 kpc
    fn blazar() -> JetAlp {
        let config = JetConfig::default()
            .updated(vec![
                ("R_BLR", 0.3), ("Rmax", 1000.0), ("B", 0.01), ("n", 1.0e8), ("s", 2.0), ("p", 1.0),
                ("sens", 0.99), ("g", 1.0), ("m", 1.0), ("E", 1.0), ("Psi", 0.0),
            ])
            .unwrap();
        JetAlp::new(config, StandardDeltas).unwrap()
    }

    #[test]
    fn blazar_scenario() {
        let u = blazar().transfer_matrix().unwrap();
        println!("U =\n{:?}", u);
        assert!(u.is_finite());
        let u00 = u[(0, 0)].norm();
        println!("|U[0,0]| = {}", u00);
        assert!( (u00 - 1.0).abs() < 1.0e-10 );
        assert!(u[(0, 1)].norm() < 1.0e-12);
        assert!(u[(0, 2)].norm() < 1.0e-12);
    }

    #[test]
    fn transfer_matrix_is_unitary() {
        for &psi in [0.0, 0.4, 1.3].iter() {
            let jet = blazar().with_update(vec![("Psi", psi), ("E", 50.0)]).unwrap();
            let u = jet.transfer_matrix().unwrap();
            let dev = (u * u.adjoint()).max_deviation(&Matrix3::identity());
            println!("Psi = {}: |U U^+ - 1| = {:e}", psi, dev);
            assert!(dev < 1.0e-9);
        }
    }

    #[test]
    fn no_coupling_no_conversion() {
        let jet = blazar().with_update(vec![("g", 0.0), ("Psi", 0.7)]).unwrap();
        let mixing = jet.mixing().unwrap();
        assert!(mixing.alpha.iter().all(|&a| a == 0.0));
        let u = jet.transfer_matrix().unwrap();
        for k in 0..2 {
            assert!(u[(k, 2)].norm() < 1.0e-12);
            assert!(u[(2, k)].norm() < 1.0e-12);
        }
        assert!( (u[(2, 2)].norm() - 1.0).abs() < 1.0e-10 );
    }

    #[test]
    fn single_domain_is_its_own_propagator() {
        let jet = blazar().with_update(Some(("Rmax", 0.3001))).unwrap();
        assert_eq!(jet.grid().unwrap().len(), 1);
        let un = jet.domain_propagators().unwrap();
        let u = jet.transfer_matrix().unwrap();
        assert!(u.max_deviation(&un[0]) < 1.0e-15);
    }

    #[test]
    fn deterministic() {
        let jet = blazar().with_update(Some(("Psi", 0.3))).unwrap();
        let a = jet.transfer_matrix().unwrap();
        let b = jet.transfer_matrix().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn chain_follows_domain_order() {
        let jet = blazar().with_update(vec![("Rmax", 0.31), ("Psi", 0.5), ("E", 1.0e3)]).unwrap();
        let un = jet.domain_propagators().unwrap();
        assert!(un.len() > 2);
        let forward = un.iter().fold(Matrix3::identity(), |u, un| *un * u);
        let u = jet.transfer_matrix().unwrap();
        assert_eq!(u, forward);
    }

    #[test]
    fn strong_mixing_matches_analytical() {
        // Without plasma, QED and mass terms every domain has α = π/4 and
        // the chain reduces to a rotation by Σ Δ_aγ Lcoh between A_y and a,
        // the continuum limit of which is the single-step estimate.
        #[derive(Clone)]
        struct CouplingOnly;
        impl DeltaTerms for CouplingOnly {
            fn plasma(&self, _n: f64, _e: f64) -> f64 { 0.0 }
            fn qed(&self, _b: f64, _e: f64) -> f64 { 0.0 }
            fn coupling(&self, g: f64, b: f64) -> f64 { 1.52e-2 * g * b }
            fn mass(&self, _m: f64, _e: f64) -> f64 { 0.0 }
        }

        let config = JetConfig { r_max: 10.0, sens: 0.999, ..Default::default() };
        let jet = JetAlp::new(config, CouplingOnly).unwrap();
        let u = jet.transfer_matrix().unwrap();
        let v = jet.analytical_transfer_matrix().unwrap();
        println!("chain =\n{:?}\nanalytical =\n{:?}", u, v);
        assert!( (u[(2, 1)].norm() - v[(2, 1)].norm()).abs() < 1.0e-2 );
        assert!( (u[(1, 1)].norm() - v[(1, 1)].norm()).abs() < 1.0e-2 );
    }

    #[test]
    fn invalid_update_is_rejected() {
        let jet = blazar();
        assert_eq!(jet.with_update(Some(("sens", 1.2))).err(), Some(JetError::InvalidSensitivity(1.2)));
        assert_eq!(jet.at_energy(0.0).err(), Some(JetError::InvalidParameter { name: "E", value: 0.0 }));
        let u = jet.analytical_transfer_matrix().unwrap();
        assert_eq!(u[(0, 0)], Complex::new(1.0, 0.0));
    }
}
