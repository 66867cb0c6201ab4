//! Geometry and plasma content of the jet

use crate::constants::*;
use crate::error::{JetError, Result};

mod grid;
pub use self::grid::*;

/// Parameters of a single jet. Field strength and electron density are
/// specified at the broad line region and decay as power laws outward:
///   B(r) = B (r / R_BLR)^-p
///   n(r) = n (r / R_BLR)^-s
/// p = 1 corresponds to a toroidal field, p = 2 to a poloidal one.
///
/// A configuration is a value: changing a parameter produces a new
/// configuration via [`JetConfig::updated`], which revalidates it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JetConfig {
    /// Radius of the broad line region, in pc
    pub r_blr: f64,
    /// Radius up to which the jet extends, in pc
    pub r_max: f64,
    /// Field strength at R_BLR, in G
    pub b: f64,
    /// Electron density at R_BLR, in cm^-3
    pub n: f64,
    /// Exponent of the electron density profile
    pub s: f64,
    /// Exponent of the magnetic field profile
    pub p: f64,
    /// Photon-ALP coupling, in 1e-11 GeV^-1
    pub g: f64,
    /// ALP mass, in neV
    pub m: f64,
    /// Photon energy, in GeV
    pub e: f64,
    /// Field ratio between consecutive domains, B_n = sens B_{n-1}
    pub sens: f64,
    /// Angle between the field and the transverse photon polarization, in rad
    pub psi: f64,
    /// Largest number of domains the jet may be split into
    pub max_domains: usize,
}

impl Default for JetConfig {
    fn default() -> Self {
        JetConfig {
            r_blr: DEFAULT_R_BLR,
            r_max: DEFAULT_R_MAX,
            b: DEFAULT_B,
            n: DEFAULT_N,
            s: DEFAULT_S,
            p: DEFAULT_P,
            g: DEFAULT_G,
            m: DEFAULT_M,
            e: DEFAULT_E,
            sens: DEFAULT_SENS,
            psi: DEFAULT_PSI,
            max_domains: DEFAULT_MAX_DOMAINS,
        }
    }
}

impl JetConfig {
    /// Returns a copy of this configuration with the named parameters
    /// replaced. Names follow the usual notation (`R_BLR`, `Rmax`, `B`,
    /// `n`, `s`, `p`, `g`, `m`, `E`, `sens`, `Psi`); the field names of
    /// this struct are accepted too.
    ///
    /// The result is validated as a whole, so intermediate states of a
    /// multi-parameter update are never observed.
    pub fn updated<I, K>(&self, changes: I) -> Result<JetConfig>
    where I: IntoIterator<Item = (K, f64)>, K: AsRef<str> {
        let mut config = *self;
        for (name, value) in changes {
            *config.field_mut(name.as_ref())? = value;
        }
        config.validate()?;
        Ok(config)
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut f64> {
        let field = match name {
            "R_BLR" | "r_blr" => &mut self.r_blr,
            "Rmax" | "r_max" => &mut self.r_max,
            "B" | "b" => &mut self.b,
            "n" => &mut self.n,
            "s" => &mut self.s,
            "p" => &mut self.p,
            "g" => &mut self.g,
            "m" => &mut self.m,
            "E" | "e" => &mut self.e,
            "sens" => &mut self.sens,
            "Psi" | "psi" => &mut self.psi,
            _ => return Err(JetError::UnknownParameter(name.to_owned())),
        };
        Ok(field)
    }

    /// Sets the cap on the number of domains. Limits above
    /// `MAX_DOMAINS_CEILING` are clamped to it when the grid is built.
    pub fn with_max_domains(mut self, limit: usize) -> Self {
        self.max_domains = limit;
        self
    }

    /// Checks that the domain count is well defined and that the profiles
    /// are physical.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("R_BLR", self.r_blr), ("Rmax", self.r_max), ("B", self.b), ("n", self.n),
            ("s", self.s), ("p", self.p), ("g", self.g), ("m", self.m),
            ("E", self.e), ("sens", self.sens), ("Psi", self.psi),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(JetError::InvalidParameter { name, value });
        }

        if !(self.sens > 0.0 && self.sens < 1.0) {
            return Err(JetError::InvalidSensitivity(self.sens));
        }

        let positive = [("R_BLR", self.r_blr), ("B", self.b), ("n", self.n), ("p", self.p), ("E", self.e)];
        if let Some(&(name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(JetError::InvalidParameter { name, value });
        }

        if self.r_max <= self.r_blr {
            return Err(JetError::InvalidExtent { r_blr: self.r_blr, r_max: self.r_max });
        }

        Ok(())
    }
}

/// Magnetic field strength, in G, at radius `r` (pc).
pub fn field_at(config: &JetConfig, r: f64) -> f64 {
    config.b * (r / config.r_blr).powf(-config.p)
}

/// Electron density, in cm^-3, at radius `r` (pc).
pub fn density_at(config: &JetConfig, r: f64) -> f64 {
    config.n * (r / config.r_blr).powf(-config.s)
}
