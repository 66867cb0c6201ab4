//! Division of the jet into magnetic domains

use ndarray::Array1;

use crate::constants::*;
use crate::error::{JetError, Result};
use super::{JetConfig, field_at, density_at};

/// The jet between R_BLR and Rmax, divided into `Nd` domains within which
/// the field and density are constant. The field decreases by a factor
/// `sens` from one domain to the next, so the domains grow geometrically
/// in length with distance from the core.
///
/// Domains are indexed from the inner edge outward.
///
/// Domain `i` has length `Lcoh = r[i+1] (1 - sens)`, so the lengths sum to
///   R_BLR (1 - sens) / (1 - sens^(1/p)) (sens^(-Nd/p) - 1)
/// which is close to `p (Rmax - R_BLR)`. The domains fill the jet only
/// for `p = 1`; for steeper field profiles the total path through the
/// domains exceeds the extent of the jet.
#[derive(Debug, Clone)]
pub struct DomainGrid {
    /// Radius of each domain boundary, pc. Has `Nd + 1` entries, domain `i`
    /// sits at `r[i]`.
    r: Array1<f64>,
    /// Coherence length of each domain, pc
    lcoh: Array1<f64>,
    /// Field strength in each domain, G
    b: Array1<f64>,
    /// Electron density in each domain, cm^-3
    n: Array1<f64>,
}

/// Number of domains needed for the field to fall from its value at R_BLR
/// to its value at Rmax in steps of `sens`:
///   Nd = ceil(-p ln(Rmax / R_BLR) / ln(sens))
pub fn domain_count(p: f64, sens: f64, r_blr: f64, r_max: f64) -> Result<usize> {
    if !(sens > 0.0 && sens < 1.0) {
        return Err(JetError::InvalidSensitivity(sens));
    }
    if !(r_max > r_blr) {
        return Err(JetError::InvalidExtent { r_blr, r_max });
    }
    if !(p > 0.0) || !p.is_finite() {
        return Err(JetError::InvalidParameter { name: "p", value: p });
    }
    let nd = (-p * (r_max / r_blr).ln() / sens.ln()).ceil();
    if !nd.is_finite() {
        return Err(JetError::InvalidParameter { name: "Rmax", value: r_max });
    }
    Ok((nd as usize).max(1))
}

impl DomainGrid {
    /// Lays out the domains for `config`, failing if the domain count is
    /// ill defined or exceeds `config.max_domains` (at most
    /// `MAX_DOMAINS_CEILING`).
    pub fn new(config: &JetConfig) -> Result<DomainGrid> {
        config.validate()?;
        let nd = domain_count(config.p, config.sens, config.r_blr, config.r_max)?;
        let limit = config.max_domains.min(MAX_DOMAINS_CEILING);

        if nd > limit {
            return Err(JetError::TooManyDomains { count: nd, limit });
        } else if nd > LARGE_DOMAIN_COUNT {
            tracing::warn!(domains = nd, sens = config.sens, p = config.p, "jet split into a very large number of domains");
        }

        let r_blr = config.r_blr;
        let sens = config.sens;
        let p = config.p;

        let r = Array1::from_shape_fn(nd + 1, |i| r_blr * sens.powf(-(i as f64) / p));
        let lcoh = Array1::from_shape_fn(nd, |i| r_blr * sens.powf(-((i + 1) as f64) / p) * (1.0 - sens));

        let b = r.slice(ndarray::s![..nd]).mapv(|r| field_at(config, r));
        let n = r.slice(ndarray::s![..nd]).mapv(|r| density_at(config, r));

        tracing::debug!(domains = nd, inner = r[0], outer = r[nd], "built domain grid");

        Ok(DomainGrid { r, lcoh, b, n })
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.lcoh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lcoh.is_empty()
    }

    /// Domain boundaries, `len() + 1` radii in pc
    pub fn boundaries(&self) -> &Array1<f64> {
        &self.r
    }

    /// Radius of each domain, pc
    pub fn radii(&self) -> ndarray::ArrayView1<'_, f64> {
        self.r.slice(ndarray::s![..self.len()])
    }

    pub fn coherence_lengths(&self) -> &Array1<f64> {
        &self.lcoh
    }

    pub fn field(&self) -> &Array1<f64> {
        &self.b
    }

    pub fn density(&self) -> &Array1<f64> {
        &self.n
    }

    /// Total path length through all domains, pc
    pub fn total_length(&self) -> f64 {
        self.lcoh.sum()
    }
}
