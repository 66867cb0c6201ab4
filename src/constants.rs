//! Unit conversions and default jet parameters
//!
//! Internally, lengths are in pc, field strengths in G, densities in cm^-3,
//! energies in GeV, ALP masses in neV and couplings in units of 1e-11 GeV^-1.
//! Mixing terms are in pc^-1.

pub const PC: f64 = 1.0;
pub const KPC: f64 = 1.0e3;

pub const GAUSS: f64 = 1.0;
pub const MILLIGAUSS: f64 = 1.0e-3;
pub const MICROGAUSS: f64 = 1.0e-6;

pub const GEV: f64 = 1.0;
pub const TEV: f64 = 1.0e3;
pub const MEV: f64 = 1.0e-3;

pub const NEV: f64 = 1.0;

pub const DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Mixing terms are tabulated in kpc^-1, the propagator works in pc^-1
pub const PER_KPC_TO_PER_PC: f64 = 1.0e-3;

/// cm^-3 to the 1e-3 cm^-3 expected by the plasma term
pub const DENSITY_TO_MILLI: f64 = 1.0e3;

/// G to the μG expected by the QED and coupling terms
pub const GAUSS_TO_MICROGAUSS: f64 = 1.0e6;

// Defaults for a blazar jet, field and density specified at the BLR
pub const DEFAULT_R_BLR: f64 = 0.3;
pub const DEFAULT_R_MAX: f64 = 1000.0;
pub const DEFAULT_B: f64 = 0.01;
pub const DEFAULT_N: f64 = 1.0e8;
pub const DEFAULT_S: f64 = 2.0;
pub const DEFAULT_P: f64 = 1.0;
pub const DEFAULT_G: f64 = 1.0;
pub const DEFAULT_M: f64 = 1.0;
pub const DEFAULT_E: f64 = 1.0;
pub const DEFAULT_SENS: f64 = 0.99;
pub const DEFAULT_PSI: f64 = 0.0;

/// Hard limit on the number of domains in a single jet
pub const DEFAULT_MAX_DOMAINS: usize = 1_000_000;

/// Ceiling on any configured domain cap, so that the per-domain arrays
/// stay allocatable
pub const MAX_DOMAINS_CEILING: usize = 1 << 28;

/// Domain counts above this are computed, but reported
pub const LARGE_DOMAIN_COUNT: usize = 100_000;
