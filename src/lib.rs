//! Photon-ALP mixing in the magnetized jets of active galactic nuclei.
//!
//! The jet is divided into domains of constant field and electron density,
//! with the field falling off as a power law in distance from the core.
//! In each domain the mixing matrix of the two photon polarizations and
//! the ALP is diagonalized in closed form, and the resulting propagators
//! are chained from the broad line region outward into the transfer
//! matrix of the whole jet.
//!
//! ```no_run
//! use jetalp::{JetAlp, DensityMatrix, photon_survival};
//!
//! let jet = JetAlp::standard().with_update(vec![("E", 100.0), ("g", 0.5)])?;
//! let u = jet.transfer_matrix()?;
//! let p = photon_survival(&u, &DensityMatrix::unpolarized());
//! # Ok::<(), jetalp::JetError>(())
//! ```

#![allow(clippy::needless_range_loop)]

pub mod constants;
pub mod error;
pub mod jet;
pub mod mixing;
pub mod propagator;
pub mod conversion;
pub mod state;
pub mod scan;
pub mod setup;

pub use crate::error::{JetError, Result};
pub use crate::jet::{JetConfig, DomainGrid, field_at, density_at};
pub use crate::mixing::{DeltaTerms, StandardDeltas, MixingParameters};
pub use crate::propagator::{Matrix3, Projectors};
pub use crate::conversion::JetAlp;
pub use crate::state::{DensityMatrix, photon_survival, alp_conversion};
pub use crate::scan::{SpectralPoint, energy_scan, log_energies};
