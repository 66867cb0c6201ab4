//! Parse input configuration file

use std::path::Path;
use thiserror::Error;
use yaml_rust::{YamlLoader, yaml::Yaml};
use meval::Context;

use crate::constants::*;
use crate::error::JetError;
use crate::jet::JetConfig;
use crate::state::DensityMatrix;

const USAGE: &str = "Usage: jetalp input-file";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid input file: {0}\n{}", USAGE)]
    InvalidInputFile(&'static str),

    #[error("unable to parse '{0}' = '{1}' in configuration file")]
    CouldNotParse(String, String),

    #[error("unable to find '{1}' in section '{0}' with correct type in configuration file")]
    MissingField(String, String),

    #[error("invalid jet configuration: {0}")]
    Jet(#[from] JetError),
}

/// Represents the input configuration, can be queried
/// for desired parameters
pub struct Configuration<'a> {
    input: Yaml,
    ctx: Context<'a>,
}

/// Jet parameters as they are named in the input file
const JET_FIELDS: [&str; 11] = ["R_BLR", "Rmax", "B", "n", "s", "p", "g", "m", "E", "sens", "Psi"];

impl<'a> Configuration<'a> {
    pub fn from_file(path: &Path) -> Result<Configuration<'a>, InputError> {
        let contents = std::fs::read_to_string(path).map_err(|_e| InputError::InvalidInputFile("unable to read file"))?;
        Configuration::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Configuration<'a>, InputError> {
        let input = YamlLoader::load_from_str(contents).map_err(|_e| InputError::InvalidInputFile("yaml trouble"))?;
        let input = input.first().ok_or(InputError::InvalidInputFile("empty yaml document"))?;
        Ok(Configuration {
            input: input.clone(),
            ctx: Context::new(),
        })
    }

    /// Loads units, and any constants defined in `section`, into the
    /// context in which expressions are evaluated.
    pub fn with_context(&mut self, section: &str) -> &mut Self {
        self.ctx
            .var("pc", PC)
            .var("kpc", KPC)
            .var("gauss", GAUSS)
            .var("milligauss", MILLIGAUSS)
            .var("microgauss", MICROGAUSS)
            .var("MeV", MEV)
            .var("GeV", GEV)
            .var("TeV", TEV)
            .var("neV", NEV)
            .var("deg", DEGREE);

        // a constant cannot depend on other constants yet...
        let tmp = self.ctx.clone();

        if let Some(hash) = self.input[section].as_hash() {
            for (a, b) in hash {
                match (a, b) {
                    (Yaml::String(s), Yaml::Real(v)) => {
                        if let Ok(num) = v.parse::<f64>() {self.ctx.var(s.as_str(), num);}
                    },
                    (Yaml::String(s), Yaml::Integer(i)) => {
                        self.ctx.var(s.as_str(), *i as f64);
                    },
                    (Yaml::String(s), Yaml::String(v)) => {
                        if let Ok(expr) = v.parse::<meval::Expr>() {
                            if let Ok(num) = expr.eval_with_context(&tmp) {self.ctx.var(s.as_str(), num);}
                        }
                    },
                    _ => ()
                }
            }
        }

        self
    }

    fn evaluate(&self, field: &str, s: &str) -> Result<f64, InputError> {
        let expr = s.parse::<meval::Expr>().map_err(|_| InputError::CouldNotParse(field.to_owned(), s.to_owned()))?;
        expr.eval_with_context(&self.ctx).map_err(|_| InputError::CouldNotParse(field.to_owned(), s.to_owned()))
    }

    fn real_from(&self, section: &str, field: &str, value: &Yaml) -> Result<f64, InputError> {
        match value {
            Yaml::Real(s) => s.parse::<f64>().map_err(|_| InputError::CouldNotParse(field.to_owned(), s.clone())),
            Yaml::Integer(i) => Ok(*i as f64),
            Yaml::String(s) => self.evaluate(field, s),
            _ => Err(InputError::MissingField(section.to_owned(), field.to_owned())),
        }
    }

    pub fn real(&self, section: &str, field: &str) -> Result<f64, InputError> {
        self.real_from(section, field, &self.input[section][field])
    }

    /// A single value or a list of values
    pub fn reals(&self, section: &str, field: &str) -> Result<Vec<f64>, InputError> {
        match &self.input[section][field] {
            Yaml::Array(array) => {
                array.iter()
                    .map(|y| self.real_from(section, field, y))
                    .collect()
            },
            value => self.real_from(section, field, value).map(|v| vec![v]),
        }
    }

    pub fn integer(&self, section: &str, field: &str) -> Result<i64, InputError> {
        match &self.input[section][field] {
            Yaml::Integer(i) => Ok(*i),
            _ => Err(InputError::MissingField(section.to_owned(), field.to_owned())),
        }
    }

    pub fn string(&self, section: &str, field: &str) -> Result<String, InputError> {
        match &self.input[section][field] {
            Yaml::String(s) => Ok(s.clone()),
            _ => Err(InputError::MissingField(section.to_owned(), field.to_owned())),
        }
    }

    pub fn has(&self, section: &str, field: &str) -> bool {
        !self.input[section][field].is_badvalue()
    }

    /// Jet parameters from the 'jet' section, defaulting any that are
    /// missing, and the domain limit from 'control'.
    pub fn jet(&self) -> Result<JetConfig, InputError> {
        let defaults = JetConfig::default();
        let mut changes: Vec<(&str, f64)> = Vec::with_capacity(JET_FIELDS.len());
        for field in JET_FIELDS.iter() {
            if self.has("jet", field) {
                changes.push((*field, self.real("jet", field)?));
            }
        }
        let mut config = defaults.updated(changes)?;

        if self.has("control", "max_domains") {
            let limit = self.integer("control", "max_domains")?;
            if limit < 1 {
                return Err(InputError::CouldNotParse("max_domains".to_owned(), limit.to_string()));
            }
            config = config.with_max_domains(limit as usize);
        }

        Ok(config)
    }

    /// Initial state of the beam, 'control: polarization', unpolarized
    /// photons unless specified otherwise.
    pub fn initial_state(&self) -> Result<DensityMatrix, InputError> {
        if !self.has("control", "polarization") {
            return Ok(DensityMatrix::unpolarized());
        }
        let name = self.string("control", "polarization")?;
        match name.as_str() {
            "unpolarized" => Ok(DensityMatrix::unpolarized()),
            "x" => Ok(DensityMatrix::polarized_x()),
            "y" => Ok(DensityMatrix::polarized_y()),
            _ => Err(InputError::CouldNotParse("polarization".to_owned(), name)),
        }
    }

    /// Energies (GeV) to scan over, 'control: energies'. Empty if absent.
    pub fn energies(&self) -> Result<Vec<f64>, InputError> {
        if self.has("control", "energies") {
            self.reals("control", "energies")
        } else {
            Ok(Vec::new())
        }
    }
}
