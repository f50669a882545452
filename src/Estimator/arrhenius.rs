#![allow(non_snake_case)]
use crate::Chemistry::structure::{ChemicalStructure, Species};
use serde::{Deserialize, Serialize};
use std::fmt;

/// gas constant in kcal/(mol*K), activation energies from the service are in kcal/mol
pub const R_KCAL: f64 = 1.987204e-3;
/// every rate sent by the service refers to T0 = 1 K
pub const T0_KELVIN: f64 = 1.0;
pub const PROVENANCE: &str = "Estimated by PopulateReactions service:\n";
pub const DUPLICATE_WARNING: &str = "\nWARNING - DUPLICATE REACTION KINETICS IDENTIFIED BUT NOT SUMMED";

/// units of the pre-exponential factor, fixed by the number of reactants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreExponentialUnits {
    /// s^-1
    PerSecond,
    /// cm^3/(mol*s)
    Bimolecular,
    /// cm^6/(mol^2*s)
    Termolecular,
}

impl PreExponentialUnits {
    pub fn for_reactant_count(count: usize) -> Self {
        match count {
            0 | 1 => PreExponentialUnits::PerSecond,
            2 => PreExponentialUnits::Bimolecular,
            _ => PreExponentialUnits::Termolecular,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreExponentialUnits::PerSecond => "s^-1",
            PreExponentialUnits::Bimolecular => "cm^3/(mol*s)",
            PreExponentialUnits::Termolecular => "cm^6/(mol^2*s)",
        }
    }
}

impl fmt::Display for PreExponentialUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// modified Arrhenius rate k = A (T/T0)^n exp(-Ea/(R T))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrhenius {
    pub A: f64,
    pub A_units: PreExponentialUnits,
    pub n: f64,
    /// kcal/mol
    pub Ea: f64,
    /// K
    pub T0: f64,
    pub comment: String,
}

impl Arrhenius {
    pub fn new(A: f64, A_units: PreExponentialUnits, n: f64, Ea: f64) -> Self {
        Self {
            A,
            A_units,
            n,
            Ea,
            T0: T0_KELVIN,
            comment: String::new(),
        }
    }

    pub fn K_const(&self, T: f64) -> f64 {
        self.A * (T / self.T0).powf(self.n) * f64::exp(-self.Ea / (R_KCAL * T))
    }

    pub fn K_const_for_T_range(&self, T_min: f64, T_max: f64, steps: usize) -> Vec<(f64, f64)> {
        if steps < 2 {
            return vec![(T_min, self.K_const(T_min))];
        }
        let dT = (T_max - T_min) / (steps - 1) as f64;
        (0..steps)
            .map(|i| {
                let T = T_min + dT * i as f64;
                (T, self.K_const(T))
            })
            .collect()
    }
}

/// one reaction found by the estimation service, with its rate
#[derive(Debug, Clone)]
pub struct EstimatedReaction<M> {
    pub reactants: Vec<Species<M>>,
    pub products: Vec<Species<M>>,
    pub kinetics: Arrhenius,
    pub degeneracy: u32,
    /// comment fields of the reaction line
    pub long_desc: String,
}

/// flat record of an estimated reaction for tables and JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub equation: String,
    pub A: f64,
    pub A_units: String,
    pub n: f64,
    pub Ea_kcal_mol: f64,
    pub T0: f64,
    pub degeneracy: u32,
    pub comment: String,
}

impl<M: ChemicalStructure> EstimatedReaction<M> {
    pub fn equation(&self) -> String {
        let side = |species: &[Species<M>]| {
            species
                .iter()
                .map(|s| s.label.as_str())
                .collect::<Vec<&str>>()
                .join(" + ")
        };
        format!("{} <=> {}", side(&self.reactants), side(&self.products))
    }

    pub fn append_comment(&mut self, text: &str) {
        self.kinetics.comment.push_str(text);
    }

    pub fn summary(&self) -> ReactionSummary {
        ReactionSummary {
            equation: self.equation(),
            A: self.kinetics.A,
            A_units: self.kinetics.A_units.as_str().to_string(),
            n: self.kinetics.n,
            Ea_kcal_mol: self.kinetics.Ea,
            T0: self.kinetics.T0,
            degeneracy: self.degeneracy,
            comment: self.kinetics.comment.clone(),
        }
    }
}
