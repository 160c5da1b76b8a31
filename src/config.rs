//! Configuration de la calculatrice.
//!
//! Deux constantes réglables par l’application hôte (précision, jeu d’opérateurs)
//! et le choix du backend arithmétique, fait une fois au démarrage.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::noyau::jetons::Operateur;

/// Nombre minimal de chiffres après la virgule conservés par défaut.
pub const PRECISION_DEFAUT: usize = 14;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const PRECISION_MAX: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErreurConfig {
    #[error("précision trop grande : {0} (max {max})", max = PRECISION_MAX)]
    PrecisionTropGrande(usize),

    #[error("opérateur inconnu : '{0}' (attendus : + - * /)")]
    OperateurInconnu(char),

    #[error("aucun opérateur autorisé")]
    AucunOperateur,

    #[error("backend inconnu : '{0}' (attendus : exact, flottant)")]
    BackendInconnu(String),
}

/// Stratégie arithmétique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Décimal exact (big int / rationnels), tronqué à la précision.
    Exact,
    /// f64 natif, tronqué à la précision.
    Flottant,
}

impl BackendKind {
    /// Exact si compilé, sinon repli flottant.
    pub fn par_defaut() -> Self {
        if cfg!(feature = "exact") {
            BackendKind::Exact
        } else {
            BackendKind::Flottant
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::par_defaut()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Exact => f.write_str("exact"),
            BackendKind::Flottant => f.write_str("flottant"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ErreurConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "decimal" => Ok(BackendKind::Exact),
            "flottant" | "float" | "f64" => Ok(BackendKind::Flottant),
            autre => Err(ErreurConfig::BackendInconnu(autre.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub precision: usize,
    pub operateurs: Vec<Operateur>,
    pub backend: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: PRECISION_DEFAUT,
            operateurs: Operateur::TOUS.to_vec(),
            backend: BackendKind::par_defaut(),
        }
    }
}

impl Config {
    /// Vérifie les bornes ; renvoie la config telle quelle si elle est saine.
    pub fn valider(self) -> Result<Self, ErreurConfig> {
        if self.precision > PRECISION_MAX {
            return Err(ErreurConfig::PrecisionTropGrande(self.precision));
        }
        if self.operateurs.is_empty() {
            return Err(ErreurConfig::AucunOperateur);
        }
        Ok(self)
    }
}

/// "+-*/" -> [Plus, Minus, Star, Slash] (blancs ignorés, doublons fusionnés).
/// On ne peut que restreindre le jeu : tout autre caractère est refusé.
pub fn parse_operateurs(s: &str) -> Result<Vec<Operateur>, ErreurConfig> {
    let mut out: Vec<Operateur> = Vec::new();
    for c in s.chars().filter(|c| !c.is_whitespace()) {
        let op =
            Operateur::depuis_symbole(&c.to_string()).ok_or(ErreurConfig::OperateurInconnu(c))?;
        if !out.contains(&op) {
            out.push(op);
        }
    }
    if out.is_empty() {
        return Err(ErreurConfig::AucunOperateur);
    }
    Ok(out)
}
