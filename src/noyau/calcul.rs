//! Noyau — moteur arithmétique.
//!
//! `Calculateur::operate(a, b, op)` :
//! - opérateur d’abord : absent / inconnu / désactivé => OperateurInvalide
//! - puis opérandes : absent (placeholder) / non numérique => OperandeInvalide
//! - puis division : diviseur nul => DivisionParZero (avant tout calcul)
//! - sinon délégation au backend choisi une fois pour toutes (exact ou flottant)
//!
//! Politique de précision (chiffres après la virgule) :
//! - `+` : max(défaut, frac(a), frac(b)) + 1 si l’un des deux a une fraction
//! - `-` : max(défaut, frac(a), frac(b))     si l’un des deux a une fraction
//! - `*` : max(défaut, frac(a) + frac(b))     si l’un des deux a une fraction
//! - `/` : défaut, toujours
//!
//! La sortie est toujours normalisée (zéros de fin + point orphelin retirés).

use std::fmt;

use thiserror::Error;
use tracing::{trace, warn};

use super::decimal::{normaliser, tronquer_texte};
use super::jetons::Operateur;
use super::nombre::{parse_nombre, Nombre};
use crate::config::{BackendKind, Config, PRECISION_MAX};

#[cfg(feature = "exact")]
use super::decimal::{decimal_to_rational, rational_to_decimal};
#[cfg(feature = "exact")]
use num_traits::Zero;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("opérande invalide")]
    OperandeInvalide,

    #[error("opérateur invalide")]
    OperateurInvalide,

    /// Backend flottant seulement : résultat non fini (inf / NaN).
    #[error("résultat hors domaine (dépassement flottant)")]
    Depassement,
}

impl ErreurCalcul {
    /// Seule la division par zéro invalide toute la pile courante.
    pub fn est_fatale(self) -> bool {
        matches!(self, ErreurCalcul::DivisionParZero)
    }
}

/// Résultat d’une opération, étiqueté par le backend qui l’a produit.
#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    /// Décimal exact, déjà normalisé.
    Exact(String),
    /// f64, déjà tronqué à la précision de l’opération.
    Approx(f64),
}

impl Valeur {
    /// Lecture numérique (comparaisons de tests, diagnostics).
    pub fn en_f64(&self) -> Option<f64> {
        match self {
            Valeur::Exact(s) => s.parse().ok(),
            Valeur::Approx(x) => Some(*x),
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Exact(s) => f.write_str(s),
            // `{}` sur f64 n’écrit jamais d’exposant : le texte reste un jeton numérique
            Valeur::Approx(x) => f.write_str(&normaliser(&x.to_string())),
        }
    }
}

/// Précision effective d’une opération (jamais sous `defaut`).
pub fn precision_pour(op: Operateur, a: &Nombre, b: &Nombre, defaut: usize) -> usize {
    let fa = a.chiffres_fractionnaires();
    let fb = b.chiffres_fractionnaires();
    let fraction = a.a_une_fraction() || b.a_une_fraction();

    match op {
        Operateur::Plus if fraction => defaut.max(fa).max(fb) + 1,
        Operateur::Minus if fraction => defaut.max(fa).max(fb),
        Operateur::Star if fraction => defaut.max(fa + fb),
        _ => defaut,
    }
}

/* ------------------------ Backends (stratégie) ------------------------ */

/// Backend arithmétique. Opérandes déjà validés, opérateur déjà autorisé.
pub trait Backend: fmt::Debug + Send + Sync {
    fn kind(&self) -> BackendKind;

    fn appliquer(
        &self,
        a: &Nombre,
        b: &Nombre,
        op: Operateur,
        precision: usize,
    ) -> Result<Valeur, ErreurCalcul>;
}

/// Décimal exact : rationnels, puis troncature à `precision` chiffres.
#[cfg(feature = "exact")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Exact;

#[cfg(feature = "exact")]
impl Backend for Exact {
    fn kind(&self) -> BackendKind {
        BackendKind::Exact
    }

    fn appliquer(
        &self,
        a: &Nombre,
        b: &Nombre,
        op: Operateur,
        precision: usize,
    ) -> Result<Valeur, ErreurCalcul> {
        // exposants => forme décimale à plat ; sinon texte d’origine
        let x = decimal_to_rational(&a.forme_decimale())
            .ok_or(ErreurCalcul::OperandeInvalide)?;
        let y = decimal_to_rational(&b.forme_decimale())
            .ok_or(ErreurCalcul::OperandeInvalide)?;

        let r = match op {
            Operateur::Plus => x + y,
            Operateur::Minus => x - y,
            Operateur::Star => x * y,
            Operateur::Slash => {
                if y.is_zero() {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                x / y
            }
        };

        Ok(Valeur::Exact(normaliser(&rational_to_decimal(&r, precision))))
    }
}

/// Repli natif : f64.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flottant;

impl Backend for Flottant {
    fn kind(&self) -> BackendKind {
        BackendKind::Flottant
    }

    fn appliquer(
        &self,
        a: &Nombre,
        b: &Nombre,
        op: Operateur,
        precision: usize,
    ) -> Result<Valeur, ErreurCalcul> {
        let x: f64 = a
            .texte()
            .parse()
            .map_err(|_| ErreurCalcul::OperandeInvalide)?;
        let y: f64 = b
            .texte()
            .parse()
            .map_err(|_| ErreurCalcul::OperandeInvalide)?;

        let r = match op {
            Operateur::Plus => x + y,
            Operateur::Minus => x - y,
            Operateur::Star => x * y,
            Operateur::Slash => {
                if y == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                x / y
            }
        };

        if !r.is_finite() {
            return Err(ErreurCalcul::Depassement);
        }

        // troncature vers zéro, comme le backend exact, sur l’écriture décimale
        // la plus courte du f64 : 0.1 + 0.2 => 0.3, 2 / 3 => 0.66666666666666
        let tronque: f64 = tronquer_texte(&r.to_string(), precision)
            .parse()
            .map_err(|_| ErreurCalcul::Depassement)?;
        Ok(Valeur::Approx(tronque))
    }
}

fn choisir_backend(kind: BackendKind) -> Box<dyn Backend> {
    match kind {
        #[cfg(feature = "exact")]
        BackendKind::Exact => Box::new(Exact),
        #[cfg(not(feature = "exact"))]
        BackendKind::Exact => {
            warn!("backend exact indisponible (feature `exact` absente) : repli flottant");
            Box::new(Flottant)
        }
        BackendKind::Flottant => Box::new(Flottant),
    }
}

/* ------------------------ Calculateur ------------------------ */

#[derive(Debug)]
pub struct Calculateur {
    backend: Box<dyn Backend>,
    precision: usize,
    operateurs: Vec<Operateur>,
}

impl Default for Calculateur {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Calculateur {
    pub fn new(config: &Config) -> Self {
        let precision = config.precision.min(PRECISION_MAX);
        if precision != config.precision {
            warn!(
                demandee = config.precision,
                retenue = precision,
                "précision bornée"
            );
        }

        Self {
            backend: choisir_backend(config.backend),
            precision,
            operateurs: config.operateurs.clone(),
        }
    }

    /// Backend réellement utilisé (après repli éventuel).
    pub fn backend(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn operateurs(&self) -> &[Operateur] {
        &self.operateurs
    }

    fn operateur_autorise(&self, symbole: &str) -> Option<Operateur> {
        Operateur::depuis_symbole(symbole).filter(|op| self.operateurs.contains(op))
    }

    /// a (opérande 1) op b (opérande 2). `None` = opérande manquant.
    pub fn operate(
        &self,
        a: Option<&str>,
        b: Option<&str>,
        op: &str,
    ) -> Result<Valeur, ErreurCalcul> {
        let op = self
            .operateur_autorise(op)
            .ok_or(ErreurCalcul::OperateurInvalide)?;

        let na = a.and_then(parse_nombre).ok_or(ErreurCalcul::OperandeInvalide)?;
        let nb = b.and_then(parse_nombre).ok_or(ErreurCalcul::OperandeInvalide)?;

        if op == Operateur::Slash && nb.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }

        let precision = precision_pour(op, &na, &nb, self.precision);
        let v = self.backend.appliquer(&na, &nb, op, precision)?;

        trace!(a = na.texte(), b = nb.texte(), %op, precision, resultat = %v, "operate");
        Ok(v)
    }
}
