//! Noyau RPN incrémental
//!
//! Organisation interne :
//! - nombre.rs     : grammaire des littéraux numériques (exposants compris)
//! - jetons.rs     : opérateurs + classification des jetons + découpage de ligne
//! - decimal.rs    : décimal exact scalé + normalisation d’affichage
//! - calcul.rs     : moteur arithmétique (backends exact / flottant, précision)
//! - validation.rs : filtre syntaxique d’une pile candidate
//! - pile.rs       : réduction gauche -> droite d’une pile candidate

pub mod calcul;
pub mod decimal;
pub mod jetons;
pub mod nombre;
pub mod pile;
pub mod validation;



// API publique minimale
pub use calcul::{Calculateur, ErreurCalcul, Valeur};
pub use jetons::Operateur;
pub use nombre::est_numerique;
pub use pile::reduire;
pub use validation::est_entree_valide;
