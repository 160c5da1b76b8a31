//! Calculatrice RPN incrémentale.
//!
//! - noyau/     : grammaire numérique, moteur arithmétique, validation, réduction
//! - config.rs  : précision, jeu d’opérateurs, backend (exact / flottant)
//! - session.rs : pile validée + boucle ligne à ligne

pub mod config;
pub mod noyau;
pub mod session;

#[cfg(test)]
mod tests_session;

pub use config::{BackendKind, Config, ErreurConfig};
pub use session::{Reponse, Session};
