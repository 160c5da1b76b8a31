// src/noyau/jetons.rs

use std::fmt;

use super::nombre::{parse_nombre, Nombre};

/// Opérateurs binaires supportés.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Operateur {
    pub const TOUS: [Operateur; 4] = [
        Operateur::Plus,
        Operateur::Minus,
        Operateur::Star,
        Operateur::Slash,
    ];

    pub fn depuis_symbole(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operateur::Plus),
            "-" => Some(Operateur::Minus),
            "*" => Some(Operateur::Star),
            "/" => Some(Operateur::Slash),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Minus => "-",
            Operateur::Star => "*",
            Operateur::Slash => "/",
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

/// Jeton classé.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(Nombre),
    Op(Operateur),
    // ni nombre, ni opérateur (ex: "e20", "x") : invalide partout
    Autre(String),
}

/// Classe un jeton (nombre d’abord : "-5" est un nombre, "-" un opérateur).
pub fn classer(s: &str) -> Tok {
    if let Some(n) = parse_nombre(s) {
        return Tok::Num(n);
    }
    match Operateur::depuis_symbole(s) {
        Some(op) => Tok::Op(op),
        None => Tok::Autre(s.to_string()),
    }
}

/// Découpe une ligne sur les blancs (blancs consécutifs fusionnés, vides ignorés).
/// "0" est un jeton comme un autre.
pub fn decouper(ligne: &str) -> Vec<String> {
    ligne.split_whitespace().map(str::to_string).collect()
}

/// Liste de jetons en texte (affichage “expression courante”).
pub fn format_tokens<T: AsRef<str>>(tokens: &[T]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// [Plus, Slash] -> "+ /".
pub fn format_operateurs(ops: &[Operateur]) -> String {
    format_tokens(&ops.iter().map(|o| o.symbole()).collect::<Vec<_>>())
}
