// src/noyau/validation.rs
//
// Filtre syntaxique rapide sur une pile candidate.
//
// Règles:
// - liste vide => valide
// - positions 0 et 1 : nombres uniquement (deux opérandes avant tout opérateur)
// - positions >= 2 : nombre OU opérateur autorisé ; tout le reste invalide la liste
//
// NOTE: ne vérifie PAS l’équilibre opérandes/opérateurs (c’est le rôle de pile.rs).

use super::jetons::{classer, Operateur, Tok};

pub fn est_entree_valide<T: AsRef<str>>(tokens: &[T], operateurs: &[Operateur]) -> bool {
    tokens
        .iter()
        .enumerate()
        .all(|(i, t)| match classer(t.as_ref()) {
            Tok::Num(_) => true,
            Tok::Op(op) => i >= 2 && operateurs.contains(&op),
            Tok::Autre(_) => false,
        })
}
