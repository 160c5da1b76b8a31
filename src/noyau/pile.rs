// src/noyau/pile.rs
//
// Réduction d’une pile candidate (gauche -> droite).
//
// Règles:
// - nombre : empilé tel quel (texte non évalué)
// - sinon  : opérande 1 = avant-dernier, opérande 2 = sommet (None si absent)
//     - DivisionParZero : abandon total (le reste est jeté)
//     - autre erreur    : on s’arrête sans rien perdre :
//                         accumulateur + jetons d’origine à partir du jeton courant
//     - succès          : dépile 2, empile le résultat
//
// Le résultat est soit complètement réduit (un seul nombre), soit partiel :
// des opérandes en attente, ou des opérateurs restés sans opérandes.

use tracing::{debug, warn};

use super::calcul::{Calculateur, ErreurCalcul};
use super::nombre::est_numerique;

/// Réduit `tokens`. Seule `ErreurCalcul::DivisionParZero` sort en `Err`.
pub fn reduire<T: AsRef<str>>(
    tokens: &[T],
    calc: &Calculateur,
) -> Result<Vec<String>, ErreurCalcul> {
    let mut acc: Vec<String> = Vec::with_capacity(tokens.len());

    for (i, tok) in tokens.iter().enumerate() {
        let tok = tok.as_ref();

        if est_numerique(tok) {
            acc.push(tok.to_string());
            continue;
        }

        let n = acc.len();
        let (a, b) = match n {
            0 => (None, None),
            1 => (None, acc.last()),
            _ => (acc.get(n - 2), acc.get(n - 1)),
        };

        let resultat = calc.operate(a.map(String::as_str), b.map(String::as_str), tok);

        match resultat {
            Ok(v) => {
                acc.truncate(n.saturating_sub(2));
                acc.push(v.to_string());
            }
            Err(e) if e.est_fatale() => {
                warn!(position = i, "réduction abandonnée : {e}");
                return Err(e);
            }
            Err(e) => {
                debug!(position = i, jeton = tok, "réduction partielle : {e}");
                acc.extend(tokens[i..].iter().map(|t| t.as_ref().to_string()));
                return Ok(acc);
            }
        }
    }

    Ok(acc)
}
