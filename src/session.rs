//! Session interactive : pile validée + boucle ligne à ligne.
//!
//! Contrats :
//! - La pile validée ne change qu’après une tentative entièrement réussie
//!   (ou est vidée sur division par zéro). Jamais d’état partiel.
//! - Chaque session possède sa pile : aucun état partagé entre sessions.
//! - Le noyau ne panique jamais sur une saisie : tout finit en `Reponse`.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::noyau::jetons::{decouper, format_operateurs, format_tokens, Operateur};
use crate::noyau::nombre::est_numerique;
use crate::noyau::{est_entree_valide, reduire, Calculateur, ErreurCalcul};

pub const PROMPT: &str = "> ";

pub const BANNIERE: &str = "\
Calculatrice RPN (notation polonaise inverse)
Tapez des nombres et des opérateurs séparés par des espaces, ex. : 5 8 +
Ligne vide ou « q » pour quitter.";

/// Issue du traitement d’une ligne.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reponse {
    /// Ligne vide ou "q".
    Quitter,
    /// Refus syntaxique : la pile précédente est conservée.
    EntreeInvalide,
    /// La ligne était un nombre seul : empilé tel quel.
    Nombre(String),
    /// Réduction validée : dernier élément de la nouvelle pile.
    Resultat(String),
    /// Pile vidée.
    DivisionParZero,
    /// Des opérateurs restent sans opérandes : la pile précédente est conservée.
    OperandesInsuffisants,
}

impl Reponse {
    /// Lignes à afficher pour cette réponse.
    pub fn rendu(&self, operateurs: &[Operateur]) -> Vec<String> {
        match self {
            Reponse::Quitter => Vec::new(),
            Reponse::Nombre(v) | Reponse::Resultat(v) => vec![v.clone()],
            Reponse::EntreeInvalide => {
                let ops = format_operateurs(operateurs);
                vec![
                    "Entrée invalide.".to_string(),
                    format!("Nombres acceptés : 5, -2.98, .7, 1.678e+32 ; opérateurs : {ops}"),
                    "Une expression commence par deux nombres, séparés par des espaces."
                        .to_string(),
                    "Ligne vide ou « q » pour quitter.".to_string(),
                ]
            }
            Reponse::DivisionParZero => vec![
                "Erreur : division par zéro.".to_string(),
                "La pile a été vidée, recommencez.".to_string(),
            ],
            Reponse::OperandesInsuffisants => vec![
                "Trop d’opérations, pas assez d’opérandes.".to_string(),
                "La ligne est ignorée.".to_string(),
            ],
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pile: Vec<String>,
    calc: Calculateur,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let calc = Calculateur::new(config);
        info!(
            backend = %calc.backend(),
            precision = calc.precision(),
            operateurs = %format_operateurs(calc.operateurs()),
            "session prête"
        );
        Self {
            pile: Vec::new(),
            calc,
        }
    }

    /// Pile validée (jetons).
    pub fn pile(&self) -> &[String] {
        &self.pile
    }

    pub fn calculateur(&self) -> &Calculateur {
        &self.calc
    }

    /// "Expression courante" : pile jointe par des espaces, None si vide.
    pub fn expression_courante(&self) -> Option<String> {
        if self.pile.is_empty() {
            None
        } else {
            Some(format_tokens(&self.pile))
        }
    }

    pub fn reinitialiser(&mut self) {
        self.pile.clear();
    }

    /// Traite une ligne saisie.
    pub fn traiter_ligne(&mut self, ligne: &str) -> Reponse {
        let nouveaux = decouper(ligne);
        if nouveaux.is_empty() || (nouveaux.len() == 1 && nouveaux[0] == "q") {
            return Reponse::Quitter;
        }

        let mut candidate = self.pile.clone();
        candidate.extend(nouveaux.iter().cloned());

        if !est_entree_valide(&candidate, self.calc.operateurs()) {
            debug!(candidate = %format_tokens(&candidate), "candidate refusée (syntaxe)");
            return Reponse::EntreeInvalide;
        }

        // nombre seul : pas de réduction
        if nouveaux.len() == 1 && est_numerique(&nouveaux[0]) {
            self.pile = candidate;
            return Reponse::Nombre(nouveaux[0].clone());
        }

        match reduire(&candidate, &self.calc) {
            Err(ErreurCalcul::DivisionParZero) => {
                warn!(candidate = %format_tokens(&candidate), "division par zéro : pile vidée");
                self.pile.clear();
                Reponse::DivisionParZero
            }
            Err(e) => {
                // reduire() ne remonte que la division par zéro
                warn!("réduction : erreur inattendue {e}");
                Reponse::OperandesInsuffisants
            }
            Ok(reduite) if reduite.iter().any(|t| !est_numerique(t)) => {
                debug!(reduite = %format_tokens(&reduite), "candidate refusée (opérandes)");
                Reponse::OperandesInsuffisants
            }
            Ok(reduite) => {
                debug!(pile = %format_tokens(&reduite), "pile validée");
                self.pile = reduite;
                // candidate valide non vide => pile non vide
                Reponse::Resultat(self.pile.last().cloned().unwrap_or_default())
            }
        }
    }

    /// Lignes complètes à afficher après une réponse (rendu + expression courante).
    pub fn lignes_reponse(&self, reponse: &Reponse) -> Vec<String> {
        let mut lignes = reponse.rendu(self.calc.operateurs());
        if let Some(expr) = self.expression_courante() {
            lignes.push(format!("Expression courante : {expr}"));
        }
        lignes
    }

    /// Boucle complète sur un flux (stdin non interactif, tests).
    /// S’arrête sur "q", ligne vide ou fin de flux.
    pub fn executer<R: BufRead, W: Write>(
        &mut self,
        entree: R,
        mut sortie: W,
        banniere: bool,
    ) -> io::Result<()> {
        if banniere {
            writeln!(sortie, "{BANNIERE}")?;
        }

        let mut lignes = entree.lines();
        loop {
            write!(sortie, "{PROMPT}")?;
            sortie.flush()?;

            let Some(ligne) = lignes.next() else {
                writeln!(sortie)?;
                break;
            };
            let ligne = ligne?;

            let reponse = self.traiter_ligne(&ligne);
            if reponse == Reponse::Quitter {
                break;
            }
            for l in self.lignes_reponse(&reponse) {
                writeln!(sortie, "{l}")?;
            }
        }

        sortie.flush()
    }
}
