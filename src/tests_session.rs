//! Scénarios de session (bout en bout, sans terminal).

use crate::config::{BackendKind, Config};
use crate::noyau::jetons::Operateur;
use crate::session::{Reponse, Session, BANNIERE, PROMPT};

fn session() -> Session {
    Session::default()
}

fn executer(lignes: &str, banniere: bool) -> String {
    let mut s = session();
    let mut sortie: Vec<u8> = Vec::new();
    s.executer(lignes.as_bytes(), &mut sortie, banniere)
        .unwrap_or_else(|e| panic!("io: {e}"));
    String::from_utf8(sortie).unwrap_or_else(|e| panic!("utf8: {e}"))
}

#[test]
fn exemple_de_reference() {
    let mut s = session();

    assert_eq!(
        s.traiter_ligne("5 5 5 8 + + -"),
        Reponse::Resultat("-13".into())
    );
    assert_eq!(s.expression_courante().as_deref(), Some("-13"));

    assert_eq!(s.traiter_ligne("13 +"), Reponse::Resultat("0".into()));
    assert_eq!(s.pile(), ["0"]);
}

#[test]
fn exemple_de_reference_sur_les_deux_backends() {
    for backend in [BackendKind::Exact, BackendKind::Flottant] {
        let mut s = Session::new(&Config {
            backend,
            ..Config::default()
        });
        s.traiter_ligne("5 5 5 8 + + -");
        assert_eq!(s.traiter_ligne("13 +"), Reponse::Resultat("0".into()), "{backend}");
    }
}

#[test]
fn quitter() {
    let mut s = session();
    assert_eq!(s.traiter_ligne(""), Reponse::Quitter);
    assert_eq!(s.traiter_ligne("   \t "), Reponse::Quitter);
    assert_eq!(s.traiter_ligne("q"), Reponse::Quitter);
    assert_eq!(s.traiter_ligne("  q  "), Reponse::Quitter);
    // "q" au milieu d’une ligne n’est pas une sortie
    assert_eq!(s.traiter_ligne("1 q"), Reponse::EntreeInvalide);
}

#[test]
fn nombre_seul_empile_sans_reduction() {
    let mut s = session();
    assert_eq!(s.traiter_ligne("5"), Reponse::Nombre("5".into()));
    assert_eq!(s.traiter_ligne("1.678e+32"), Reponse::Nombre("1.678e+32".into()));
    assert_eq!(s.traiter_ligne("0"), Reponse::Nombre("0".into()));
    assert_eq!(s.pile(), ["5", "1.678e+32", "0"]);
}

#[test]
fn operandes_en_attente_puis_operateurs() {
    let mut s = session();
    assert_eq!(s.traiter_ligne("3 4 5"), Reponse::Resultat("5".into()));
    assert_eq!(s.expression_courante().as_deref(), Some("3 4 5"));

    assert_eq!(s.traiter_ligne("*"), Reponse::Resultat("20".into()));
    assert_eq!(s.pile(), ["3", "20"]);

    assert_eq!(s.traiter_ligne("+"), Reponse::Resultat("23".into()));
    assert_eq!(s.pile(), ["23"]);
}

#[test]
fn entree_invalide_conserve_la_pile() {
    let mut s = session();
    s.traiter_ligne("5 8");

    assert_eq!(s.traiter_ligne("e20"), Reponse::EntreeInvalide);
    assert_eq!(s.traiter_ligne("+ x"), Reponse::EntreeInvalide);
    assert_eq!(s.pile(), ["5", "8"]);

    // pile vide : un opérateur en 1re/2e position est refusé
    let mut v = session();
    assert_eq!(v.traiter_ligne("+"), Reponse::EntreeInvalide);
    assert_eq!(v.traiter_ligne("3 - 4"), Reponse::EntreeInvalide);
    assert!(v.pile().is_empty());
}

#[test]
fn operateur_valide_grace_a_la_pile() {
    // "5 +" seul est refusé, mais accepté quand la pile fournit l’opérande manquant
    let mut s = session();
    assert_eq!(s.traiter_ligne("5 +"), Reponse::EntreeInvalide);
    s.traiter_ligne("3");
    assert_eq!(s.traiter_ligne("5 +"), Reponse::Resultat("8".into()));
}

#[test]
fn division_par_zero_vide_la_pile() {
    let mut s = session();
    s.traiter_ligne("1 2 3");
    assert_eq!(s.traiter_ligne("0 /"), Reponse::DivisionParZero);
    assert!(s.pile().is_empty());
    assert_eq!(s.expression_courante(), None);

    // la session continue
    assert_eq!(s.traiter_ligne("5 8 +"), Reponse::Resultat("13".into()));
}

#[test]
fn trop_d_operations_conserve_la_pile() {
    let mut s = session();
    s.traiter_ligne("7 9");
    assert_eq!(s.traiter_ligne("+ - - -"), Reponse::OperandesInsuffisants);
    assert_eq!(s.pile(), ["7", "9"]);

    assert_eq!(
        session().traiter_ligne("7 9 + - - -"),
        Reponse::OperandesInsuffisants
    );
}

#[test]
fn reinitialiser() {
    let mut s = session();
    s.traiter_ligne("1 2");
    s.reinitialiser();
    assert!(s.pile().is_empty());
}

#[test]
fn sessions_independantes() {
    let mut a = session();
    let mut b = session();
    a.traiter_ligne("1 2");
    b.traiter_ligne("9");
    assert_eq!(a.pile(), ["1", "2"]);
    assert_eq!(b.pile(), ["9"]);
}

#[test]
fn operateurs_restreints_par_config() {
    let mut s = Session::new(&Config {
        operateurs: vec![Operateur::Plus, Operateur::Minus],
        ..Config::default()
    });
    assert_eq!(s.traiter_ligne("6 3 /"), Reponse::EntreeInvalide);
    assert_eq!(s.traiter_ligne("6 3 -"), Reponse::Resultat("3".into()));

    let lignes = Reponse::EntreeInvalide.rendu(s.calculateur().operateurs());
    assert!(lignes.iter().any(|l| l.ends_with("opérateurs : + -")), "{lignes:?}");
}

#[test]
fn precision_configurable() {
    let mut s = Session::new(&Config {
        precision: 3,
        ..Config::default()
    });
    assert_eq!(s.traiter_ligne("1 3 /"), Reponse::Resultat("0.333".into()));
}

#[test]
fn rendu_des_messages() {
    let ops = Operateur::TOUS;
    assert!(Reponse::Quitter.rendu(&ops).is_empty());
    assert_eq!(Reponse::Resultat("13".into()).rendu(&ops), vec!["13"]);
    assert!(Reponse::DivisionParZero.rendu(&ops)[0].contains("division par zéro"));
    assert!(Reponse::OperandesInsuffisants.rendu(&ops)[0]
        .contains("pas assez d’opérandes"));
    assert!(Reponse::EntreeInvalide.rendu(&ops).len() > 1);
}

#[test]
fn lignes_reponse_avec_expression_courante() {
    let mut s = session();
    let r = s.traiter_ligne("3 4");
    assert_eq!(
        s.lignes_reponse(&r),
        vec!["4".to_string(), "Expression courante : 3 4".into()]
    );

    let r = s.traiter_ligne("0 /");
    let lignes = s.lignes_reponse(&r);
    assert!(lignes.iter().all(|l| !l.starts_with("Expression courante")));
}

#[test]
fn executer_flux_complet() {
    let out = executer("5 5 5 8 + + -\n13 +\nq\n1 2 +\n", false);

    // rien après "q"
    assert!(!out.contains("> 3\n"), "{out}");
    assert!(out.starts_with(PROMPT));
    assert!(out.contains("-13\nExpression courante : -13\n"), "{out}");
    assert!(out.contains("> 0\nExpression courante : 0\n"), "{out}");
    assert!(out.ends_with(PROMPT), "{out:?}");
}

#[test]
fn executer_fin_de_flux_et_banniere() {
    let out = executer("5 8 +", true);
    assert!(out.starts_with(BANNIERE));
    assert!(out.contains("13\nExpression courante : 13\n"), "{out}");
    // fin de flux : dernier prompt puis retour ligne
    assert!(out.ends_with(&format!("{PROMPT}\n")), "{out:?}");
}

#[test]
fn executer_erreurs_affichees() {
    let out = executer("+\n5 0 /\n", false);
    assert!(out.contains("Entrée invalide."), "{out}");
    assert!(out.contains("Erreur : division par zéro."), "{out}");
    assert!(!out.contains("Expression courante"), "{out}");
}
