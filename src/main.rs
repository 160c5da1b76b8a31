// src/main.rs
//
// Calculatrice RPN — point d’entrée terminal
// ------------------------------------------
// But:
// - stdin interactif (TTY) : rustyline (édition + historique)
// - stdin redirigé (pipe)  : Session::executer sur stdin bufferisé
// - journalisation sur stderr (RUST_LOG, défaut: warn) : stdout reste la sortie calcul

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use calculatrice_rpn::config::{parse_operateurs, PRECISION_DEFAUT};
use calculatrice_rpn::session::{BANNIERE, PROMPT};
use calculatrice_rpn::{BackendKind, Config, Reponse, Session};

#[derive(Parser, Debug)]
#[command(name = "rpn")]
#[command(version)]
#[command(about = "Calculatrice RPN incrémentale, précision arbitraire")]
struct Cli {
    /// Chiffres après la virgule conservés au minimum
    #[arg(long, short, env = "RPN_PRECISION", default_value_t = PRECISION_DEFAUT)]
    precision: usize,

    /// Backend arithmétique : exact ou flottant
    #[arg(long, short, env = "RPN_BACKEND", default_value_t = BackendKind::par_defaut())]
    backend: BackendKind,

    /// Opérateurs autorisés (sous-ensemble de "+-*/")
    #[arg(long, default_value = "+-*/")]
    operateurs: String,

    /// Pas de bannière d’accueil
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config {
        precision: cli.precision,
        operateurs: parse_operateurs(&cli.operateurs).context("option --operateurs")?,
        backend: cli.backend,
    }
    .valider()
    .context("configuration invalide")?;

    info!(?config, "démarrage");
    let mut session = Session::new(&config);

    if io::stdin().is_terminal() {
        interactif(&mut session, !cli.quiet)
    } else {
        session
            .executer(io::stdin().lock(), io::stdout().lock(), !cli.quiet)
            .context("entrée/sortie standard")
    }
}

fn interactif(session: &mut Session, banniere: bool) -> Result<()> {
    let mut editeur = DefaultEditor::new().context("initialisation du terminal")?;

    if banniere {
        println!("{BANNIERE}");
    }

    loop {
        match editeur.readline(PROMPT) {
            Ok(ligne) => {
                let reponse = session.traiter_ligne(&ligne);
                if reponse == Reponse::Quitter {
                    break;
                }
                // historique : un échec n’interrompt pas la session
                if let Err(e) = editeur.add_history_entry(ligne.as_str()) {
                    debug!("historique : {e}");
                }
                for l in session.lignes_reponse(&reponse) {
                    println!("{l}");
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("lecture de ligne"),
        }
    }

    Ok(())
}
