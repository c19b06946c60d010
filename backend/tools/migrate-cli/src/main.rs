// FICHIER : backend/tools/migrate-cli/src/main.rs

//! Outil d'administration de la base documentaire HK Teacher :
//! migration du schéma écoles, sauvegarde/restauration, assainissement
//! des identifiants élèves. Procédure batch, strictement séquentielle.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use hkteacher::json_db::collections::CollectionsManager;
use hkteacher::json_db::storage::{file_storage, JsonDbConfig};
use hkteacher::utils::error::{AnyResult, Context};
use hkteacher::utils::{env, logger};
use hkteacher::{user_error, user_info, user_success};

#[derive(Parser)]
#[command(name = "migrate-cli")]
#[command(about = "Outillage d'administration de la base documentaire HK Teacher", long_about = None)]
#[command(version)]
struct Cli {
    /// Racine des données de la plateforme
    #[arg(long, env = "PATH_HKTEACHER_DATA")]
    root: Option<PathBuf>,

    /// Espace de données
    #[arg(short, long, default_value = "hkteacher")]
    space: String,

    /// Base cible
    #[arg(short, long, default_value = "production")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// État du schéma de la collection schools (lecture pure)
    Analyze,

    /// Sauvegarde de la collection schools vers un artefact horodaté
    Backup,

    /// Migration du schéma écoles : analyse, sauvegarde, confirmation, application
    Migrate {
        /// Mode simulation : calcule et affiche les changements sans rien écrire
        #[arg(long)]
        dry_run: bool,

        /// Désactive la sauvegarde préalable (déconseillé)
        #[arg(long, conflicts_with = "backup")]
        no_backup: bool,

        /// Force la sauvegarde, même en mode simulation
        #[arg(long)]
        backup: bool,
    },

    /// Restauration destructrice de la collection schools depuis un artefact
    Restore {
        /// Chemin de l'artefact de sauvegarde
        #[arg(long)]
        file: PathBuf,
    },

    /// Assainissement des identifiants élèves (vides et doublons)
    FixStudentIds {
        /// Mode simulation : calcule et affiche les changements sans rien écrire
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // La racine des données est la seule configuration requise.
    // Son absence est fatale avant toute tentative de connexion.
    let Some(root) = cli.root else {
        eprintln!("❌ ERREUR : PATH_HKTEACHER_DATA n'est pas défini.");
        eprintln!("   Renseignez la variable d'environnement (ou .env), ou l'option --root.");
        std::process::exit(1);
    };

    let config = JsonDbConfig::new(root);
    let log_level = env::get_or("HKTEACHER_LOG_LEVEL", "info");
    logger::init_logging(Some(&config.logs_root()), &log_level);

    user_info!("{}", "=".repeat(60));
    user_info!("  HK Teacher — Administration de la base documentaire");
    user_info!("{}", "=".repeat(60));

    if let Err(e) = execute_command(&config, &cli.space, &cli.db, cli.command).await {
        user_error!("💥 La procédure a échoué : {:#}", e);
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
}

async fn execute_command(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    cmd: Commands,
) -> AnyResult<()> {
    // CONNECT : commun à tous les modes
    file_storage::open_db(config, space, db)
        .with_context(|| format!("Connexion impossible à la base {}/{}", space, db))?;
    user_success!("Connecté à la base {}/{}", space, db);

    let mgr = CollectionsManager::new(config, space, db);

    match cmd {
        Commands::Analyze => commands::schema::handle_analyze(&mgr).await,
        Commands::Backup => commands::schema::handle_backup(&mgr).await,
        Commands::Migrate {
            dry_run,
            no_backup,
            backup,
        } => {
            commands::schema::handle_migrate(
                &mgr,
                commands::schema::MigrateOptions {
                    dry_run,
                    no_backup,
                    force_backup: backup,
                },
            )
            .await
        }
        Commands::Restore { file } => commands::schema::handle_restore(&mgr, &file).await,
        Commands::FixStudentIds { dry_run } => {
            commands::students::handle_fix(&mgr, dry_run).await
        }
    }
}
