// FICHIER : backend/tools/migrate-cli/src/commands/schema.rs

//! Handlers de la migration du schéma écoles.
//!
//! Le mode migration enchaîne : ANALYZE -> BACKUP -> CONFIRM -> APPLY ->
//! SUMMARIZE. Tout échec avant l'application est fatal ; pendant
//! l'application, les pannes sont isolées par document. Le mode
//! restauration court-circuite tout le reste.

use hkteacher::json_db::collections::CollectionsManager;
use hkteacher::migration::{backup, engine};
use hkteacher::migration::{BackupReport, MigrationStats, SchemaAnalysis, SCHOOLS_COLLECTION};
use hkteacher::utils::data;
use hkteacher::utils::error::{AnyResult, Context};
use hkteacher::{user_info, user_success, user_warn};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct MigrateOptions {
    pub dry_run: bool,
    pub no_backup: bool,
    pub force_backup: bool,
}

pub async fn handle_analyze(mgr: &CollectionsManager<'_>) -> AnyResult<()> {
    user_info!("🔍 Analyse du schéma en cours...");
    let analysis = engine::analyze_collection(mgr).await?;
    print_analysis(&analysis);
    Ok(())
}

pub async fn handle_backup(mgr: &CollectionsManager<'_>) -> AnyResult<()> {
    user_info!("💾 Création de la sauvegarde...");
    let report = backup::create_backup(mgr, SCHOOLS_COLLECTION).await?;
    user_success!("Sauvegarde créée : {}", report.path.display());
    user_info!("📊 {} écoles sauvegardées", report.documents);
    Ok(())
}

pub async fn handle_restore(mgr: &CollectionsManager<'_>, file: &Path) -> AnyResult<()> {
    user_info!("🔄 Restauration depuis {}", file.display());
    let count = backup::restore_from_backup(mgr, SCHOOLS_COLLECTION, file).await?;
    user_success!("{} écoles restaurées depuis la sauvegarde", count);
    Ok(())
}

pub async fn handle_migrate(
    mgr: &CollectionsManager<'_>,
    opts: MigrateOptions,
) -> AnyResult<()> {
    user_info!("🚀 Démarrage de la migration du schéma écoles...");
    if opts.dry_run {
        user_warn!("Mode SIMULATION : aucun changement ne sera appliqué");
    }

    // 1. ANALYZE : impossible d'avancer sans connaître l'état de départ
    let analysis = engine::analyze_collection(mgr).await?;
    print_analysis(&analysis);

    // 2. BACKUP : fatal en cas d'échec, jamais ignoré silencieusement
    let backup_report = if opts.no_backup {
        user_warn!("Sauvegarde désactivée (--no-backup)");
        None
    } else if opts.dry_run && !opts.force_backup {
        user_info!("Simulation : sauvegarde ignorée (--backup pour la forcer)");
        None
    } else {
        user_info!("💾 Création de la sauvegarde...");
        let report = backup::create_backup(mgr, SCHOOLS_COLLECTION).await?;
        user_success!("Sauvegarde créée : {}", report.path.display());
        user_info!("📊 {} écoles sauvegardées", report.documents);
        Some(report)
    };

    // 3. CONFIRM : point de suspension unique, sauté en simulation
    if !opts.dry_run && !confirm_migration().await? {
        user_warn!("Migration annulée par l'opérateur");
        return Ok(());
    }

    // 4. APPLY
    let report = engine::migrate_collection(mgr, opts.dry_run).await?;

    if opts.dry_run {
        for preview in &report.previews {
            user_info!("🔍 Changement prévu pour {} ({}) :", preview.name, preview.id);
            println!("{}", data::stringify_pretty(&preview.patch)?);
        }
    }

    // 5. SUMMARIZE
    print_summary(&report.stats, backup_report.as_ref(), opts.dry_run);

    // Un échec sur chaque document traité vaut échec de la procédure ;
    // des erreurs partielles restent un avertissement.
    if report.stats.total > 0 && report.stats.errored == report.stats.total {
        anyhow::bail!(
            "Échec complet : {} documents en erreur sur {}",
            report.stats.errored,
            report.stats.total
        );
    }

    Ok(())
}

/// Attend un acquittement explicite de l'opérateur : une ligne sur stdin.
/// Ctrl+C (ou une entrée fermée) vaut annulation.
async fn confirm_migration() -> AnyResult<bool> {
    user_warn!("ATTENTION : cette opération va modifier la base !");
    user_warn!("Vérifiez qu'une sauvegarde existe avant de continuer.");
    user_info!("   Appuyez sur Entrée pour continuer, Ctrl+C pour annuler...");

    let mut line = String::new();
    let bytes = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Lecture de la confirmation impossible")?;
    Ok(bytes > 0)
}

fn print_analysis(analysis: &SchemaAnalysis) {
    user_info!("📊 Analyse du schéma :");
    user_info!("   Écoles au total : {}", analysis.total);
    user_info!("   Avec website : {}", analysis.with_website);
    user_info!("   Avec nameCh : {}", analysis.with_name_ch);
    user_info!("   Avec contactPerson : {}", analysis.with_contact_person);
    user_info!("   Avec description : {}", analysis.with_description);
}

fn print_summary(stats: &MigrationStats, backup_report: Option<&BackupReport>, dry_run: bool) {
    user_info!("📊 Résumé de la migration :");
    user_info!("   Écoles au total : {}", stats.total);
    user_info!("   Migrées : {}", stats.migrated);
    user_info!("   Ignorées (déjà conformes) : {}", stats.skipped);
    if stats.errored > 0 {
        user_warn!("Erreurs : {}", stats.errored);
    } else {
        user_info!("   Erreurs : 0");
    }
    if let Some(report) = backup_report {
        user_info!("   Sauvegarde : {}", report.path.display());
    }

    if dry_run {
        user_warn!("Ceci était une SIMULATION : aucun changement appliqué");
        user_info!("   Relancez sans --dry-run pour appliquer la migration");
    } else {
        user_success!("Migration terminée !");
    }
}
