// FICHIER : backend/tools/migrate-cli/src/commands/students.rs

//! Handler de l'assainissement des identifiants élèves.

use hkteacher::json_db::collections::CollectionsManager;
use hkteacher::migration::students;
use hkteacher::utils::error::AnyResult;
use hkteacher::{user_info, user_success, user_warn};

pub async fn handle_fix(mgr: &CollectionsManager<'_>, dry_run: bool) -> AnyResult<()> {
    user_info!("🚀 Assainissement des identifiants élèves...");
    if dry_run {
        user_warn!("Mode SIMULATION : aucun changement ne sera appliqué");
    }

    let stats = students::fix_student_ids(mgr, dry_run).await?;

    user_info!("📊 Résumé de l'assainissement :");
    user_info!("   Élèves au total : {}", stats.total);
    user_info!("   Identifiants vides convertis : {}", stats.emptied);
    user_info!("   Groupes en doublon : {}", stats.duplicates);
    user_info!("   Identifiants réinitialisés : {}", stats.nullified);
    if stats.errored > 0 {
        user_warn!("Erreurs : {}", stats.errored);
    }

    if dry_run {
        user_warn!("Ceci était une SIMULATION : aucun changement appliqué");
    } else {
        user_success!("Assainissement terminé !");
    }
    Ok(())
}
