// FICHIER : backend/src/migration/backup.rs

//! Sauvegarde et restauration d'une collection.
//!
//! L'artefact est un fichier JSON autonome : la séquence ordonnée et
//! complète des documents, identifiants compris, figée au moment de la
//! lecture. Il est publié atomiquement et n'est jamais modifié ensuite.

use super::BackupReport;
use crate::json_db::collections::CollectionsManager;
use crate::utils::fs;
use crate::utils::Utc;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Horodatage UTC trié chronologiquement et sûr pour un nom de fichier.
/// La milliseconde évite les collisions de deux sauvegardes rapprochées.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Copie intégrale de la collection vers un artefact horodaté.
/// La publication est atomique : soit l'artefact complet existe,
/// soit rien n'existe sous le nom final.
pub async fn create_backup(
    mgr: &CollectionsManager<'_>,
    collection: &str,
) -> Result<BackupReport> {
    let docs = mgr
        .list_all(collection)
        .await
        .with_context(|| format!("Lecture de la collection {} impossible", collection))?;

    let backups_dir = mgr.config.db_backups_root(&mgr.space, &mgr.db);
    fs::ensure_dir(&backups_dir).await?;

    let path = backups_dir.join(format!("{}-backup-{}.json", collection, timestamp()));
    fs::write_json_atomic(&path, &docs)
        .await
        .with_context(|| format!("Écriture de l'artefact {:?} impossible", path))?;

    Ok(BackupReport {
        path,
        documents: docs.len(),
    })
}

/// Remplace la collection entière par le contenu d'un artefact.
///
/// L'artefact est chargé et validé AVANT toute action destructrice :
/// la suppression de la collection n'a jamais lieu si le fichier est
/// introuvable ou mal formé.
pub async fn restore_from_backup(
    mgr: &CollectionsManager<'_>,
    collection: &str,
    artifact: &Path,
) -> Result<usize> {
    if !fs::exists(artifact).await {
        bail!("Artefact de sauvegarde introuvable : {:?}", artifact);
    }

    let docs: Vec<Value> = fs::read_json(artifact)
        .await
        .with_context(|| format!("Artefact de sauvegarde illisible : {:?}", artifact))?;

    // Chaque document doit porter son identifiant d'origine
    let mut ids = Vec::with_capacity(docs.len());
    for (index, doc) in docs.iter().enumerate() {
        let id = doc
            .get("id")
            .and_then(|v| v.as_str())
            .with_context(|| {
                format!(
                    "Artefact invalide : le document #{} n'a pas d'identifiant",
                    index
                )
            })?;
        ids.push(id.to_string());
    }

    // Destruction puis réinsertion en préservant les identifiants
    mgr.drop_collection(collection).await?;
    for (doc, id) in docs.iter().zip(&ids) {
        mgr.update_document(collection, id, doc).await?;
    }

    let count = mgr.count(collection).await?;
    if count != docs.len() {
        bail!(
            "Restauration incohérente : {} documents attendus, {} présents",
            docs.len(),
            count
        );
    }

    Ok(docs.len())
}
