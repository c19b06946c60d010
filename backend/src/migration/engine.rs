// FICHIER : backend/src/migration/engine.rs

//! Moteur de migration du schéma des écoles.
//!
//! Schéma cible : `website` et `nameCh` supprimés, `contactPerson` et
//! `description` toujours présents (null si inconnus). Le patch est calculé
//! par document et appliqué en UNE écriture atomique : un document n'est
//! jamais visible à moitié migré. Relancer la migration sur une collection
//! déjà migrée ne produit aucun changement.

use super::{
    DocumentPatch, MigrationReport, MigrationStats, PatchPreview, SchemaAnalysis,
    SCHOOLS_COLLECTION,
};
use crate::json_db::collections::CollectionsManager;
use crate::{user_error, user_info, user_success};
use anyhow::{Context, Result};
use serde_json::Value;

/// Calcule le patch minimal pour un document.
/// Seuls les quatre champs d'intérêt sont considérés ; tout le reste
/// traverse la migration sans être touché.
pub fn compute_patch(doc: &Value) -> DocumentPatch {
    let mut patch = DocumentPatch::default();
    let Some(obj) = doc.as_object() else {
        return patch;
    };

    // Champs dépréciés : retirés dès qu'ils sont présents,
    // y compris avec une valeur vide ou nulle.
    if obj.contains_key("website") {
        patch.unset.push("website".to_string());
    }
    if obj.contains_key("nameCh") {
        patch.unset.push("nameCh".to_string());
    }

    // Champs requis : ajoutés seulement s'ils sont strictement absents.
    // Une valeur null existante est déjà conforme.
    if !obj.contains_key("contactPerson") {
        patch.set.insert("contactPerson".to_string(), Value::Null);
    }
    if !obj.contains_key("description") {
        patch.set.insert("description".to_string(), Value::Null);
    }

    patch
}

/// Applique le patch en mémoire (unset puis set).
pub fn apply_patch(doc: &mut Value, patch: &DocumentPatch) {
    if let Some(obj) = doc.as_object_mut() {
        for field in &patch.unset {
            obj.remove(field);
        }
        for (field, value) in &patch.set {
            obj.insert(field.clone(), value.clone());
        }
    }
}

/// Analyse de l'état courant : combien de documents portent chaque champ
/// d'intérêt. Lecture pure, aucun effet de bord ; un échec ici fait
/// échouer la procédure entière.
pub async fn analyze_collection(mgr: &CollectionsManager<'_>) -> Result<SchemaAnalysis> {
    let docs = mgr
        .list_all(SCHOOLS_COLLECTION)
        .await
        .context("Analyse du schéma impossible")?;

    let mut report = SchemaAnalysis {
        total: docs.len(),
        ..Default::default()
    };

    for doc in &docs {
        let Some(obj) = doc.as_object() else { continue };
        if obj.contains_key("website") {
            report.with_website += 1;
        }
        if obj.contains_key("nameCh") {
            report.with_name_ch += 1;
        }
        if obj.contains_key("contactPerson") {
            report.with_contact_person += 1;
        }
        if obj.contains_key("description") {
            report.with_description += 1;
        }
    }

    Ok(report)
}

/// Migre toute la collection, séquentiellement, dans l'ordre de lecture.
///
/// L'échec d'un document est journalisé, compté, et la boucle continue :
/// c'est le seul point du système où une panne partielle est tolérée.
/// En mode simulation, rien n'est écrit ; les patches prévus sont
/// retournés pour revue et comptés comme « migrés ».
pub async fn migrate_collection(
    mgr: &CollectionsManager<'_>,
    dry_run: bool,
) -> Result<MigrationReport> {
    let docs = mgr
        .list_all(SCHOOLS_COLLECTION)
        .await
        .context("Lecture de la collection schools impossible")?;

    let mut report = MigrationReport {
        stats: MigrationStats {
            total: docs.len(),
            ..Default::default()
        },
        previews: Vec::new(),
    };

    for (index, doc) in docs.iter().enumerate() {
        let label = display_label(doc);
        user_info!("📝 Traitement {}/{} : {}", index + 1, docs.len(), label);

        let patch = compute_patch(doc);
        if patch.is_empty() {
            user_info!("   Aucune migration nécessaire pour {}", label);
            report.stats.skipped += 1;
            continue;
        }

        for field in &patch.unset {
            user_info!("   - Suppression du champ {}", field);
        }
        for field in patch.set.keys() {
            user_info!("   - Ajout du champ {}", field);
        }

        // L'identifiant immuable est la seule clé d'adressage de l'écriture
        let Some(id) = doc.get("id").and_then(|v| v.as_str()) else {
            user_error!("   Document sans identifiant valide : {}", label);
            report.stats.errored += 1;
            continue;
        };

        if dry_run {
            user_info!("   🔍 [SIMULATION] Changement prévu pour {}", label);
            report.previews.push(PatchPreview {
                id: id.to_string(),
                name: label.clone(),
                patch,
            });
            report.stats.migrated += 1;
            continue;
        }

        let mut updated = doc.clone();
        apply_patch(&mut updated, &patch);

        match mgr.update_document(SCHOOLS_COLLECTION, id, &updated).await {
            Ok(()) => {
                user_success!("   École migrée : {}", label);
                report.stats.migrated += 1;
            }
            Err(e) => {
                user_error!("   Échec de migration pour {} : {:#}", label, e);
                report.stats.errored += 1;
            }
        }
    }

    Ok(report)
}

fn display_label(doc: &Value) -> String {
    doc.get("name")
        .and_then(|v| v.as_str())
        .or_else(|| doc.get("id").and_then(|v| v.as_str()))
        .unwrap_or("<sans nom>")
        .to_string()
}
