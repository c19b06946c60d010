// FICHIER : backend/src/migration/students.rs

//! Assainissement des identifiants élèves.
//!
//! Deux passes séquentielles sur la collection `students` :
//! 1. les `studentId` vides ("") deviennent null ;
//! 2. les doublons `(school, studentId)` sont résolus en conservant le
//!    premier document dans l'ordre de lecture, les suivants perdent
//!    leur identifiant (null).
//! Même contrat que la migration de schéma : une écriture atomique par
//! document, panne isolée par document, mode simulation sans écriture.

use super::{CleanupStats, STUDENTS_COLLECTION};
use crate::json_db::collections::CollectionsManager;
use crate::{user_error, user_info, user_warn};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

pub async fn fix_student_ids(
    mgr: &CollectionsManager<'_>,
    dry_run: bool,
) -> Result<CleanupStats> {
    let mut docs = mgr
        .list_all(STUDENTS_COLLECTION)
        .await
        .context("Lecture de la collection students impossible")?;

    let mut stats = CleanupStats {
        total: docs.len(),
        ..Default::default()
    };

    // --- PASSE 1 : identifiants vides -> null ---
    for doc in docs.iter_mut() {
        let id = doc
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let Some(obj) = doc.as_object_mut() else { continue };
        let is_empty_sid =
            matches!(obj.get("studentId"), Some(Value::String(s)) if s.is_empty());
        if !is_empty_sid {
            continue;
        }

        obj.insert("studentId".to_string(), Value::Null);
        stats.emptied += 1;

        if dry_run {
            continue;
        }
        match id {
            Some(id) => {
                if let Err(e) = mgr.update_document(STUDENTS_COLLECTION, &id, doc).await {
                    user_error!("Échec de mise à jour de l'élève {} : {:#}", id, e);
                    stats.errored += 1;
                }
            }
            None => {
                user_error!("Élève sans identifiant valide, conversion ignorée");
                stats.errored += 1;
            }
        }
    }

    if stats.emptied > 0 {
        user_info!(
            "{} identifiant(s) élève vide(s) converti(s) en null",
            stats.emptied
        );
    }

    // --- PASSE 2 : résolution des doublons (school, studentId) ---
    // Les identifiants null ou vides ne participent pas au groupement.
    let mut groups: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for doc in &docs {
        let Some(sid) = doc.get("studentId").and_then(|v| v.as_str()) else {
            continue;
        };
        if sid.is_empty() {
            continue;
        }
        let Some(id) = doc.get("id").and_then(|v| v.as_str()) else {
            continue;
        };
        let school = doc
            .get("school")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        groups
            .entry((school, sid.to_string()))
            .or_default()
            .push(id.to_string());
    }

    let index_of: HashMap<String, usize> = docs
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            d.get("id")
                .and_then(|v| v.as_str())
                .map(|s| (s.to_string(), i))
        })
        .collect();

    for ((school, sid), ids) in groups {
        if ids.len() < 2 {
            continue;
        }
        stats.duplicates += 1;
        user_warn!(
            "Doublon détecté : école {}, studentId {} ({} documents)",
            if school.is_empty() { "<aucune>" } else { school.as_str() },
            sid,
            ids.len()
        );

        // Le premier dans l'ordre de lecture conserve son identifiant
        for dup_id in &ids[1..] {
            let Some(&idx) = index_of.get(dup_id) else {
                stats.errored += 1;
                continue;
            };
            if let Some(obj) = docs[idx].as_object_mut() {
                obj.insert("studentId".to_string(), Value::Null);
            }
            stats.nullified += 1;

            if dry_run {
                continue;
            }
            if let Err(e) = mgr
                .update_document(STUDENTS_COLLECTION, dup_id, &docs[idx])
                .await
            {
                user_error!("Échec de mise à jour de l'élève {} : {:#}", dup_id, e);
                stats.errored += 1;
            }
        }
    }

    if stats.duplicates == 0 {
        user_info!("Aucun doublon d'identifiant élève");
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_db::collections::CollectionsManager;
    use crate::json_db::test_utils::*;
    use serde_json::json;

    async fn seed_students(mgr: &CollectionsManager<'_>) {
        let students = vec![
            json!({"id": "stu_1", "name": "Chan", "school": "sch_x", "studentId": "123"}),
            json!({"id": "stu_2", "name": "Wong", "school": "sch_x", "studentId": "123"}),
            json!({"id": "stu_3", "name": "Lam", "school": "sch_y", "studentId": "123"}),
            json!({"id": "stu_4", "name": "Ho", "school": "sch_x", "studentId": ""}),
            json!({"id": "stu_5", "name": "Lee", "school": "sch_x"}),
        ];
        for doc in students {
            mgr.insert_raw("students", &doc).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_student_ids_become_null() {
        let env = init_test_env().await;
        let mgr = CollectionsManager::new(&env.cfg, &env.space, &env.db);
        seed_students(&mgr).await;

        let stats = fix_student_ids(&mgr, false).await.unwrap();
        assert_eq!(stats.emptied, 1);

        let ho = mgr.get("students", "stu_4").await.unwrap().unwrap();
        assert_eq!(ho["studentId"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_duplicates_keep_first_in_read_order() {
        let env = init_test_env().await;
        let mgr = CollectionsManager::new(&env.cfg, &env.space, &env.db);
        seed_students(&mgr).await;

        let stats = fix_student_ids(&mgr, false).await.unwrap();

        // Un seul groupe en doublon : (sch_x, "123") -> stu_1 conservé
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.nullified, 1);
        assert_eq!(stats.errored, 0);

        let kept = mgr.get("students", "stu_1").await.unwrap().unwrap();
        assert_eq!(kept["studentId"], "123");
        let nulled = mgr.get("students", "stu_2").await.unwrap().unwrap();
        assert_eq!(nulled["studentId"], serde_json::Value::Null);

        // Même studentId dans une autre école : pas un doublon
        let other = mgr.get("students", "stu_3").await.unwrap().unwrap();
        assert_eq!(other["studentId"], "123");
    }

    #[tokio::test]
    async fn test_dry_run_counts_without_writing() {
        let env = init_test_env().await;
        let mgr = CollectionsManager::new(&env.cfg, &env.space, &env.db);
        seed_students(&mgr).await;

        let before = mgr.list_all("students").await.unwrap();
        let stats = fix_student_ids(&mgr, true).await.unwrap();

        assert_eq!(stats.emptied, 1);
        assert_eq!(stats.nullified, 1);
        assert_eq!(mgr.list_all("students").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_rerun_is_noop() {
        let env = init_test_env().await;
        let mgr = CollectionsManager::new(&env.cfg, &env.space, &env.db);
        seed_students(&mgr).await;

        fix_student_ids(&mgr, false).await.unwrap();
        let second = fix_student_ids(&mgr, false).await.unwrap();

        assert_eq!(second.emptied, 0);
        assert_eq!(second.duplicates, 0);
        assert_eq!(second.nullified, 0);
    }
}
