// FICHIER : backend/src/json_db/collections/collection.rs

//! Primitives collections : gestion des dossiers et fichiers JSON d'une collection.
//! Uniquement persistance et I/O, la logique métier vit au-dessus.

use crate::json_db::storage::{file_storage, JsonDbConfig};
use crate::utils::error::{AnyResult, Context};
use crate::utils::fs;
use serde_json::Value;
use std::path::PathBuf;

/// Racine des collections : {db_root}/collections/{collection}
pub fn collection_root(cfg: &JsonDbConfig, space: &str, db: &str, collection: &str) -> PathBuf {
    cfg.db_collection_path(space, db, collection)
}

/// S'assure que la collection existe (création récursive) - Async.
pub async fn create_collection_if_missing(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AnyResult<()> {
    let root = collection_root(cfg, space, db, collection);
    fs::ensure_dir(&root).await?;
    Ok(())
}

// --- FONCTIONS CRUD ---

pub async fn read_document(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> AnyResult<Option<Value>> {
    file_storage::read_document(cfg, space, db, collection, id).await
}

pub async fn write_document(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
    document: &Value,
) -> AnyResult<()> {
    create_collection_if_missing(cfg, space, db, collection).await?;
    file_storage::write_document(cfg, space, db, collection, id, document).await
}

pub async fn delete_document(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> AnyResult<bool> {
    file_storage::delete_document(cfg, space, db, collection, id).await
}

/// Supprime la collection entière (dossier et documents).
pub async fn drop_collection(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AnyResult<()> {
    let root = collection_root(cfg, space, db, collection);
    fs::remove_dir_all(&root).await?;
    Ok(())
}

// --- FONCTIONS UTILITAIRES ---

/// Liste triée des identifiants : l'ordre natif de lecture du stockage.
/// Les fichiers préfixés `_` sont réservés au système et ignorés.
pub async fn list_document_ids(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AnyResult<Vec<String>> {
    let root = collection_root(cfg, space, db, collection);
    let mut out = Vec::new();
    if !fs::exists(&root).await {
        return Ok(out);
    }
    let mut entries = fs::read_dir(&root).await?;
    while let Some(e) = entries
        .next_entry()
        .await
        .with_context(|| format!("Parcours interrompu dans {:?}", root))?
    {
        let p = e.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json") {
            if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('_') {
                    out.push(stem.to_string());
                }
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Charge tous les documents dans l'ordre natif de lecture.
/// Un document illisible interrompt la lecture : les procédures
/// d'administration ne doivent jamais travailler sur une vue partielle.
pub async fn list_documents(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AnyResult<Vec<Value>> {
    let ids = list_document_ids(cfg, space, db, collection).await?;
    let mut docs = Vec::with_capacity(ids.len());
    for id in ids {
        let doc = read_document(cfg, space, db, collection, &id)
            .await?
            .with_context(|| format!("Document disparu pendant la lecture : {}", id))?;
        docs.push(doc);
    }
    Ok(docs)
}

pub async fn count_documents(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AnyResult<usize> {
    Ok(list_document_ids(cfg, space, db, collection).await?.len())
}

pub async fn list_collection_names_fs(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
) -> AnyResult<Vec<String>> {
    let root = cfg.db_root(space, db).join("collections");
    let mut out = Vec::new();
    if !fs::exists(&root).await {
        return Ok(out);
    }
    let mut entries = fs::read_dir(&root).await?;
    while let Some(e) = entries
        .next_entry()
        .await
        .with_context(|| format!("Parcours interrompu dans {:?}", root))?
    {
        let ty = e.file_type().await?;
        if ty.is_dir() {
            if let Ok(name) = e.file_name().into_string() {
                out.push(name);
            }
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_collection_crud_async() {
        let dir = tempdir().unwrap();
        let config = JsonDbConfig::new(dir.path().to_path_buf());
        let (s, d, c) = ("space", "db", "col");

        let doc = json!({"id": "1", "data": "test"});

        // Create
        write_document(&config, s, d, c, "1", &doc).await.unwrap();

        // Read
        let read = read_document(&config, s, d, c, "1").await.unwrap().unwrap();
        assert_eq!(read["data"], "test");

        // List
        let ids = list_document_ids(&config, s, d, c).await.unwrap();
        assert_eq!(ids, vec!["1"]);

        // Delete
        assert!(delete_document(&config, s, d, c, "1").await.unwrap());
        let ids_after = list_document_ids(&config, s, d, c).await.unwrap();
        assert!(ids_after.is_empty());
    }

    #[tokio::test]
    async fn test_list_order_is_sorted_by_id() {
        let dir = tempdir().unwrap();
        let config = JsonDbConfig::new(dir.path().to_path_buf());
        let (s, d, c) = ("space", "db", "col");

        for id in ["b", "a", "c"] {
            write_document(&config, s, d, c, id, &json!({"id": id}))
                .await
                .unwrap();
        }

        let ids = list_document_ids(&config, s, d, c).await.unwrap();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_system_files_are_ignored() {
        let dir = tempdir().unwrap();
        let config = JsonDbConfig::new(dir.path().to_path_buf());
        let (s, d, c) = ("space", "db", "col");

        write_document(&config, s, d, c, "1", &json!({"id": "1"}))
            .await
            .unwrap();
        write_document(&config, s, d, c, "_meta", &json!({}))
            .await
            .unwrap();

        let ids = list_document_ids(&config, s, d, c).await.unwrap();
        assert_eq!(ids, vec!["1"]);
    }

    #[tokio::test]
    async fn test_corrupt_document_aborts_listing() {
        let dir = tempdir().unwrap();
        let config = JsonDbConfig::new(dir.path().to_path_buf());
        let (s, d, c) = ("space", "db", "col");

        write_document(&config, s, d, c, "ok", &json!({"id": "ok"}))
            .await
            .unwrap();
        let bad_path = collection_root(&config, s, d, c).join("bad.json");
        tokio::fs::write(&bad_path, "{ pas du json").await.unwrap();

        let res = list_documents(&config, s, d, c).await;
        assert!(res.is_err(), "Un document corrompu doit faire échouer la lecture");
    }
}
