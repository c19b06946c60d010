// FICHIER : backend/src/json_db/storage/file_storage.rs

use crate::json_db::storage::JsonDbConfig;
use crate::utils::fs;
use anyhow::{Context, Result};
use serde_json::Value;

/// Vérifie qu'une base est ouvrable (CONNECT).
/// La base doit avoir été créée au préalable par la plateforme.
pub fn open_db(config: &JsonDbConfig, space: &str, db: &str) -> Result<()> {
    let db_path = config.db_root(space, db);
    if !db_path.exists() {
        return Err(anyhow::anyhow!("Database does not exist: {:?}", db_path));
    }
    Ok(())
}

/// Crée l'arborescence physique d'une base (Async).
pub async fn create_db(config: &JsonDbConfig, space: &str, db: &str) -> Result<()> {
    let db_root = config.db_root(space, db);

    if !db_root.exists() {
        tokio::fs::create_dir_all(&db_root)
            .await
            .context("Failed to create DB root directory")?;
    }

    Ok(())
}

pub async fn write_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
    doc: &Value,
) -> Result<()> {
    let col_path = config.db_collection_path(space, db, collection);
    let file_path = col_path.join(format!("{}.json", id));
    fs::write_json_atomic(&file_path, doc).await?;
    Ok(())
}

pub async fn read_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> Result<Option<Value>> {
    let file_path = config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id));

    if !file_path.exists() {
        return Ok(None);
    }

    let doc = fs::read_json(&file_path).await?;
    Ok(Some(doc))
}

pub async fn delete_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> Result<bool> {
    let file_path = config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id));

    if !file_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&file_path).await?;
    Ok(true)
}
