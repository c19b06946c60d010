// FICHIER : backend/src/json_db/collections/manager.rs

use crate::json_db::storage::{file_storage, JsonDbConfig};
use crate::utils::Uuid;
use anyhow::Result;
use serde_json::Value;

use super::collection;

/// Poignée d'accès aux collections d'une base : c'est par elle que
/// passent toutes les procédures d'administration.
#[derive(Debug)]
pub struct CollectionsManager<'a> {
    pub config: &'a JsonDbConfig,
    pub space: String,
    pub db: String,
}

impl<'a> CollectionsManager<'a> {
    pub fn new(config: &'a JsonDbConfig, space: &str, db: &str) -> Self {
        Self {
            config,
            space: space.to_string(),
            db: db.to_string(),
        }
    }

    pub async fn init_db(&self) -> Result<()> {
        file_storage::create_db(self.config, &self.space, &self.db).await
    }

    // --- MÉTHODES DE LECTURE ---

    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        collection::read_document(self.config, &self.space, &self.db, collection, id).await
    }

    pub async fn list_all(&self, collection: &str) -> Result<Vec<Value>> {
        collection::list_documents(self.config, &self.space, &self.db, collection).await
    }

    pub async fn list_ids(&self, collection: &str) -> Result<Vec<String>> {
        collection::list_document_ids(self.config, &self.space, &self.db, collection).await
    }

    pub async fn count(&self, collection: &str) -> Result<usize> {
        collection::count_documents(self.config, &self.space, &self.db, collection).await
    }

    pub async fn list_collections(&self) -> Result<Vec<String>> {
        collection::list_collection_names_fs(self.config, &self.space, &self.db).await
    }

    // --- MÉTHODES D'ÉCRITURE ---

    /// Insère un document brut. Un `id` est assigné (UUID v4) s'il est absent ;
    /// un `id` fourni est conservé tel quel (restauration, import).
    pub async fn insert_raw(&self, collection: &str, doc: &Value) -> Result<Value> {
        let mut stored = doc.clone();
        if let Some(obj) = stored.as_object_mut() {
            if !obj.contains_key("id") {
                obj.insert(
                    "id".to_string(),
                    Value::String(Uuid::new_v4().to_string()),
                );
            }
        } else {
            anyhow::bail!("Un document doit être un objet JSON");
        }

        let id = stored
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Le champ 'id' doit être une chaîne"))?
            .to_string();

        collection::write_document(self.config, &self.space, &self.db, collection, &id, &stored)
            .await?;
        Ok(stored)
    }

    /// Écrit le document tel quel à l'identifiant donné (une seule écriture
    /// atomique : jamais d'état intermédiaire visible pour ce document).
    pub async fn update_document(&self, collection: &str, id: &str, doc: &Value) -> Result<()> {
        collection::write_document(self.config, &self.space, &self.db, collection, id, doc).await
    }

    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        collection::delete_document(self.config, &self.space, &self.db, collection, id).await
    }

    pub async fn create_collection(&self, collection: &str) -> Result<()> {
        collection::create_collection_if_missing(self.config, &self.space, &self.db, collection)
            .await
    }

    pub async fn drop_collection(&self, collection: &str) -> Result<()> {
        collection::drop_collection(self.config, &self.space, &self.db, collection).await
    }
}

// ============================================================================
// TESTS D'INTÉGRATION
// ============================================================================
