// FICHIER : backend/src/json_db/storage/mod.rs

pub mod file_storage;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- CONFIGURATION ---

/// Point d'accès au stockage documentaire : une racine de données,
/// découpée en espaces puis en bases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDbConfig {
    pub data_root: PathBuf,
}

impl JsonDbConfig {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    pub fn db_root(&self, space: &str, db: &str) -> PathBuf {
        self.data_root.join(space).join(db)
    }

    pub fn db_collection_path(&self, space: &str, db: &str, collection: &str) -> PathBuf {
        self.db_root(space, db).join("collections").join(collection)
    }

    /// Dossier des artefacts de sauvegarde, hors de l'arborescence `collections/`.
    pub fn db_backups_root(&self, space: &str, db: &str) -> PathBuf {
        self.db_root(space, db).join("_backups")
    }

    /// Dossier des journaux structurés de la racine de données.
    pub fn logs_root(&self) -> PathBuf {
        self.data_root.join("_system").join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_layout() {
        let cfg = JsonDbConfig::new(PathBuf::from("/data"));

        assert_eq!(
            cfg.db_root("hkteacher", "production"),
            PathBuf::from("/data/hkteacher/production")
        );
        assert_eq!(
            cfg.db_collection_path("hkteacher", "production", "schools"),
            PathBuf::from("/data/hkteacher/production/collections/schools")
        );
        assert_eq!(
            cfg.db_backups_root("hkteacher", "production"),
            PathBuf::from("/data/hkteacher/production/_backups")
        );
        assert_eq!(cfg.logs_root(), PathBuf::from("/data/_system/logs"));
    }
}
