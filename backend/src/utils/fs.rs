// FICHIER : backend/src/utils/fs.rs

//! Couche I/O de la plateforme : helpers asynchrones et écriture atomique.
//! Toute écriture persistante passe par `write_atomic` (write -> sync -> rename).

use crate::utils::error::{AnyResult, Context};
use crate::utils::json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};
pub use tempfile::{tempdir, TempDir};
pub use tokio::fs::ReadDir;

pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

pub async fn ensure_dir(path: &Path) -> AnyResult<()> {
    if !exists(path).await {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Création impossible du dossier {:?}", path))?;
    }
    Ok(())
}

pub async fn read_to_string(path: &Path) -> AnyResult<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Lecture impossible du fichier {:?}", path))
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AnyResult<T> {
    if !exists(path).await {
        anyhow::bail!("Fichier JSON introuvable : {:?}", path);
    }
    let content = read_to_string(path).await?;
    json::parse(&content).with_context(|| format!("Contenu JSON invalide : {:?}", path))
}

pub async fn remove_file(path: &Path) -> AnyResult<()> {
    if exists(path).await {
        fs::remove_file(path)
            .await
            .with_context(|| format!("Suppression impossible du fichier {:?}", path))?;
    }
    Ok(())
}

pub async fn remove_dir_all(path: &Path) -> AnyResult<()> {
    if exists(path).await {
        fs::remove_dir_all(path)
            .await
            .with_context(|| format!("Suppression impossible du dossier {:?}", path))?;
    }
    Ok(())
}

pub async fn read_dir(path: &Path) -> AnyResult<ReadDir> {
    fs::read_dir(path)
        .await
        .with_context(|| format!("Parcours impossible du dossier {:?}", path))
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique sécurisée (write -> sync -> rename).
/// Un fichier partiellement écrit n'est jamais visible sous le nom final.
pub async fn write_atomic(path: &Path, content: &[u8]) -> AnyResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("Création impossible du fichier temporaire {:?}", tmp_path))?;
        file.write_all(content)
            .await
            .with_context(|| format!("Écriture impossible dans {:?}", tmp_path))?;
        // On force l'écriture physique sur le disque avant le rename
        file.sync_all()
            .await
            .with_context(|| format!("Synchronisation disque impossible pour {:?}", tmp_path))?;
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = remove_file(&tmp_path).await;
        return Err(e).with_context(|| format!("Publication atomique impossible vers {:?}", path));
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> AnyResult<()> {
    let content = json::stringify_pretty(data)?;
    write_atomic(path, content.as_bytes()).await
}

// =========================================================================
// TESTS UNITAIRES
// =========================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct TestData {
        id: u32,
        name: String,
    }

    #[tokio::test]
    async fn test_atomic_write_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("atomic.json");
        let data = TestData {
            id: 1,
            name: "HKTeacher".into(),
        };

        write_json_atomic(&file_path, &data).await.unwrap();
        let restored: TestData = read_json(&file_path).await.unwrap();
        assert_eq!(data, restored);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("clean.json");

        write_atomic(&file_path, b"{}").await.unwrap();
        assert!(exists(&file_path).await);
        assert!(!exists(&file_path.with_extension("tmp")).await);
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let dir = tempdir().unwrap();
        let res: AnyResult<TestData> = read_json(&dir.path().join("absent.json")).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_idempotent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(exists(&nested).await);
    }
}
