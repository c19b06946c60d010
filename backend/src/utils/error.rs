// FICHIER : backend/src/utils/error.rs

use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité des outils CLI) ---
// On expose les outils flexibles pour les couches applicatives
pub use anyhow::{anyhow, bail, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

// --- GESTION D'ERREUR STRICTE ---

/// Type de résultat standard pour la plateforme.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
/// Elle dérive `thiserror::Error` pour faciliter la conversion automatique.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Base de Données : {0}")]
    Database(String),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

// Helpers pour convertir des erreurs string en AppError
// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display_formatting() {
        let err = AppError::Config("Variable manquante".to_string());
        assert_eq!(
            err.to_string(),
            "Erreur de configuration : Variable manquante"
        );

        let err_db = AppError::Database("Collection inaccessible".to_string());
        assert_eq!(
            err_db.to_string(),
            "Erreur Base de Données : Collection inaccessible"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "Fichier absent");
        let app_err: AppError = io_err.into();

        match app_err {
            AppError::Io(msg) => assert!(msg.to_string().contains("Fichier absent")),
            _ => panic!("Devrait être converti en AppError::Io"),
        }
    }

    #[test]
    fn test_from_serde_error() {
        let bad_json = "{ invalid json }";
        let serde_err = serde_json::from_str::<serde_json::Value>(bad_json).unwrap_err();

        let app_err: AppError = serde_err.into();

        match app_err {
            AppError::Serialization(e) => assert!(e.is_syntax()),
            _ => panic!("Devrait être converti en AppError::Serialization"),
        }
    }

    #[test]
    fn test_from_string_helpers() {
        let err_string: AppError = String::from("Erreur string").into();
        match err_string {
            AppError::System(e) => assert_eq!(e.to_string(), "Erreur string"),
            _ => panic!("String devrait devenir AppError::System"),
        }

        let err_str: AppError = "Erreur str".into();
        match err_str {
            AppError::System(e) => assert_eq!(e.to_string(), "Erreur str"),
            _ => panic!("&str devrait devenir AppError::System"),
        }
    }
}
