// FICHIER : backend/src/utils/json.rs

use crate::utils::error::{AnyResult, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
/// Capture un extrait du contenu en cas d'échec pour aider au débogage.
pub fn parse<T: DeserializeOwned>(s: &str) -> AnyResult<T> {
    let snippet: String = s.chars().take(100).collect();
    serde_json::from_str(s).with_context(|| format!("JSON invalide (extrait : {})", snippet))
}

/// Convertit un type T en chaîne JSON compacte.
pub fn stringify<T: Serialize>(v: &T) -> AnyResult<String> {
    serde_json::to_string(v).context("Échec de sérialisation JSON")
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> AnyResult<String> {
    serde_json::to_string_pretty(v).context("Échec de sérialisation JSON (pretty)")
}

/// Convertit un `serde_json::Value` en type T.
pub fn from_value<T: DeserializeOwned>(v: Value) -> AnyResult<T> {
    serde_json::from_value(v).context("Conversion JSON vers type cible impossible")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct School {
        id: String,
        name: String,
    }

    #[test]
    fn test_parse_success() {
        let raw = r#"{"id": "s1", "name": "Academy"}"#;
        let school: School = parse(raw).unwrap();
        assert_eq!(school.id, "s1");
    }

    #[test]
    fn test_parse_error_carries_snippet() {
        let bad_raw = r#"{"id": 42}"#;
        let res: AnyResult<School> = parse(bad_raw);
        let err = res.unwrap_err();
        assert!(format!("{:#}", err).contains("extrait"));
    }

    #[test]
    fn test_stringify_roundtrip() {
        let school = School {
            id: "s1".into(),
            name: "Academy".into(),
        };
        let raw = stringify(&school).unwrap();
        let back: School = parse(&raw).unwrap();
        assert_eq!(school, back);
    }
}
