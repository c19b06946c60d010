// FICHIER : backend/src/utils/mod.rs

// =========================================================================
//  HKTEACHER UTILS - Foundation Layer
// =========================================================================

// --- 1. MODULES INTERNES ---

pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;
pub mod macros;

// --- 2. FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AnyResult, AppError, Context, Result};
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}

/// **Physical Layer (I/O)** : Accès disque sécurisé (Atomicité).
pub mod io {
    pub use super::fs::{
        ensure_dir, exists, read_dir, read_json, read_to_string, remove_dir_all, remove_file,
        tempdir, write_atomic, write_json_atomic, Path, PathBuf, TempDir,
    };
}

/// **Data Abstraction** : Manipulation JSON.
pub mod data {
    pub use super::json::{from_value, json, parse, stringify, stringify_pretty, Map, Value};
    pub use serde::{Deserialize, Serialize};
}

/// **Le Prélude** : À utiliser via `use hkteacher::utils::prelude::*;`
pub mod prelude {
    pub use super::core::{AnyResult, AppError, Context, Result, Utc, Uuid};
    pub use super::data::{json, Deserialize, Serialize, Value};
    pub use tracing::{debug, error, info, warn};
}

// =========================================================================
// 3. EXPORTS DIRECTS (Requis par json_db et migration)
// =========================================================================

pub use error::{AnyResult, AppError, Result};
pub use logger::init_logging;

pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;

pub use tracing::{debug, error, info, warn};
