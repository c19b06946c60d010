// FICHIER : backend/src/utils/logger.rs

use std::path::Path;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

/// Initialise la traçabilité : console compacte pour l'opérateur,
/// fichier JSON quotidien quand un dossier de logs est connu.
/// `RUST_LOG` garde la priorité sur le niveau par défaut fourni.
pub fn init_logging(log_dir: Option<&Path>, default_level: &str) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : FICHIER (Journal structuré)
        // =========================================================================
        let file_layer = log_dir.map(|dir| {
            std::fs::create_dir_all(dir).ok();
            let file_appender = rolling::daily(dir, "hkteacher.log");

            fmt::layer()
                .json()
                .with_writer(file_appender)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        });

        // =========================================================================
        // LAYER 2 : CONSOLE (Pour l'Humain)
        // =========================================================================
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

        // Filtre anti-doublon : les macros user_* impriment déjà sur la console
        let anti_double_filter =
            filter_fn(|metadata| !metadata.fields().iter().any(|f| f.name() == "event"));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter)
            .with_filter(anti_double_filter);

        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        if registry.try_init().is_err() {
            // Subscriber global déjà actif (cas des tests), on ignore proprement
            return;
        }

        tracing::debug!("Logger initialisé");
    });
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_idempotency() {
        init_logging(None, "info");
        init_logging(None, "info");
    }
}
