// FICHIER : backend/src/utils/macros.rs

//! Macros de dialogue opérateur : une ligne console lisible,
//! doublée d'un événement `tracing` structuré pour le journal.

/// Affiche une info à l'utilisateur et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        println!("{}", msg);
        tracing::info!(event = "user_notification", message = %msg);
    }};
}

/// Affiche un succès à l'utilisateur
#[macro_export]
macro_rules! user_success {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        println!("✅ {}", msg);
        tracing::info!(event = "user_success", message = %msg);
    }};
}

/// Affiche un avertissement (non bloquant)
#[macro_export]
macro_rules! user_warn {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        println!("⚠️  {}", msg);
        tracing::warn!(event = "user_warning", message = %msg);
    }};
}

/// Affiche une erreur à l'utilisateur ET logue la structure technique
#[macro_export]
macro_rules! user_error {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        eprintln!("❌ {}", msg);
        tracing::error!(event = "user_error", message = %msg);
    }};
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {

    #[test]
    fn test_macros_accept_format_args() {
        user_info!("Traitement de {} documents", 3);
        user_success!("Migration terminée : {}", "schools");
        user_warn!("Sauvegarde désactivée");
        user_error!("Échec sur le document {}", "abc-123");
    }
}
