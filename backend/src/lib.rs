// FICHIER : backend/src/lib.rs

//! Plateforme d'administration scolaire Hong Kong : stockage documentaire
//! embarqué et procédures d'administration (migration de schéma,
//! sauvegarde/restauration, assainissement des données).

pub mod json_db;
pub mod migration;
pub mod utils;
