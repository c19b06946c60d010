// FICHIER : backend/src/json_db/mod.rs

pub mod collections;
pub mod storage;


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use crate::json_db::collections::CollectionsManager;

    #[tokio::test]
    async fn test_env_initialization() {
        let env = init_test_env().await;
        assert!(env.tmp_dir.path().exists());

        seed_schools(&env).await;
        let mgr = CollectionsManager::new(&env.cfg, &env.space, &env.db);
        assert_eq!(mgr.count("schools").await.unwrap(), 3);
    }
}
