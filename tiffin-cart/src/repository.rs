use crate::models::CartSnapshot;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Persistence port for registry snapshots, keyed by an opaque session id.
///
/// Saves are issued after the in-memory mutation they capture and are
/// idempotent: writing the same snapshot twice is harmless. Implementations
/// must round-trip exactly (`load` after `save` yields an equal snapshot).
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<CartSnapshot>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save(
        &self,
        session_id: &str,
        snapshot: &CartSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn clear(
        &self,
        session_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryCartStore {
    snapshots: RwLock<HashMap<String, CartSnapshot>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<CartSnapshot>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.snapshots.read().await.get(session_id).cloned())
    }

    async fn save(
        &self,
        session_id: &str,
        snapshot: &CartSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.snapshots
            .write()
            .await
            .insert(session_id.to_string(), snapshot.clone());
        Ok(())
    }

    async fn clear(
        &self,
        session_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.snapshots.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCartItem;
    use crate::registry::CartRegistry;

    #[tokio::test]
    async fn test_snapshot_round_trips_through_store() {
        let store = InMemoryCartStore::new();
        let mut registry = CartRegistry::new();
        registry.add_to_cart(
            NewCartItem {
                product_id: "p1".to_string(),
                name: "Masala Dosa".to_string(),
                price: 120,
                image_url: Some("https://cdn.example/dosa.jpg".to_string()),
                category_id: "south-indian".to_string(),
                vendor_id: "v1".to_string(),
                vendor_name: "Kamala's Kitchen".to_string(),
            },
            "South Indian",
        );

        let snapshot = registry.snapshot();
        store.save("session-1", &snapshot).await.unwrap();

        let loaded = store.load("session-1").await.unwrap();
        assert_eq!(loaded, Some(snapshot.clone()));

        // Saving the same snapshot again is idempotent.
        store.save("session-1", &snapshot).await.unwrap();
        assert_eq!(store.load("session-1").await.unwrap(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_clear_forgets_the_session() {
        let store = InMemoryCartStore::new();
        store
            .save("session-1", &CartSnapshot::default())
            .await
            .unwrap();

        store.clear("session-1").await.unwrap();
        assert_eq!(store.load("session-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_session_loads_none() {
        let store = InMemoryCartStore::new();
        assert_eq!(store.load("nobody").await.unwrap(), None);
    }
}
