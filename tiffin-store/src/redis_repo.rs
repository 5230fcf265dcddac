use async_trait::async_trait;
use redis::AsyncCommands;
use tiffin_cart::{CartSnapshot, CartStore};
use tracing::info;

/// Cart persistence backed by Redis: one JSON snapshot per session key.
/// Writing the same snapshot twice is a harmless overwrite, which is all
/// the ordering guarantee the registry needs.
#[derive(Clone)]
pub struct RedisCartStore {
    client: redis::Client,
}

impl RedisCartStore {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    fn key(session_id: &str) -> String {
        format!("cart:{}", session_id)
    }
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<CartSnapshot>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::key(session_id)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        session_id: &str,
        snapshot: &CartSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(snapshot)?;
        conn.set::<_, _, ()>(Self::key(session_id), json).await?;
        info!("Cart snapshot saved for session {}", session_id);
        Ok(())
    }

    async fn clear(
        &self,
        session_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(Self::key(session_id)).await?;
        Ok(())
    }
}
