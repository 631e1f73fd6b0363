use async_trait::async_trait;

/// Forces server-rendered content to be produced again, so that request-time
/// verification observes the current cookie.
#[async_trait]
pub trait ContentRefresher: Send + Sync {
    async fn refresh(&self) -> Result<(), RefreshError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Refresh request failed: {0}")]
    Request(String),

    #[error("Refresh returned status {0}")]
    Status(u16),
}
