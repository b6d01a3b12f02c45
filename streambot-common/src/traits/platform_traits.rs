// streambot-common/src/traits/platform_traits.rs

use async_trait::async_trait;

use crate::error::Error;

/// Outbound chat boundary. The host binds this to whatever transport is in
/// use; the engine only ever calls `send`.
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), Error>;
}

/// On-screen alert collaborator. Triggering returns the display text so the
/// caller can echo it to chat.
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    async fn trigger(&self, name: &str, chat_override: Option<&str>) -> Result<String, Error>;
    /// Triggers one alert chosen from the named tag group.
    async fn trigger_tag(&self, tag: &str, chat_override: Option<&str>) -> Result<String, Error>;
    async fn tag_exists(&self, tag: &str) -> Result<bool, Error>;
}
