// Trait definitions for the host runtime seam
//
// These are INFRASTRUCTURE traits only - the host's callback registration,
// registration logic, and message transport live behind them and are not
// reimplemented here.
//
// Naming convention: Base* for trait names (e.g., BaseModuleHost)

use anyhow::Result;
use async_trait::async_trait;

/// A message event to deliver into a room.
#[derive(Debug, Clone)]
pub struct RoomMessage {
    pub room_id: String,
    pub event_type: String,
    pub sender: String,
    pub body: String,
}

/// The host runtime surface consumed by the monitor.
#[async_trait]
pub trait BaseModuleHost: Send + Sync {
    /// Deliver a message event into a room.
    async fn send_room_message(&self, message: RoomMessage) -> Result<()>;

    /// The homeserver's own domain name.
    fn server_name(&self) -> &str;
}
