use std::sync::Arc;

use anyhow::Result;

use crate::config::MonitorConfig;
use crate::traits::{BaseModuleHost, RoomMessage};

/// Posts plain-text notices into a room through the host's send primitive.
///
/// Delivery failures surface as `Err` for the caller to log; nothing is
/// retried.
pub struct RoomNotifier {
    host: Arc<dyn BaseModuleHost>,
}

impl RoomNotifier {
    pub fn new(host: Arc<dyn BaseModuleHost>) -> Self {
        Self { host }
    }

    /// Send a text message into `room_id` as `sender`.
    pub async fn send(&self, room_id: &str, sender: &str, body: &str) -> Result<()> {
        self.host
            .send_room_message(RoomMessage {
                room_id: room_id.to_string(),
                event_type: "m.room.message".to_string(),
                sender: sender.to_string(),
                body: body.to_string(),
            })
            .await
    }
}

/// Sender identity for outgoing notices: the configured override, or an
/// admin handle on the configured or ambient domain.
pub fn sender_identity(config: &MonitorConfig, host_server_name: &str) -> String {
    match &config.admin_user {
        Some(user) => user.clone(),
        None => format!(
            "@admin:{}",
            config.server_name.as_deref().unwrap_or(host_server_name)
        ),
    }
}
