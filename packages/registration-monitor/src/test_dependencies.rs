// Mock implementations for testing
//
// Provides a host runtime double that records every message handed to it,
// for injection into RegistrationMonitor in tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{BaseModuleHost, RoomMessage};

/// Host double recording every room message it is asked to deliver.
pub struct MockModuleHost {
    server_name: String,
    fail_sends: bool,
    sent: Arc<Mutex<Vec<RoomMessage>>>,
}

impl MockModuleHost {
    pub fn new() -> Self {
        Self {
            server_name: "example.org".to_string(),
            fail_sends: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_server_name(mut self, server_name: &str) -> Self {
        self.server_name = server_name.to_string();
        self
    }

    /// Make every send fail, to exercise the swallow-and-log paths.
    pub fn failing(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Messages delivered so far, in order.
    pub fn sent_messages(&self) -> Vec<RoomMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockModuleHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseModuleHost for MockModuleHost {
    async fn send_room_message(&self, message: RoomMessage) -> Result<()> {
        if self.fail_sends {
            anyhow::bail!("room transport unavailable");
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    fn server_name(&self) -> &str {
        &self.server_name
    }
}
