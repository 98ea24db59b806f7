use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use synapse_admin::{AdminOptions, AdminService};
use tracing::{error, info};

use crate::bridge::run_blocking;
use crate::config::MonitorConfig;
use crate::notifier::{sender_identity, RoomNotifier};
use crate::traits::BaseModuleHost;

/// Verdict returned from registration screening.
///
/// Current policy always allows: restriction happens after the account
/// exists, so an alerting failure never blocks a legitimate signup. The
/// deny arm stays type-checked for policy evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationVerdict {
    Allow,
    Deny,
}

/// An email address attached to a registration attempt.
#[derive(Debug, Clone)]
pub struct EmailThreepid {
    pub medium: String,
    pub address: String,
}

/// Watches account registrations on the homeserver.
///
/// Every attempt that carries a username is alerted to the moderation room;
/// once the account exists it is force-joined to that room and suspended,
/// per configuration, and a confirmation listing the actions that took
/// effect is posted.
pub struct RegistrationMonitor {
    config: MonitorConfig,
    host: Arc<dyn BaseModuleHost>,
    notifier: RoomNotifier,
    admin: AdminService,
}

impl std::fmt::Debug for RegistrationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationMonitor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RegistrationMonitor {
    /// Validate `raw_config` and build the monitor.
    ///
    /// Fails on a missing required field; the host must treat that as fatal
    /// and register no callbacks.
    pub fn new(raw_config: Value, host: Arc<dyn BaseModuleHost>) -> Result<Self> {
        let config = MonitorConfig::parse(raw_config)?;

        let admin = AdminService::new(AdminOptions {
            homeserver_url: config.homeserver_url.clone(),
            access_token: config.admin_token.clone(),
        })
        .context("Failed to create admin API client")?;

        let notifier = RoomNotifier::new(host.clone());

        info!(
            notification_room = %config.notification_room,
            suspend_users = config.suspend_users,
            force_join_room = config.force_join_room,
            "Registration monitor initialized"
        );

        Ok(Self {
            config,
            host,
            notifier,
            admin,
        })
    }

    /// Screen a registration attempt.
    ///
    /// Attempts without a username are early-stage probes with no identity
    /// yet; they pass through silently. Everything else produces exactly one
    /// alert in the moderation room. Always allows.
    pub async fn check_registration(
        &self,
        email_threepid: Option<&EmailThreepid>,
        username: Option<&str>,
        source_ip: Option<&str>,
        auth_provider_id: Option<&str>,
    ) -> RegistrationVerdict {
        let Some(username) = username else {
            return RegistrationVerdict::Allow;
        };

        let message = self.registration_alert(username, email_threepid, source_ip, auth_provider_id);

        match self.notify(&message).await {
            Ok(()) => info!("Sent registration notification for user {}", username),
            Err(e) => error!("Failed to send registration notification: {}", e),
        }

        RegistrationVerdict::Allow
    }

    /// React to a newly created account.
    ///
    /// Runs the configured admin actions in order (join, then suspend), each
    /// isolated on the blocking pool, then posts a confirmation naming the
    /// actions that succeeded. A failed action is logged by the admin client
    /// and simply absent from the confirmation; nothing propagates out.
    pub async fn on_user_created(&self, user_id: &str) {
        let mut actions_performed: Vec<&str> = Vec::new();

        if self.config.force_join_room {
            let admin = self.admin.clone();
            let user = user_id.to_string();
            let room = self.config.notification_room.clone();
            let joined = run_blocking(move || admin.join_user_to_room(&user, &room))
                .await
                .unwrap_or(false);
            if joined {
                actions_performed.push("joined to notification room");
            }
        }

        if self.config.suspend_users {
            let admin = self.admin.clone();
            let user = user_id.to_string();
            let suspended = run_blocking(move || admin.suspend_user(&user))
                .await
                .unwrap_or(false);
            if suspended {
                actions_performed.push("suspended");
            }
        }

        if actions_performed.is_empty() {
            return;
        }

        let message = format!(
            "✅ User {} has been {}.",
            user_id,
            actions_performed.join(" and ")
        );

        if let Err(e) = self.notify(&message).await {
            error!("Failed to send confirmation message: {}", e);
        }
    }

    fn registration_alert(
        &self,
        username: &str,
        email_threepid: Option<&EmailThreepid>,
        source_ip: Option<&str>,
        auth_provider_id: Option<&str>,
    ) -> String {
        let email = email_threepid
            .map(|threepid| threepid.address.as_str())
            .unwrap_or("No email provided");
        let ip = source_ip.unwrap_or("Unknown IP");
        let auth = auth_provider_id.unwrap_or("password");

        let mut message = format!(
            "📝 New registration detected:\n\
             - Username: @{}:{}\n\
             - Email: {}\n\
             - IP Address: {}\n\
             - Auth Method: {}",
            username,
            self.host.server_name(),
            email,
            ip,
            auth
        );

        if self.config.suspend_users {
            message.push_str("\n✋ User will be automatically suspended after registration.");
        }

        message
    }

    async fn notify(&self, body: &str) -> Result<()> {
        let sender = sender_identity(&self.config, self.host.server_name());
        self.notifier
            .send(&self.config.notification_room, &sender, body)
            .await
    }
}
