// Synapse Admin API client
//
// Wraps the two admin endpoints used for post-registration moderation:
// suspending an account and force-joining an account to a room. Both calls
// are blocking; from async code, run them through a blocking-pool bridge.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct AdminOptions {
    pub homeserver_url: String,
    pub access_token: String,
}

/// Client for the Synapse admin HTTP API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AdminService {
    options: AdminOptions,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SuspendBody {
    suspend: bool,
}

#[derive(Debug, Serialize)]
struct JoinBody {
    user_id: String,
}

impl AdminService {
    pub fn new(options: AdminOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { options, client })
    }

    /// Suspend an account. Returns true only on HTTP 200.
    ///
    /// Any other status, and any transport or timeout error, is logged and
    /// reported as false. Suspending an already-suspended account is the
    /// server's concern; a non-200 from such a call still counts as failure.
    pub fn suspend_user(&self, user_id: &str) -> bool {
        let url = suspend_url(&self.options.homeserver_url, user_id);

        let result = self
            .client
            .put(url)
            .bearer_auth(&self.options.access_token)
            .json(&SuspendBody { suspend: true })
            .send();

        match result {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("Suspended user {}", user_id);
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                error!("Failed to suspend user {}: HTTP {}: {}", user_id, status, body);
                false
            }
            Err(e) => {
                error!("Error suspending user {}: {}", user_id, e);
                false
            }
        }
    }

    /// Join an account to a room. Returns true only on HTTP 200.
    ///
    /// Same status and error rules as [`suspend_user`](Self::suspend_user).
    pub fn join_user_to_room(&self, user_id: &str, room_id: &str) -> bool {
        let url = join_url(&self.options.homeserver_url, room_id);

        let result = self
            .client
            .post(url)
            .bearer_auth(&self.options.access_token)
            .json(&JoinBody {
                user_id: user_id.to_string(),
            })
            .send();

        match result {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("Joined user {} to room {}", user_id, room_id);
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                error!(
                    "Failed to join user {} to room {}: HTTP {}: {}",
                    user_id, room_id, status, body
                );
                false
            }
            Err(e) => {
                error!("Error joining user {} to room {}: {}", user_id, room_id, e);
                false
            }
        }
    }
}

// User and room identifiers carry reserved characters (@, !, :), so they are
// percent-encoded before landing in the request path.

fn suspend_url(homeserver_url: &str, user_id: &str) -> String {
    format!(
        "{}/_synapse/admin/v1/suspend/{}",
        homeserver_url,
        urlencoding::encode(user_id)
    )
}

fn join_url(homeserver_url: &str, room_id: &str) -> String {
    format!(
        "{}/_synapse/admin/v1/join/{}",
        homeserver_url,
        urlencoding::encode(room_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(homeserver_url: &str) -> AdminService {
        AdminService::new(AdminOptions {
            homeserver_url: homeserver_url.to_string(),
            access_token: "syt_admin_token".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn suspend_url_percent_encodes_user_id() {
        assert_eq!(
            suspend_url("http://localhost:8008", "@eve:example.org"),
            "http://localhost:8008/_synapse/admin/v1/suspend/%40eve%3Aexample.org"
        );
    }

    #[test]
    fn join_url_percent_encodes_room_id() {
        assert_eq!(
            join_url("http://localhost:8008", "!mods:example.org"),
            "http://localhost:8008/_synapse/admin/v1/join/%21mods%3Aexample.org"
        );
    }

    #[test]
    fn transport_error_reports_failure() {
        // Nothing listens here; the connection is refused.
        let service = service("http://127.0.0.1:1");
        assert!(!service.suspend_user("@eve:example.org"));
        assert!(!service.join_user_to_room("@eve:example.org", "!mods:example.org"));
    }

    #[tokio::test]
    async fn suspend_sends_bearer_put_and_succeeds_on_200() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/_synapse/admin/v1/suspend/%40eve%3Aexample.org"))
            .and(header("Authorization", "Bearer syt_admin_token"))
            .and(body_json(serde_json::json!({ "suspend": true })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server.uri());
        let ok = tokio::task::spawn_blocking(move || service.suspend_user("@eve:example.org"))
            .await
            .unwrap();

        assert!(ok);
    }

    #[tokio::test]
    async fn suspend_reports_failure_on_non_200() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let service = service(&server.uri());
        let ok = tokio::task::spawn_blocking(move || service.suspend_user("@eve:example.org"))
            .await
            .unwrap();

        assert!(!ok);
    }

    #[tokio::test]
    async fn join_sends_user_id_body_and_succeeds_on_200() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_synapse/admin/v1/join/%21mods%3Aexample.org"))
            .and(header("Authorization", "Bearer syt_admin_token"))
            .and(body_json(serde_json::json!({ "user_id": "@eve:example.org" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server.uri());
        let ok = tokio::task::spawn_blocking(move || {
            service.join_user_to_room("@eve:example.org", "!mods:example.org")
        })
        .await
        .unwrap();

        assert!(ok);
    }

    #[tokio::test]
    async fn join_reports_failure_on_non_200() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let service = service(&server.uri());
        let ok = tokio::task::spawn_blocking(move || {
            service.join_user_to_room("@eve:example.org", "!mods:example.org")
        })
        .await
        .unwrap();

        assert!(!ok);
    }
}
