// Registration Monitor - Synapse moderation module
//
// Reacts to two account-lifecycle events on the homeserver: registration
// attempts (alert the moderation room, always let the signup proceed) and
// account creation (force-join the account to the moderation room and
// suspend it, per configuration, then confirm what was done).
//
// The host runtime is consumed through the traits in `traits`; this crate
// owns no user store and no room state.

pub mod bridge;
pub mod config;
pub mod monitor;
pub mod notifier;
pub mod test_dependencies;
pub mod traits;

pub use config::*;
pub use monitor::*;
