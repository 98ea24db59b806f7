// Shared test harness helpers.

use std::sync::Once;

static INIT: Once = Once::new();

/// Route tracing output through the test harness, once per process.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
