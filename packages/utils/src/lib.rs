#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod credential;
pub mod error;
pub mod evm_client;
pub mod logging;

// the test version of logging setup does not take a config
// since config itself is tested and modified from different parallel tests
// therefore, this only uses the default tracing settings
// it's not gated out because it is used in integration tests as well
#[cfg(debug_assertions)]
pub fn init_tracing_tests() {
    use std::sync::LazyLock;

    // however, it has an extra complexity of race conditions across threads
    // so we use a Mutex to ensure we only initialize once globally
    static INIT: LazyLock<std::sync::Mutex<bool>> = LazyLock::new(|| std::sync::Mutex::new(false));

    let mut init = INIT.lock().unwrap();

    if !*init {
        *init = true;

        // some test binaries install their own subscriber first, that's fine
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        tracing::debug!("Tracing initialized for tests");
    }
}
