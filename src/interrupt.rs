//! Ctrl-C handling for the batch loop.
//!
//! A background thread parks a single-threaded tokio runtime on the
//! ctrl-c signal future and flips a process-wide flag. Workers consult
//! the flag before picking up new files; in-flight files finish and the
//! runner proceeds straight to the summary.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install the signal listener. Failing to set it up degrades to an
/// uninterruptible run rather than an error.
pub fn install_handler() {
    std::thread::spawn(|| {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(runtime) => runtime,
            Err(_) => return,
        };

        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                INTERRUPTED.store(true, Ordering::SeqCst);
            }
        });
    });
}
