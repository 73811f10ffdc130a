//! Utils to enable [::tracing] on the command line.
#![cfg(feature = "cli")]

use std::panic::Location;
use std::panic::PanicHookInfo;

use nameth::NamedEnumValues as _;
use nameth::nameth;
use tracing::debug;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Filter used when `$RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,hyper_util=info,reqwest=info";

/// Enables tracing to stderr and registers a [panic hook](std::panic::set_hook).
///
/// Stdout is left to the JSON printed by the commands.
pub fn enable_tracing() -> Result<(), EnableTracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_file(cfg!(debug_assertions))
        .with_line_number(cfg!(debug_assertions))
        .with_target(false)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Tracing enabled");

    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(Location::to_string)
            .unwrap_or_else(|| "???".into());
        match panic_message(panic_info) {
            Some(message) => warn!("Panic: {message} at {location}"),
            None => warn!("Panic at {location}"),
        }
    }));
    Ok(())
}

fn panic_message<'t>(panic_info: &'t PanicHookInfo) -> Option<&'t str> {
    let payload = panic_info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Errors thrown by [enable_tracing] when trying to enable tracing multiple times.
#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum EnableTracingError {
    #[error("[{n}] {0}", n = self.name())]
    SetGlobalDefault(#[from] SetGlobalDefaultError),
}

#[cfg(debug_assertions)]
pub mod test_utils {
    use std::sync::Once;

    pub fn enable_tracing_for_tests() {
        static ONCE: Once = Once::new();
        ONCE.call_once(|| {
            let _ = super::enable_tracing();
        });
    }
}
