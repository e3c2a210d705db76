//! Logger setup.
//!
//! Routes the `log` facade to stderr through `env_logger`. A `--log-level`
//! flag wins over `RUST_LOG`; with neither set, wgpu and naga are held at
//! `warn` and everything else logs at `info`.

use std::sync::Once;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initialize the global logger once; later calls are ignored.
pub fn init(level: Option<log::LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(level) = level {
            builder.filter_level(level);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters(DEFAULT_FILTER);
        }

        builder.format_timestamp_millis();

        if let Err(e) = builder.try_init() {
            eprintln!("backdrop: failed to initialize logging: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}
