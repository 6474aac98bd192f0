use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// `RUST_LOG` follows the `env_logger` filter syntax (e.g. "debug" or
/// "phong_ngin=trace,wgpu=warn"). Without it everything at `info` and above is
/// shown, except for the chatty wgpu internals.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn)
                .filter_module("naga", log::LevelFilter::Warn);
        }

        if let Err(e) = builder.try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        }
    });
}
