use std::sync::Once;

/// Filter applied when neither the config nor `RUST_LOG` names one.
///
/// wgpu's internals log every resource creation at `info`; the pool creates
/// and steals buffers often enough to drown out engine output.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax, for example
/// `"millions_engine::buffer=trace,wgpu=warn"` to follow pool decisions.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Capture output through the test harness instead of writing to stderr.
    pub is_test: bool,
    pub module_path: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
            module_path: true,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter, ignoring `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Harness-captured, uncolored output. Honors `RUST_LOG`.
    pub fn for_tests() -> Self {
        Self {
            write_style: env_logger::WriteStyle::Never,
            is_test: true,
            ..Self::default()
        }
    }

    /// Engine warnings only, so per-frame logs stay out of measurements.
    pub fn for_benches() -> Self {
        Self {
            filter: Some("warn,millions_engine=warn".to_owned()),
            module_path: false,
            ..Self::default()
        }
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match (self.filter.clone(), std::env::var("RUST_LOG")) {
            (Some(filter), _) | (None, Ok(filter)) => builder.parse_filters(&filter),
            (None, Err(_)) => builder.parse_filters(DEFAULT_FILTER),
        };

        builder
            .write_style(self.write_style)
            .is_test(self.is_test)
            .format_module_path(self.module_path);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger, once per process.
///
/// Filter precedence: `config.filter`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Later calls are ignored, as is a logger installed by
/// someone else first.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_err() {
            // Host application or test harness got there first.
            return;
        }
        log::debug!("logging initialized ({config:?})");
    });
}
