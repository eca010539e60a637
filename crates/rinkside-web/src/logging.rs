//! Tracing layer that writes formatted events to the browser console.
//!
//! # Quick Start
//!
//! ```ignore
//! use rinkside_web::logging::{ConsoleLayer, LogConfig};
//! use tracing_subscriber::prelude::*;
//!
//! let config = LogConfig::default();
//! tracing_subscriber::registry()
//!     .with(config.level_filter())
//!     .with(ConsoleLayer::browser(config))
//!     .init();
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for one formatted line.
pub type ConsoleSink = fn(Level, &str);

/// Configuration for the console layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Prefix lines with the level. Default: true.
    pub show_level: bool,
    /// Show the tracing target (module path). Default: false.
    pub show_target: bool,
    /// Show structured fields beyond `message`. Default: true.
    pub show_fields: bool,
    /// Most verbose level that is written. Default: `INFO`.
    pub max_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            show_level: true,
            show_target: false,
            show_fields: true,
            max_level: Level::INFO,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Global filter matching `max_level`.
    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.max_level)
    }
}

/// Extracts message and structured fields from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// A `tracing_subscriber::Layer` that formats each event as one line and
/// hands it to a [`ConsoleSink`].
pub struct ConsoleLayer {
    sink: ConsoleSink,
    config: LogConfig,
}

impl ConsoleLayer {
    #[must_use]
    pub fn new(sink: ConsoleSink, config: LogConfig) -> Self {
        Self { sink, config }
    }

    /// Layer writing to `console.log` and friends.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn browser(config: LogConfig) -> Self {
        Self::new(browser_sink, config)
    }

    fn format(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.config.show_level {
            let _ = write!(line, "[{}] ", metadata.level());
        }
        if self.config.show_target {
            let _ = write!(line, "{}: ", metadata.target());
        }
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        if self.config.show_fields {
            for (k, v) in &visitor.fields {
                let _ = write!(line, " {k}={v}");
            }
        }
        line
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() > self.config.max_level {
            return;
        }
        (self.sink)(*event.metadata().level(), &self.format(event));
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_sink(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&line),
        Level::WARN => console::warn_1(&line),
        Level::INFO => console::log_1(&line),
        Level::DEBUG | Level::TRACE => console::debug_1(&line),
    }
}

/// Install the console layer as the global subscriber.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init(config: LogConfig) {
    use tracing_subscriber::prelude::*;

    let _ = tracing_subscriber::registry()
        .with(config.level_filter())
        .with(ConsoleLayer::browser(config))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use tracing_subscriber::prelude::*;

    thread_local! {
        static LINES: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn capture(level: Level, line: &str) {
        LINES.with(|l| l.borrow_mut().push((level, line.to_string())));
    }

    fn captured(config: LogConfig, f: impl FnOnce()) -> Vec<(Level, String)> {
        LINES.with(|l| l.borrow_mut().clear());
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(capture, config));
        tracing::subscriber::with_default(subscriber, f);
        LINES.with(|l| l.take())
    }

    #[test]
    fn formats_level_message_and_fields() {
        let lines = captured(LogConfig::default(), || {
            tracing::info!(section = 2, "navigating");
        });
        assert_eq!(
            lines,
            vec![(Level::INFO, "[INFO] navigating section=2".to_string())]
        );
    }

    #[test]
    fn target_and_fields_are_configurable() {
        let config = LogConfig {
            show_level: false,
            show_fields: false,
            ..LogConfig::default()
        }
        .show_target(true);
        let lines = captured(config, || {
            tracing::warn!(reason = "cooling", "ignored");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert!(lines[0].1.ends_with(": ignored"));
        assert!(lines[0].1.contains("logging"));
    }

    #[test]
    fn events_above_max_level_are_dropped() {
        let lines = captured(LogConfig::default(), || {
            tracing::debug!("hidden");
            tracing::trace!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(lines, vec![(Level::ERROR, "[ERROR] shown".to_string())]);
    }

    #[test]
    fn debug_level_lets_debug_through() {
        let config = LogConfig::default().with_max_level(Level::DEBUG);
        let lines = captured(config, || {
            tracing::debug!("visible");
            tracing::trace!("hidden");
        });
        assert_eq!(lines, vec![(Level::DEBUG, "[DEBUG] visible".to_string())]);
    }
}
