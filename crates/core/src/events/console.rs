//! Console event observer for terminal output

use crate::events::{Event, EventKind, EventObserver, ObserverError};
use async_trait::async_trait;
use std::io::{self, Write};
use tracing::debug;

/// Console observer for terminal output
pub struct ConsoleObserver {
    /// Use colored output
    use_colors: bool,
    /// Verbosity level
    verbosity: ConsoleVerbosity,
}

/// Console verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleVerbosity {
    /// Only show errors
    Quiet,
    /// Show completions and errors (default)
    Normal,
    /// Show diagnostics as well
    Verbose,
}

impl ConsoleObserver {
    /// Create a new console observer with default settings
    pub fn new() -> Self {
        Self {
            use_colors: io::IsTerminal::is_terminal(&io::stderr()),
            verbosity: ConsoleVerbosity::Normal,
        }
    }

    /// Create a console observer with custom settings
    pub fn with_config(use_colors: bool, verbosity: ConsoleVerbosity) -> Self {
        Self {
            use_colors,
            verbosity,
        }
    }

    /// Format an event for console output
    fn format_event(&self, event: &Event) -> String {
        match event.kind() {
            EventKind::Completed => self.colorize(&format!("✅ {}", event.name()), "green"),
            EventKind::Error => {
                let detail = event.property("error").unwrap_or("unknown error");
                self.colorize(&format!("❌ {}: {}", event.name(), detail), "red")
            }
            EventKind::Diagnostic => {
                let props = event
                    .properties()
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if props.is_empty() {
                    self.colorize(&format!("🔎 {}", event.name()), "cyan")
                } else {
                    self.colorize(&format!("🔎 {} {}", event.name(), props), "cyan")
                }
            }
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        let color_code = match color {
            "red" => "\x1b[31m",
            "green" => "\x1b[32m",
            "cyan" => "\x1b[36m",
            _ => "\x1b[0m",
        };

        format!("{color_code}{text}\x1b[0m")
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventObserver for ConsoleObserver {
    async fn post(&self, event: &Event) -> Result<(), ObserverError> {
        let line = self.format_event(event);
        writeln!(io::stderr().lock(), "{line}").map_err(|e| ObserverError::Io(e.to_string()))?;
        debug!(event = event.name(), "Console event output");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn is_interested(&self, event: &Event) -> bool {
        match (event.kind(), self.verbosity) {
            (EventKind::Error, _) => true,
            (_, ConsoleVerbosity::Quiet) => false,
            (EventKind::Completed, _) => true,
            (EventKind::Diagnostic, ConsoleVerbosity::Verbose) => true,
            (EventKind::Diagnostic, ConsoleVerbosity::Normal) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_observer_posts() {
        let observer = ConsoleObserver::with_config(false, ConsoleVerbosity::Verbose);
        let result = observer.post(&Event::completed("Done")).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_console_observer_interest_filter() {
        let quiet = ConsoleObserver::with_config(false, ConsoleVerbosity::Quiet);
        let normal = ConsoleObserver::with_config(false, ConsoleVerbosity::Normal);
        let verbose = ConsoleObserver::with_config(false, ConsoleVerbosity::Verbose);

        let error = Event::error("Broken");
        let completed = Event::completed("Done");
        let diagnostic = Event::diagnostic("Note");

        assert!(quiet.is_interested(&error));
        assert!(!quiet.is_interested(&completed));

        assert!(normal.is_interested(&completed));
        assert!(!normal.is_interested(&diagnostic));

        assert!(verbose.is_interested(&diagnostic));
    }

    #[test]
    fn test_format_event() {
        let observer = ConsoleObserver::with_config(false, ConsoleVerbosity::Verbose);

        let error = Event::error("Broken").with_property("error", "disk full");
        assert_eq!(observer.format_event(&error), "❌ Broken: disk full");

        let diagnostic = Event::diagnostic("Cleared").with_property("entries_removed", "2");
        assert_eq!(observer.format_event(&diagnostic), "🔎 Cleared entries_removed=2");
    }

    #[test]
    fn test_colorize() {
        let color_observer = ConsoleObserver::with_config(true, ConsoleVerbosity::Normal);
        let no_color_observer = ConsoleObserver::with_config(false, ConsoleVerbosity::Normal);

        let colored = color_observer.colorize("test text", "red");
        assert!(colored.contains("\x1b[31m"));
        assert!(colored.contains("\x1b[0m"));

        assert_eq!(no_color_observer.colorize("test text", "red"), "test text");
    }
}
