//! Logging setup with indicatif integration

use indicatif::MultiProgress;

/// ANSI color code and padded label for a log level.
fn level_style(level: log::Level, color: bool) -> (&'static str, &'static str, &'static str) {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return ("", label, "");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    (ansi, label, "\x1b[0m")
}

/// Default filter when `RUST_LOG` is unset.
///
/// Dependencies stay at `warn` so reqwest/hyper chatter does not drown the
/// pipeline's own messages under `--debug`.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "warn,pmfetch=debug,pmfetch_core=debug,pmfetch_pubmed=debug"
    } else {
        "warn,pmfetch=info,pmfetch_core=info,pmfetch_pubmed=info"
    }
}

/// Logger that prints through indicatif MultiProgress so lines do not tear the spinner.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            // TTY only, so always colored
            let (pre, label, post) = level_style(record.level(), true);
            let line = format!("[{pre}{label}{post}] {}", record.args());
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging.
///
/// With a `MultiProgress` (TTY), lines are routed through it; otherwise plain
/// `timestamp - LEVEL - message` lines go to stderr.
pub fn init_logging(
    debug: bool,
    multi: Option<&MultiProgress>,
) -> Result<(), log::SetLoggerError> {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(default_filter(debug));

    if let Some(multi) = multi {
        let logger = env_logger::Builder::from_env(env).build();
        let max_level = logger.filter();

        log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone())))?;
        log::set_max_level(max_level);
        Ok(())
    } else {
        env_logger::Builder::from_env(env)
            .format(|buf, record| {
                let (_, label, _) = level_style(record.level(), false);
                writeln!(
                    buf,
                    "{} - {} - {}",
                    buf.timestamp_millis(),
                    label.trim_end(),
                    record.args()
                )
            })
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_have_no_escape_codes() {
        let (pre, label, post) = level_style(log::Level::Warn, false);
        assert_eq!(pre, "");
        assert_eq!(label, "WARN ");
        assert_eq!(post, "");
    }

    #[test]
    fn colored_labels_reset() {
        let (pre, label, post) = level_style(log::Level::Error, true);
        assert_eq!(pre, "\x1b[31m");
        assert_eq!(label, "ERROR");
        assert_eq!(post, "\x1b[0m");
    }

    #[test]
    fn debug_flag_raises_own_crates_only() {
        assert!(default_filter(true).contains("pmfetch_pubmed=debug"));
        assert!(default_filter(true).starts_with("warn,"));
        assert!(default_filter(false).contains("pmfetch_pubmed=info"));
    }
}
