//! Logging setup for the `settlement` binary.
//!
//! Records go to stderr so that report output on stdout stays clean for
//! piping. A second layer writes to a log file once [`enable_file_logging`]
//! is called.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// One line per event: local timestamp, level, target, fields.
struct SettlementFormat;

/// ANSI escape for a level, applied only on a terminal.
fn level_style(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

const RESET: &str = "\x1b[0m";

impl<S, N> FormatEvent<S, N> for SettlementFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}{RESET} {}{level:>5}{RESET} \x1b[36m{}{RESET} ",
                level_style(level),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {level:>5} {} ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file handle shared with the file layer. Empty until `--log-file`
/// is given, and writes to an empty slot are dropped.
#[derive(Clone)]
struct LogFile(Arc<Mutex<Option<File>>>);

struct LogFileGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type ReloadFilter = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static RELOAD_FILTER: OnceLock<ReloadFilter> = OnceLock::new();
static LOG_FILE: OnceLock<Arc<Mutex<Option<File>>>> = OnceLock::new();

fn store_reload_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let reload = move |directive: &str| -> Result<()> {
        let filter = EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter {directive:?}"))?;
        handle.reload(filter).context("log filter reload failed")
    };
    let _ = RELOAD_FILTER.set(Box::new(reload));
}

/// Replaces the active filter. Takes a bare level such as `debug` or a full
/// `EnvFilter` directive like `settlement_core=trace,warn`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let reload = RELOAD_FILTER
        .get()
        .context("logging is not initialized")?;
    reload(directive)
}

/// Appends every further record to `path` as well as stderr. A second call
/// switches to the new file. The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let slot = LOG_FILE.get().context("logging is not initialized")?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// The filter comes from `RUST_LOG` when it is set and parses, otherwise from
/// `default_directive`. Stderr output is coloured only on a terminal.
pub fn init_logging(default_directive: &str) {
    let file_inner = Arc::new(Mutex::new(None));
    if LOG_FILE.set(file_inner.clone()).is_err() {
        return;
    }

    let (level_filter, level_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
    );

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(SettlementFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(SettlementFormat)
        .with_ansi(false)
        .with_writer(LogFile(file_inner));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_reload_handle(level_handle);
    }
}
