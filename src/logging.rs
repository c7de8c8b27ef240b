use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Progress lines in the `*** message` style, no timestamps or targets.
pub struct ProgressFormatter;

fn marker(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "!!!",
        Level::WARN => "!!",
        Level::INFO => "***",
        Level::DEBUG | Level::TRACE => "...",
    }
}

impl<S, N> FormatEvent<S, N> for ProgressFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "{} ", marker(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the stdout logger when `debug` is set. Without it nothing is printed.
pub fn init(debug: bool) {
    if !debug {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Fails only if a global subscriber is already set; that one keeps logging.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .event_format(ProgressFormatter)
        .try_init();
}
