use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(&config.format, std::io::stdout))
        .init();
}

/// `json` for machine-readable lines, pretty multi-line output otherwise
fn fmt_layer<S, W>(format: &str, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    if format == "json" {
        layer.json().boxed()
    } else {
        layer.pretty().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn emit_one_event(format: &str) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber =
            tracing_subscriber::registry().with(fmt_layer(format, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(port = 8001, "Relay listening");
        });
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_format_is_pretty() {
        let output = emit_one_event("pretty");
        assert!(output.contains("Relay listening"));
        // pretty puts the source location on its own line; compact would be one line
        assert!(output.trim_end().lines().count() > 1, "{}", output);
    }

    #[test]
    fn test_json_format_is_one_object_per_line() {
        let output = emit_one_event("json");
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["fields"]["message"], "Relay listening");
        assert_eq!(line["fields"]["port"], 8001);
    }
}
