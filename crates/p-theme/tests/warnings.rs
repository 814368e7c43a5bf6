//! Recoverable failures must be visible in the log stream.

use std::io;
use std::sync::{Arc, Mutex};

use p_theme::builtin::default_palette;
use p_theme::contrast::contrast_ratio;
use p_theme::reference::ColorRef;

/// A `MakeWriter` target that appends into a shared buffer.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture.contents())
}

#[test]
fn malformed_color_logs_a_warning() {
    let (ratio, logs) = with_captured_logs(|| contrast_ratio("not-a-color", "#FFFFFF"));
    assert!(ratio.is_finite());
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("not-a-color"), "logs: {logs}");
}

#[test]
fn valid_colors_log_nothing() {
    let (_, logs) = with_captured_logs(|| contrast_ratio("#000000", "#FFFFFF"));
    assert!(logs.is_empty(), "logs: {logs}");
}

#[test]
fn unresolved_reference_logs_a_warning() {
    let palette = default_palette();
    let (token, logs) = with_captured_logs(|| ColorRef::parse("primary.1000").resolve(&palette));
    assert_eq!(token.as_str(), "#000000");
    assert!(logs.contains("unresolved color reference"), "logs: {logs}");
}
