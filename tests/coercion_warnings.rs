//! The `i32`-to-text coercion emits a `tracing` warning unless disabled through `AccessorConfig`.
//!
//! Every test here installs its own scoped subscriber and reads back what it wrote.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use common::Account;
use fieldkit::{AccessorConfig, set_field, set_field_with_config};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

#[test]
fn int_to_text_warns_by_default() {
    let mut account = Account::default();
    let logs = capture(|| set_field(&mut account, "name", 42_i32).unwrap());

    assert_eq!(account.name, "42");
    assert!(logs.contains("implicit integer-to-text coercion"), "logs: {logs}");
    assert!(logs.contains("field=\"name\""), "logs: {logs}");
    assert!(logs.contains("source_type=\"i32\""), "logs: {logs}");
}

#[test]
fn int_to_text_warning_can_be_disabled() {
    let mut account = Account::default();
    let config = AccessorConfig::new().with_warn_int_to_text(false);
    let logs = capture(|| set_field_with_config(&mut account, "name", 42_i32, &config).unwrap());

    assert_eq!(account.name, "42");
    assert!(logs.is_empty(), "logs: {logs}");
}

#[test]
fn i64_to_text_does_not_warn() {
    let mut account = Account::default();
    let logs = capture(|| set_field(&mut account, "name", 42_i64).unwrap());

    assert_eq!(account.name, "42");
    assert!(logs.is_empty(), "logs: {logs}");
}
