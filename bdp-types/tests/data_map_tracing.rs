#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};

use bdp_types::{DataMap, Record};
use tracing_subscriber::fmt::MakeWriter;

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

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn traced(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(out.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.text()
}

#[test]
fn empty_codes_are_reported() {
    let logs = traced(|| {
        let mut map = DataMap::new("");
        map.add_record("", "temperature", Record::new(1, 1.0, 60));
        map.add_record("ST1", "", Record::new(1, 1.0, 60));
    });
    assert_eq!(logs.matches("empty station or data type code").count(), 2);
}

#[test]
fn regular_codes_are_not_reported() {
    let logs = traced(|| {
        let mut map = DataMap::new("");
        map.add_record("ST1", "temperature", Record::new(1, 1.0, 60));
    });
    assert!(!logs.contains("empty station or data type code"));
    assert!(logs.contains("new station in branch"));
}
