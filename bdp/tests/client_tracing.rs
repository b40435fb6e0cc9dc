#![cfg(feature = "tracing")]

mod helpers;

use std::io;
use std::sync::{Arc, Mutex};

use bdp::{BdpWriter, TransportResponse};
use helpers::*;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

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

async fn push_answered_with(status: u16) -> String {
    let out = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(out.clone())
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let transport = ScriptedTransport::new(move |req| {
        if path(req) == "/json/event" {
            Ok(TransportResponse::new(status, "body"))
        } else {
            Ok(default_answer(req))
        }
    });
    let _ = client(transport).push_events(vec![]).await;
    String::from_utf8(out.0.lock().unwrap().clone()).unwrap()
}

#[tokio::test]
async fn rejected_2xx_statuses_are_logged() {
    for status in [202, 204] {
        let logs = push_answered_with(status).await;
        assert!(
            logs.contains("bdp request returned with error"),
            "status {status} not logged: {logs}"
        );
    }
}

#[tokio::test]
async fn accepted_statuses_are_not_logged_as_errors() {
    for status in [200, 201] {
        let logs = push_answered_with(status).await;
        assert!(!logs.contains("bdp request returned with error"), "{logs}");
    }
}
