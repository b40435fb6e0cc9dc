use std::path::PathBuf;

use bdp_core::{BdpError, BdpWriter, DataType, Record, Station};
use bdp_mock::{BdpMock, MockCalls, assert_calls_eq, io};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Reading {
    code: String,
    name: String,
    lat: f64,
    lon: f64,
    temperature: f64,
    ts: i64,
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn collect(writer: &dyn BdpWriter, readings: &[Reading]) -> Result<(), BdpError> {
    let data_types = [DataType::new("air-temperature", "°C", "Air temperature", "Mean").with_period(600)];
    writer.sync_data_types("WeatherStation", &data_types).await?;

    let stations: Vec<Station> = readings
        .iter()
        .map(|r| Station::new(&r.code, &r.name, "WeatherStation", r.lat, r.lon, writer.origin()))
        .collect();
    writer.sync_stations("WeatherStation", &stations, true, false).await?;

    let mut map = writer.create_data_map();
    for r in readings {
        map.add_record(&r.code, "air-temperature", Record::new(r.ts, r.temperature, 600));
    }
    writer.push_data("WeatherStation", map).await
}

#[tokio::test]
async fn collector_run_matches_stored_snapshot() {
    let readings: Vec<Reading> = io::load_input(fixture("provider_payload.json")).unwrap();
    let mock = BdpMock::new("fixture-origin").with_provenance_id("prov-fixture");

    collect(&mock, &readings).await.unwrap();

    let expected: MockCalls = io::load_output(fixture("expected_calls.json")).unwrap();
    assert_calls_eq(&expected, &mock.requests());
}

#[tokio::test]
async fn written_snapshot_reads_back_equal() {
    let readings: Vec<Reading> = io::load_input(fixture("provider_payload.json")).unwrap();
    let mock = BdpMock::new("fixture-origin");
    collect(&mock, &readings).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("calls.json");
    io::write_output(&mock.requests(), &out).unwrap();
    // overwrite keeps only the latest content
    io::write_output(&mock.requests(), &out).unwrap();

    let back: MockCalls = io::load_output(&out).unwrap();
    assert_calls_eq(&mock.requests(), &back);
}

#[test]
fn missing_fixture_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = io::load_input::<Vec<Reading>>(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, BdpError::Io(_)), "got {err:?}");
}

#[test]
fn malformed_fixture_is_a_decoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[{\"code\": 1}]").unwrap();
    let err = io::load_output::<Vec<Reading>>(&path).unwrap_err();
    assert!(matches!(err, BdpError::Decoding(_)), "got {err:?}");
}

#[test]
fn writing_into_a_missing_directory_fails_with_io() {
    let dir = tempfile::tempdir().unwrap();
    let err = io::write_output(&MockCalls::default(), dir.path().join("no/such/dir.json")).unwrap_err();
    assert!(matches!(err, BdpError::Io(_)), "got {err:?}");
}
