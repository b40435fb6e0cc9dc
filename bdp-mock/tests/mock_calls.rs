use bdp_core::{BdpConfig, BdpError, BdpWriter, DataType, Event, Record, Station};
use bdp_mock::{BdpMock, CallKind, CallMismatch, MockCalls, assert_calls_eq};

fn station(id: &str, origin: &str) -> Station {
    Station::new(id, id, "WeatherStation", 46.0, 11.0, origin)
}

#[tokio::test]
async fn records_calls_per_station_type_in_order() {
    let mock = BdpMock::new("o");
    let temp = DataType::new("t", "°C", "temp", "Mean");

    mock.sync_data_types("WeatherStation", &[temp.clone()]).await.unwrap();
    mock.sync_data_types("ParkingStation", &[]).await.unwrap();
    mock.sync_data_types("WeatherStation", &[]).await.unwrap();
    mock.sync_stations("WeatherStation", &[station("A", "o")], true, false)
        .await
        .unwrap();
    // flags are kept as given, even the combination the live client ignores
    mock.sync_stations("WeatherStation", &[station("B", "o")], false, true)
        .await
        .unwrap();

    let calls = mock.requests();
    assert_eq!(
        calls.synced_data_types["WeatherStation"],
        vec![vec![temp], vec![]]
    );
    assert_eq!(calls.synced_data_types["ParkingStation"], vec![Vec::<DataType>::new()]);

    let syncs = &calls.synced_stations["WeatherStation"];
    assert_eq!(syncs.len(), 2);
    assert_eq!(syncs[0].stations[0].id, "A");
    assert!(syncs[0].sync_state && !syncs[0].only_activate);
    assert!(!syncs[1].sync_state && syncs[1].only_activate);
}

#[tokio::test]
async fn stamps_provenance_like_the_client() {
    let mock = BdpMock::new("o").with_provenance_id("prov-m");

    let mut map = mock.create_data_map();
    assert_eq!(map.provenance(), "prov-m");
    map.add_record("ST1", "t", Record::new(1, 1.0, 60));
    mock.push_data("WeatherStation", map).await.unwrap();
    mock.push_data("WeatherStation", bdp_core::DataMap::new(""))
        .await
        .unwrap();
    mock.push_data("WeatherStation", bdp_core::DataMap::new("own"))
        .await
        .unwrap();

    let mut ev = Event::new("u", "n", "c", "s", "o");
    ev.provenance = "stale".into();
    mock.push_events(vec![ev]).await.unwrap();

    let calls = mock.requests();
    let pushed: Vec<_> = calls.synced_data["WeatherStation"]
        .iter()
        .map(|m| m.provenance().to_string())
        .collect();
    assert_eq!(pushed, ["prov-m", "prov-m", "own"]);
    assert_eq!(calls.synced_data["WeatherStation"][0].record_count(), 1);
    assert_eq!(calls.pushed_events[0][0].provenance, "prov-m");
}

#[tokio::test]
async fn query_answers_from_the_latest_sync() {
    let mock = BdpMock::new("o");
    assert!(mock.query_stations("WeatherStation", "o").await.unwrap().is_empty());

    mock.sync_stations("WeatherStation", &[station("A", "o")], false, false)
        .await
        .unwrap();
    mock.sync_stations(
        "WeatherStation",
        &[station("B", "o"), station("C", "other")],
        false,
        false,
    )
    .await
    .unwrap();

    let found = mock.query_stations("WeatherStation", "o").await.unwrap();
    let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["B"]);
    assert!(mock.query_stations("ParkingStation", "o").await.unwrap().is_empty());
}

#[tokio::test]
async fn injected_failure_hits_one_call_only() {
    let mock = BdpMock::new("o");
    mock.fail_next(BdpError::remote_status(503, "busy"));

    let err = mock.sync_data_types("WeatherStation", &[]).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(mock.requests().is_empty());

    mock.sync_data_types("WeatherStation", &[]).await.unwrap();
    assert_eq!(mock.requests().synced_data_types["WeatherStation"].len(), 1);

    mock.reset();
    assert!(mock.requests().is_empty());
}

#[test]
fn origin_comes_from_config() {
    let cfg = BdpConfig {
        origin: "cfg-origin".into(),
        ..BdpConfig::default()
    };
    assert_eq!(BdpMock::from_config(&cfg).origin(), "cfg-origin");
}

#[tokio::test]
async fn equal_snapshots_have_no_mismatches() {
    let a = BdpMock::new("o");
    let b = BdpMock::new("o");
    for mock in [&a, &b] {
        mock.sync_stations("WeatherStation", &[station("A", "o")], true, true)
            .await
            .unwrap();
        mock.push_events(vec![]).await.unwrap();
    }
    assert!(MockCalls::diff(&a.requests(), &b.requests()).is_empty());
    assert_calls_eq(&a.requests(), &b.requests());
    assert!(MockCalls::diff(&MockCalls::default(), &MockCalls::default()).is_empty());
}

#[tokio::test]
async fn comparison_is_order_sensitive() {
    let a = BdpMock::new("o");
    let b = BdpMock::new("o");
    let t1 = DataType::new("t1", "", "", "");
    let t2 = DataType::new("t2", "", "", "");

    a.sync_data_types("WeatherStation", &[t1.clone()]).await.unwrap();
    a.sync_data_types("WeatherStation", &[t2.clone()]).await.unwrap();
    b.sync_data_types("WeatherStation", &[t2]).await.unwrap();
    b.sync_data_types("WeatherStation", &[t1]).await.unwrap();

    let diff = MockCalls::diff(&a.requests(), &b.requests());
    assert_eq!(
        diff,
        vec![
            CallMismatch::CallDiffers {
                kind: CallKind::DataTypes,
                key: "WeatherStation".into(),
                index: 0,
            },
            CallMismatch::CallDiffers {
                kind: CallKind::DataTypes,
                key: "WeatherStation".into(),
                index: 1,
            },
        ]
    );
}

#[tokio::test]
async fn key_and_count_differences_are_reported() {
    let expected = BdpMock::new("o");
    let actual = BdpMock::new("o");
    expected.sync_data_types("WeatherStation", &[]).await.unwrap();
    actual.sync_data_types("ParkingStation", &[]).await.unwrap();
    actual.push_events(vec![]).await.unwrap();

    let diff = MockCalls::diff(&expected.requests(), &actual.requests());
    assert_eq!(
        diff,
        vec![
            CallMismatch::MissingKey {
                kind: CallKind::DataTypes,
                key: "WeatherStation".into(),
            },
            CallMismatch::UnexpectedKey {
                kind: CallKind::DataTypes,
                key: "ParkingStation".into(),
            },
            CallMismatch::CountDiffers {
                kind: CallKind::Events,
                key: String::new(),
                expected: 0,
                actual: 1,
            },
        ]
    );
}

#[test]
#[should_panic(expected = "recorded calls differ")]
fn assert_calls_eq_panics_on_difference() {
    let mut actual = MockCalls::default();
    actual.pushed_events.push(vec![]);
    assert_calls_eq(&MockCalls::default(), &actual);
}
