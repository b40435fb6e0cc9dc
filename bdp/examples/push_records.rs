use std::sync::Arc;

use bdp::{BdpClient, BdpWriter, DataType, Event, Record, StaticToken, Station};
use bdp_mock::BdpMock;
use chrono::Utc;

const STATION_TYPE: &str = "WeatherStation";

fn writer() -> Result<Arc<dyn BdpWriter>, Box<dyn std::error::Error>> {
    // Talk to a real writer only when a token is provided; otherwise record into the mock.
    match std::env::var("BDP_TOKEN") {
        Ok(token) => {
            let client = BdpClient::from_env(Arc::new(StaticToken::new(token)))?;
            Ok(Arc::new(client))
        }
        Err(_) => Ok(Arc::new(
            BdpMock::new("example-origin").with_provenance_id("example-provenance"),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,bdp=debug cargo run --example push_records --features tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let bdp = writer()?;

    // 1. Make sure the writer knows what we measure.
    let data_types = [
        DataType::new("air-temperature", "°C", "Air temperature", "Mean").with_period(600),
        DataType::new("air-humidity", "%", "Relative humidity", "Mean").with_period(600),
    ];
    bdp.sync_data_types(STATION_TYPE, &data_types).await?;

    // 2. Sync the station list and deactivate stations that disappeared.
    let stations = [
        Station::new("ST1", "Bozen", STATION_TYPE, 46.4983, 11.3548, bdp.origin()),
        Station::new("ST2", "Meran", STATION_TYPE, 46.6713, 11.1525, bdp.origin())
            .with_meta("altitude", 325),
    ];
    bdp.sync_stations(STATION_TYPE, &stations, true, false).await?;

    // 3. Aggregate one batch of measurements and push it.
    let now = Utc::now();
    let mut map = bdp.create_data_map();
    map.add_record("ST1", "air-temperature", Record::at(now, 21.5, 600));
    map.add_record("ST1", "air-humidity", Record::at(now, 48.0, 600));
    map.add_record("ST2", "air-temperature", Record::at(now, 19.0, 600));
    println!("pushing {} records", map.record_count());
    bdp.push_data(STATION_TYPE, map).await?;

    // 4. Events are not scoped by station type.
    let closure = Event::new("ev-1", "Road closure", "traffic", "series-1", bdp.origin())
        .with_description("Closed for maintenance", "SS38 km 12");
    bdp.push_events(vec![closure]).await?;

    // 5. Read back what the writer has for this origin.
    let known = bdp.query_stations(STATION_TYPE, bdp.origin()).await?;
    for s in &known {
        println!("{} {} ({}, {})", s.id, s.name, s.latitude, s.longitude);
    }

    Ok(())
}

