mod common;

use rxredis_core::geo::{GeoLocation, Metric, Point, ReactiveGeoCommands};

use common::{b, in_memory, test_key};

const PALERMO_CATANIA_METERS: f64 = 166_274.1516;

async fn sicily<G: ReactiveGeoCommands>(geo: &G) -> bytes::Bytes {
    let key = test_key("geo");
    let added = geo
        .geo_add_all(
            key.clone(),
            vec![
                GeoLocation::from(("Palermo", 13.361389, 38.115556)),
                GeoLocation::from(("Catania", 15.087269, 37.502669)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(added, 2);
    key
}

#[tokio::test]
async fn test_distance_in_meters() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    let distance = geo
        .geo_dist_between(key, b("Palermo"), b("Catania"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(distance.metric, Metric::Meters);
    assert!((distance.value - PALERMO_CATANIA_METERS).abs() < 0.005);
}

#[tokio::test]
async fn test_distance_in_kilometers() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    let distance = geo
        .geo_dist_between_in(key, b("Palermo"), b("Catania"), Metric::Kilometers)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(distance.metric, Metric::Kilometers);
    assert!((distance.value - PALERMO_CATANIA_METERS / 1000.0).abs() < 0.005);
}

#[tokio::test]
async fn test_distance_to_missing_member_is_none() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    let distance = geo
        .geo_dist_between(key, b("Palermo"), b("Atlantis"))
        .await
        .unwrap();
    assert_eq!(distance, None);
}

#[tokio::test]
async fn test_geohash_keeps_member_slots() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    let hashes = geo
        .geo_hash_of(key, vec![b("Palermo"), b("Atlantis"), b("Catania")])
        .await
        .unwrap();
    assert_eq!(
        hashes,
        vec![
            Some("sqc8b49rny0".to_string()),
            None,
            Some("sqdtr74hyu0".to_string())
        ]
    );
}

#[tokio::test]
async fn test_positions_round_trip_within_cell_precision() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    let positions = geo
        .geo_pos_of(key, vec![b("Palermo"), b("Atlantis")])
        .await
        .unwrap();
    let palermo = positions[0].unwrap();
    assert!((palermo.longitude() - 13.361389).abs() < 1e-5);
    assert!((palermo.latitude() - 38.115556).abs() < 1e-5);
    assert_eq!(positions[1], None);
}

#[tokio::test]
async fn test_add_one_then_measure() {
    let connection = in_memory();
    let geo = connection.geo_commands();
    let key = sicily(&geo).await;

    geo.geo_add_one(key.clone(), Point::new(13.583333, 37.316667), b("Arigento"))
        .await
        .unwrap();
    let distance = geo
        .geo_dist_between(key, b("Palermo"), b("Arigento"))
        .await
        .unwrap()
        .unwrap();
    assert!((distance.value - 90_977.7535).abs() < 0.005);
}

#[tokio::test]
async fn test_invalid_point_is_rejected_before_dispatch() {
    let connection = in_memory();
    let geo = connection.geo_commands();

    let error = geo
        .geo_add_one(test_key("geo"), Point::new(f64::NAN, 1.0), b("nowhere"))
        .await
        .unwrap_err();
    assert!(error.is_precondition());
}
