//! End-to-end workflow: decode a GeoJSON point layer, run the containment,
//! radius, KNN, and nearest queries, and report the results.
//!
//! Run with `cargo run --example workflow`.

use geo::{Geometry, Point, polygon};
use geoquery::prelude::*;
use geoquery::analysis;

const SITES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "depot"},
         "geometry": {"type": "Point", "coordinates": [120.0, 110.0]}},
        {"type": "Feature", "properties": {"name": "north-yard"},
         "geometry": {"type": "Point", "coordinates": [150.0, 480.0]}},
        {"type": "Feature", "properties": {"name": "east-gate"},
         "geometry": {"type": "Point", "coordinates": [400.0, 120.0]}},
        {"type": "Feature", "properties": {"name": "relay"},
         "geometry": {"type": "Point", "coordinates": [180.0, 140.0]}},
        {"type": "Feature", "properties": {"name": "far-mast"},
         "geometry": {"type": "Point", "coordinates": [900.0, 900.0]}}
    ]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let sites = point_collection_from_geojson(&SITES.parse().map_err(
        |err: geojson::Error| QueryError::InvalidInputKind(err.to_string()),
    )?)?;
    println!("loaded {} sites (geoquery {})", sites.len(), geoquery::VERSION);

    // Sites inside the service area (coordinates are meters).
    let service_area: Geometry = polygon![
        (x: 100.0, y: 100.0),
        (x: 450.0, y: 100.0),
        (x: 450.0, y: 200.0),
        (x: 100.0, y: 200.0),
    ]
    .into();
    let in_area = filter_points_within(&sites, &service_area, ContainmentMode::Inclusive, true);
    println!("{} sites inside the service area", in_area.len());

    // Sites within 100 m of the depot.
    let depot = Point::new(120.0, 110.0);
    let close = filter_by_distance(&sites, &depot, 100.0, true)?;
    for record in &close {
        println!(
            "  within 100 m: {} at {} m",
            record.property("name").unwrap(),
            record.property("distance_to_center").unwrap()
        );
    }

    // Three nearest sites to an incident.
    let incident: Geometry = Point::new(200.0, 150.0).into();
    let top3 = knn_points(&sites, &incident, 3, true)?;
    for record in &top3 {
        println!(
            "  rank {}: {} at {} m",
            record.property("knn_rank").unwrap(),
            record.property("name").unwrap(),
            record.property("distance_m").unwrap()
        );
    }

    // Nearest boundary point of the service area to the far mast.
    let (distance, _, on_boundary) = analysis::nearest(&Point::new(900.0, 900.0), &service_area)?;
    println!(
        "far mast is {distance:.1} m from the service area (closest boundary point {:?})",
        on_boundary
    );

    Ok(())
}
