use serde::Serialize;

use crate::models::Space;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A space paired with its distance from the reference point.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceWithDistance {
    #[serde(flatten)]
    pub space: Space,
    pub distance_km: f64,
}

/// Order spaces by ascending distance from the reference coordinate.
/// The sort is stable, so equal distances keep their input order.
pub fn sort_by_distance(spaces: Vec<Space>, ref_lat: f64, ref_lng: f64) -> Vec<SpaceWithDistance> {
    let mut with_distance: Vec<SpaceWithDistance> = spaces
        .into_iter()
        .map(|space| {
            let distance_km =
                haversine_km(ref_lat, ref_lng, space.location.lat, space.location.lng);
            SpaceWithDistance { space, distance_km }
        })
        .collect();
    with_distance.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    with_distance
}
