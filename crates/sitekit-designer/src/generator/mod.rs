//! Procedural layout generator.
//!
//! Pure and deterministic: `generate()` takes no input beyond the constant
//! tables in [`constants`] and always produces the same catalog, so it doubles
//! as "reset to factory layout". Output order is insertion order and carries
//! no meaning; consumers must look items up by id.

pub mod constants;

mod cable_tray;
mod cameras;
mod perimeter;
mod roads;
mod rows;

use sitekit_core::{EquipmentItem, GeoPoint};

use constants::{GLOBAL_OFFSET_Z, METERS_TO_LAT, METERS_TO_LNG, ORIGIN_GEO};

pub use cable_tray::route_cable_tray;

/// Approximate geographic coordinate of a world-space point. A linear
/// small-angle mapping, valid over a few hundred meters only.
pub(crate) fn geo_at(x: f64, z: f64) -> GeoPoint {
    GeoPoint {
        lat: ORIGIN_GEO.lat - z * METERS_TO_LAT,
        lng: ORIGIN_GEO.lng + x * METERS_TO_LNG,
    }
}

/// Applies the global recentering offset to a plan-relative Z.
pub(crate) fn to_world_z(z: f64) -> f64 {
    z + GLOBAL_OFFSET_Z
}

/// Generates the full factory catalog: perimeter fence and gate, substation,
/// four equipment rows with their cable trays, the road network, the staff
/// quarter, entrance flags, the central access cage and the camera grid.
pub fn generate() -> Vec<EquipmentItem> {
    let mut catalog = Vec::with_capacity(1024);

    perimeter::generate_perimeter(&mut catalog);
    perimeter::generate_entrance_flags(&mut catalog);
    rows::generate_life_quarter(&mut catalog);
    roads::generate_road_network(&mut catalog);
    rows::generate_substation(&mut catalog);
    rows::generate_rows(&mut catalog);
    rows::generate_access_cage(&mut catalog);
    cameras::generate_cameras(&mut catalog);

    catalog
}
