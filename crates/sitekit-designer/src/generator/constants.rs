//! Fixed parametric tables the layout generator is built from.
//!
//! Everything here is a constant: the generator is a total function over this
//! table, so a wrong value is a bug in this file, never a runtime error.

use sitekit_core::{Dimensions, GeoPoint};

/// Geographic anchor of the site origin.
pub const ORIGIN_GEO: GeoPoint = GeoPoint {
    lat: 25.123456,
    lng: 51.567890,
};

/// Linear small-angle conversion factors, valid over a few hundred meters at
/// the site latitude. Not a map projection.
pub const METERS_TO_LAT: f64 = 1.0 / 110_900.0;
pub const METERS_TO_LNG: f64 = 1.0 / 100_900.0;

/// Global Z recentering so the site sits centered on the scene origin.
pub const GLOBAL_OFFSET_Z: f64 = -150.0;

/// Slab/foundation height; equipment rests on top of it.
pub const FOUNDATION_HEIGHT: f64 = 0.4;

/// Number of equipment rows.
pub const ROW_COUNT: usize = 4;
/// Index of the service row (workshops instead of the left half).
pub const SERVICE_ROW: usize = 3;
/// Row center spacing along Z.
pub const ROW_SPACING_Z: f64 = 70.0;
/// Concrete slab extent per row.
pub const SLAB_LENGTH_Z: f64 = 55.0;
pub const SLAB_WIDTH_X: f64 = 160.0;
/// Width of the central spine road.
pub const SPINE_ROAD_WIDTH: f64 = 12.0;

/// Symmetric transformer offset table: four positions per side of the spine.
pub const TRANSFORMER_OFFSETS_X: [f64; 8] = [-66.0, -54.0, -42.0, -30.0, 30.0, 42.0, 54.0, 66.0];

/// Power unit column distance from the spine.
pub const POWER_UNIT_OFFSET_X: f64 = 90.0;

/// Fixed physical footprints (meters).
pub const DIM_SUBSTATION: Dimensions = Dimensions {
    length: 25.0,
    width: 15.0,
    height: 6.0,
};
pub const DIM_POWER_UNIT: Dimensions = Dimensions {
    length: 12.192,
    width: 3.5,
    height: 3.2,
};
pub const DIM_TRANSFORMER: Dimensions = Dimensions {
    length: 4.5,
    width: 3.0,
    height: 3.2,
};
pub const DIM_CONTAINER: Dimensions = Dimensions {
    length: 12.196,
    width: 2.438,
    height: 2.896,
};
pub const DIM_FENCE_SEGMENT: Dimensions = Dimensions {
    length: 4.0,
    width: 0.2,
    height: 2.5,
};
pub const DIM_GUARD_POST: Dimensions = Dimensions {
    length: 4.0,
    width: 4.0,
    height: 3.0,
};
pub const DIM_STAIRS: Dimensions = Dimensions {
    length: 0.9,
    width: 1.6,
    height: 0.52,
};
pub const DIM_CAMERA_POLE: Dimensions = Dimensions {
    length: 0.8,
    width: 0.8,
    height: 6.7,
};

/// Relative-Z landmarks of the site plan, before the global offset.
pub const Z_SUBSTATION: f64 = -60.0;
pub const Z_ROWS_START: f64 = 0.0;

/// Standoff between a transformer center and each of its containers,
/// derived from the slab so the containers sit flush with the slab edge.
pub fn container_standoff() -> f64 {
    SLAB_LENGTH_Z / 2.0 - DIM_CONTAINER.length / 2.0
}

/// Relative Z of the last row.
pub fn last_row_z() -> f64 {
    Z_ROWS_START + (ROW_COUNT as f64 - 1.0) * ROW_SPACING_Z
}

/// Relative Z where the equipment area ends, container overhang included.
pub fn rows_end_z() -> f64 {
    // The historical site plan measured the overhang from an 18 m standoff.
    last_row_z() + 18.0 + DIM_CONTAINER.length / 2.0 + 10.0
}

/// Relative Z of the staff quarter center.
pub fn life_quarter_z() -> f64 {
    rows_end_z() + 80.0
}

/// Relative Z of the site entrance (south).
pub fn entrance_z() -> f64 {
    life_quarter_z() + 40.0
}

/// Site rectangle for the perimeter fence, relative Z.
pub struct SiteBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

pub fn site_bounds() -> SiteBounds {
    SiteBounds {
        min_x: -100.0,
        max_x: 100.0,
        min_z: -100.0,
        max_z: entrance_z() + 20.0,
    }
}
