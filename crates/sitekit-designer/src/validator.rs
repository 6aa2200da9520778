//! Spatial layout validator.
//!
//! Pairwise scan over the catalog reporting hard overlaps, clearance
//! warnings and aggregate statistics. The footprint test is a deliberate
//! two-case policy: an item is treated as either unrotated or rotated a
//! quarter turn, never as a general oriented box. Generator output and the
//! clearance table are tuned to that profile; do not generalize it.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use serde::{Deserialize, Serialize};
use tracing::debug;

use sitekit_core::{kind_counts, Aabb, EquipmentItem, EquipmentKind};

/// Tunables for the pairwise scan. Defaults match the shipped site rules.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Fraction of the required clearance below which a spacing warning is
    /// raised. Distances between this fraction and the full requirement are
    /// not reported.
    pub warning_ratio: f64,
    /// Shrink applied to each box before the overlap test, so touching
    /// edges do not count as intersection.
    pub margin: f64,
    /// Broad-phase reject distance on each horizontal axis.
    pub broad_phase: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            warning_ratio: 0.5,
            margin: 0.1,
            broad_phase: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A hard conflict between two items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutError {
    #[serde(rename = "type")]
    pub issue: String,
    pub equipment1: String,
    pub equipment2: String,
    pub message: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutWarning {
    #[serde(rename = "type")]
    pub issue: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStatistics {
    pub total_equipment: usize,
    /// Area of the axis-aligned rectangle bounding every item center,
    /// square meters, rounded to the nearest integer.
    pub total_area: f64,
    pub kind_counts: BTreeMap<EquipmentKind, usize>,
}

/// Full validation result. `valid` reflects errors only; warnings never
/// affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub valid: bool,
    pub errors: Vec<LayoutError>,
    pub warnings: Vec<LayoutWarning>,
    pub statistics: LayoutStatistics,
}

/// Horizontal extent of an item after the two-case rotation test: the
/// footprint axes swap when the yaw is within 45 degrees of a quarter turn
/// (mod half turn).
pub fn effective_footprint(item: &EquipmentItem) -> (f64, f64) {
    let dims = item.effective_dimensions();
    if is_quarter_turned(item.yaw()) {
        (dims.width, dims.length)
    } else {
        (dims.length, dims.width)
    }
}

fn is_quarter_turned(yaw: f64) -> bool {
    let m = yaw.abs() % PI;
    let dist = (m - FRAC_PI_2).abs();
    dist < FRAC_PI_4
}

/// Minimum required center distance between two items: the rule distance for
/// the kind pair plus each item's half-diagonal radius, approximated as
/// (sizeX + sizeZ) / 4.
fn required_clearance(a: &EquipmentItem, b: &EquipmentItem, fa: (f64, f64), fb: (f64, f64)) -> f64 {
    rule_distance(a.kind, b.kind) + (fa.0 + fa.1) / 4.0 + (fb.0 + fb.1) / 4.0
}

fn rule_distance(a: EquipmentKind, b: EquipmentKind) -> f64 {
    use EquipmentKind::*;
    let pair = if a <= b { (a, b) } else { (b, a) };
    match pair {
        (PowerUnit, PowerUnit) => 25.0,
        (Transformer, Transformer) => 5.0,
        (Container, Container) => 1.0,
        (Transformer, Container) => 1.0,
        (Substation, _) | (_, Substation) => 10.0,
        _ => 2.0,
    }
}

fn bounding_rect_area(catalog: &[EquipmentItem]) -> f64 {
    let mut centers = catalog.iter().map(|item| item.position);
    let Some(first) = centers.next() else {
        return 0.0;
    };
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_z, mut max_z) = (first.z, first.z);
    for p in centers {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_z = min_z.min(p.z);
        max_z = max_z.max(p.z);
    }
    ((max_x - min_x) * (max_z - min_z)).round()
}

fn footprint_aabb(item: &EquipmentItem, footprint: (f64, f64), margin: f64) -> Aabb {
    let half_x = (footprint.0 / 2.0 - margin).max(0.0);
    let half_z = (footprint.1 / 2.0 - margin).max(0.0);
    Aabb::from_center(item.position, half_x, half_z)
}

/// Validates a catalog with the default configuration.
pub fn validate_layout(catalog: &[EquipmentItem]) -> LayoutReport {
    validate_layout_with(catalog, ValidatorConfig::default())
}

/// Validates a catalog: O(n²) pairwise scan over non-exempt items with a
/// broad-phase distance reject before the precise tests. Never fails; items
/// without explicit dimensions fall back to the per-kind default table.
pub fn validate_layout_with(catalog: &[EquipmentItem], config: ValidatorConfig) -> LayoutReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let checked: Vec<&EquipmentItem> = catalog
        .iter()
        .filter(|item| !item.kind.is_validation_exempt())
        .collect();

    for (i, a) in checked.iter().enumerate() {
        for b in &checked[i + 1..] {
            let dx = (a.position.x - b.position.x).abs();
            let dz = (a.position.z - b.position.z).abs();
            if dx > config.broad_phase || dz > config.broad_phase {
                continue;
            }

            let fa = effective_footprint(a);
            let fb = effective_footprint(b);

            let box_a = footprint_aabb(a, fa, config.margin);
            let box_b = footprint_aabb(b, fb, config.margin);
            if box_a.intersects(&box_b) {
                errors.push(LayoutError {
                    issue: "overlap".to_string(),
                    equipment1: a.id.clone(),
                    equipment2: b.id.clone(),
                    message: format!("{} overlaps {}", a.id, b.id),
                    severity: IssueSeverity::Error,
                });
                continue;
            }

            let dy = a.position.y - b.position.y;
            let distance = (dx * dx + dy * dy + dz * dz).sqrt();
            let required = required_clearance(a, b, fa, fb);
            if distance < required * config.warning_ratio {
                warnings.push(LayoutWarning {
                    issue: "spacing".to_string(),
                    message: format!(
                        "{} and {} are {:.1} m apart, below {:.1} m clearance",
                        a.id, b.id, distance, required
                    ),
                });
            }
        }
    }

    let total_area = bounding_rect_area(catalog);

    debug!(
        items = catalog.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "layout validated"
    );

    LayoutReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        statistics: LayoutStatistics {
            total_equipment: catalog.len(),
            total_area,
            kind_counts: kind_counts(catalog),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::{Dimensions, Vec3};

    fn unit(id: &str, kind: EquipmentKind, x: f64, z: f64) -> EquipmentItem {
        EquipmentItem::new(id, kind, Vec3::new(x, 0.0, z))
    }

    #[test]
    fn overlapping_containers_are_an_error() {
        let a = unit("A", EquipmentKind::Container, 0.0, 0.0);
        let b = unit("B", EquipmentKind::Container, 1.0, 0.0);
        let report = validate_layout(&[a, b]);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].issue, "overlap");
    }

    #[test]
    fn overlap_detection_is_order_independent() {
        let a = unit("A", EquipmentKind::Container, 0.0, 0.0);
        let b = unit("B", EquipmentKind::Container, 1.0, 0.0);
        let fwd = validate_layout(&[a.clone(), b.clone()]);
        let rev = validate_layout(&[b, a]);
        assert_eq!(fwd.errors.len(), rev.errors.len());
        assert_eq!(fwd.valid, rev.valid);
    }

    #[test]
    fn exempt_kinds_produce_no_issues() {
        let catalog = vec![
            unit("F1", EquipmentKind::Foundation, 0.0, 0.0),
            unit("F2", EquipmentKind::Foundation, 0.0, 0.0),
            unit("C1", EquipmentKind::CablePath, 0.0, 0.0),
        ];
        let report = validate_layout(&catalog);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.statistics.total_equipment, 3);
    }

    #[test]
    fn quarter_turn_swaps_footprint_axes() {
        let item = EquipmentItem::new("C", EquipmentKind::Container, Vec3::ZERO)
            .with_rotation(Vec3::yaw(FRAC_PI_2));
        let (fx, fz) = effective_footprint(&item);
        let dims = item.effective_dimensions();
        assert_eq!(fx, dims.width);
        assert_eq!(fz, dims.length);

        let straight = EquipmentItem::new("C2", EquipmentKind::Container, Vec3::ZERO);
        let (sx, sz) = effective_footprint(&straight);
        assert_eq!(sx, dims.length);
        assert_eq!(sz, dims.width);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        // Two 12.196 m containers exactly abutting along X. The margin
        // shrink keeps the boxes apart.
        let a = unit("A", EquipmentKind::Container, 0.0, 0.0);
        let b = unit("B", EquipmentKind::Container, 12.196, 0.0);
        let report = validate_layout(&[a, b]);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn far_pairs_are_rejected_by_broad_phase() {
        let a = unit("A", EquipmentKind::PowerUnit, 0.0, 0.0);
        let b = unit("B", EquipmentKind::PowerUnit, 100.0, 0.0);
        let report = validate_layout(&[a, b]);
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn total_area_is_the_site_bounding_rectangle() {
        let catalog = vec![
            unit("A", EquipmentKind::Container, 0.0, 0.0),
            unit("B", EquipmentKind::Container, 30.0, 0.0),
            unit("C", EquipmentKind::Container, 0.0, 20.2),
        ];
        let report = validate_layout(&catalog);
        assert_eq!(report.statistics.total_area, 606.0);

        let empty = validate_layout(&[]);
        assert_eq!(empty.statistics.total_area, 0.0);
    }

    #[test]
    fn clearance_distance_counts_elevation() {
        // Same pair as below but one raised 2 m: the center distance is
        // sqrt(2.5² + 2²) ≈ 3.2 m, past the 3 m warning threshold.
        let a = unit("T1", EquipmentKind::Transformer, 0.0, 0.0)
            .with_dimensions(Dimensions::new(1.0, 1.0, 1.0));
        let mut b = unit("T2", EquipmentKind::Transformer, 2.5, 0.0)
            .with_dimensions(Dimensions::new(1.0, 1.0, 1.0));
        b.position.y = 2.0;
        let report = validate_layout(&[a, b]);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn close_transformers_raise_spacing_warning() {
        // Rule distance 5 m plus half-diagonal radii gives a 6 m
        // requirement; at 2.5 m the pair is inside half of it but outside
        // the shrunk boxes.
        let a = unit("T1", EquipmentKind::Transformer, 0.0, 0.0)
            .with_dimensions(Dimensions::new(1.0, 1.0, 1.0));
        let b = unit("T2", EquipmentKind::Transformer, 2.5, 0.0)
            .with_dimensions(Dimensions::new(1.0, 1.0, 1.0));
        let report = validate_layout(&[a, b]);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].issue, "spacing");
    }
}
