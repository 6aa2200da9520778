//! The equipment catalog data model.
//!
//! `EquipmentItem` is the sole entity the engine hands to rendering
//! collaborators. Items are replaced wholesale on mutation; no consumer may
//! mutate a field in place, and no consumer may rely on catalog ordering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::geometry::Vec3;

/// Closed set of placeable equipment kinds. The wire names are part of the
/// persisted format; adding a variant is backward compatible, renaming one is
/// a storage schema bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentKind {
    PowerUnit,
    Transformer,
    Container,
    Foundation,
    Substation,
    CablePath,
    Road,
    GroundPatch,
    Fence,
    Building,
    Barrier,
    Signage,
    Flag,
    TransformerCage,
    SecurityGate,
    Stairs,
    CameraFixed,
    CameraPtz,
    SecurityCage,
    Parking,
    Hangar,
    FireStation,
    Canteen,
    Dormitory,
    LogisticsZone,
}

impl EquipmentKind {
    /// Footprint used by the validator when an item carries no explicit
    /// dimensions. Kinds exempt from validation return zero extents.
    pub fn default_dimensions(self) -> Dimensions {
        match self {
            EquipmentKind::PowerUnit => Dimensions::new(12.192, 3.5, 3.2),
            EquipmentKind::Transformer => Dimensions::new(4.5, 3.0, 3.2),
            EquipmentKind::Container => Dimensions::new(12.196, 2.438, 2.896),
            EquipmentKind::Substation => Dimensions::new(25.0, 15.0, 6.0),
            EquipmentKind::Fence => Dimensions::new(4.0, 0.2, 2.5),
            EquipmentKind::Stairs => Dimensions::new(0.9, 1.6, 0.52),
            EquipmentKind::CameraFixed | EquipmentKind::CameraPtz => {
                Dimensions::new(0.8, 0.8, 6.7)
            }
            EquipmentKind::Hangar => Dimensions::new(15.0, 20.0, 6.0),
            EquipmentKind::FireStation => Dimensions::new(18.0, 14.0, 6.0),
            EquipmentKind::Canteen => Dimensions::new(25.0, 15.0, 5.0),
            EquipmentKind::Dormitory => Dimensions::new(40.0, 12.0, 7.0),
            EquipmentKind::SecurityCage => Dimensions::new(2.0, 2.0, 2.5),
            EquipmentKind::SecurityGate => Dimensions::new(8.0, 0.5, 1.2),
            // Flat or non-physical kinds carry no default footprint.
            _ => Dimensions::new(0.0, 0.0, 0.0),
        }
    }

    /// Kinds excluded from every spatial check: cable polylines have no
    /// meaningful footprint, and foundations overlap what sits on them by
    /// construction.
    pub fn is_validation_exempt(self) -> bool {
        matches!(self, EquipmentKind::CablePath | EquipmentKind::Foundation)
    }
}

/// Physical footprint in meters. `length` runs along the item's local X at
/// zero yaw, `width` along local Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn is_non_negative(&self) -> bool {
        self.length >= 0.0 && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Material scalar overrides applied by the appearance tools. All fields are
/// optional so a patch only carries what the operator actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_map_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl MaterialOverrides {
    /// Field-wise merge; `patch` wins where it carries a value.
    pub fn merged_with(&self, patch: &MaterialOverrides) -> MaterialOverrides {
        MaterialOverrides {
            roughness: patch.roughness.or(self.roughness),
            metalness: patch.metalness.or(self.metalness),
            env_map_intensity: patch.env_map_intensity.or(self.env_map_intensity),
            emissive_intensity: patch.emissive_intensity.or(self.emissive_intensity),
            opacity: patch.opacity.or(self.opacity),
        }
    }
}

/// Approximate geographic coordinate attached by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Open metadata record. Everything here is optional and consumer-defined;
/// the engine itself only reads `path` (cable routing) and the appearance
/// fields (`color`, `material`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Parent unit id (row power unit for transformers, containers, stairs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Human-readable power rating or role label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
    /// Named routing endpoints for cable runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec3>,
    /// Multi-point polyline for segmented cable rendering. Invariant: when
    /// present, at least two points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Vec3>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walkable: Option<bool>,
    /// Appearance override, e.g. `#1a1a1a` for asphalt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialOverrides>,
    /// Free-form variant tag (e.g. ground patch surface type).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// One placed item in the site catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EquipmentKind,
    pub position: Vec3,
    /// Euler radians; only the Y component (yaw) is ever non-zero in practice.
    pub rotation: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl EquipmentItem {
    pub fn new(id: impl Into<String>, kind: EquipmentKind, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            rotation: Vec3::ZERO,
            dimensions: None,
            metadata: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Stored dimensions, or the per-kind default when absent.
    pub fn effective_dimensions(&self) -> Dimensions {
        self.dimensions
            .unwrap_or_else(|| self.kind.default_dimensions())
    }

    /// Yaw component of the rotation.
    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }
}

/// Counts items per kind; used by validator statistics and the headless tool.
pub fn kind_counts(catalog: &[EquipmentItem]) -> BTreeMap<EquipmentKind, usize> {
    let mut counts = BTreeMap::new();
    for item in catalog {
        *counts.entry(item.kind).or_insert(0) += 1;
    }
    counts
}

/// Checks the catalog invariants: unique ids, non-negative dimensions, cable
/// paths with at least two points. The editor upholds these by construction;
/// this is the explicit check used by tests and by the headless binary when
/// inspecting untrusted stored data.
pub fn validate_catalog(catalog: &[EquipmentItem]) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::with_capacity(catalog.len());
    for item in catalog {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: item.id.clone(),
            });
        }
        if let Some(dims) = &item.dimensions {
            if !dims.is_non_negative() {
                return Err(CatalogError::NegativeDimensions {
                    id: item.id.clone(),
                });
            }
        }
        if let Some(path) = item.metadata.as_ref().and_then(|m| m.path.as_ref()) {
            if path.len() < 2 {
                return Err(CatalogError::DegeneratePath {
                    id: item.id.clone(),
                    points: path.len(),
                });
            }
        }
    }
    Ok(())
}
