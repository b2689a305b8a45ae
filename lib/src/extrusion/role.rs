//! Extrusion roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a piece of geometry is extruded.
///
/// Each value identifies a distinct `{ extruder, speed }` choice downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtrusionRole {
    #[default]
    None,
    /// Internal perimeter.
    Perimeter,
    /// External (outer) perimeter.
    ExternalPerimeter,
    /// Perimeter printed over unsupported material.
    OverhangPerimeter,
    /// Sparse infill.
    InternalInfill,
    /// Solid infill.
    SolidInfill,
    /// Top solid infill (visible surface).
    TopSolidInfill,
    /// Bridge infill (over gaps).
    BridgeInfill,
    /// Gap fill (thin areas).
    GapFill,
    /// Skirt/brim.
    Skirt,
    /// Support material.
    SupportMaterial,
    /// Support interface.
    SupportMaterialInterface,
    WipeTower,
    /// Custom (user-defined).
    Custom,
    /// Role of a collection holding extrusions of several roles.
    Mixed,
}

impl ExtrusionRole {
    /// Check if this role is a perimeter.
    pub fn is_perimeter(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::Perimeter
                | ExtrusionRole::ExternalPerimeter
                | ExtrusionRole::OverhangPerimeter
        )
    }

    /// Check if this role is infill.
    pub fn is_infill(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::BridgeInfill
                | ExtrusionRole::InternalInfill
                | ExtrusionRole::SolidInfill
                | ExtrusionRole::TopSolidInfill
        )
    }

    /// Check if this role is solid infill (bridges included).
    pub fn is_solid_infill(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::BridgeInfill | ExtrusionRole::SolidInfill | ExtrusionRole::TopSolidInfill
        )
    }

    /// Check if this role is extruded over unsupported material.
    pub fn is_bridge(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::BridgeInfill | ExtrusionRole::OverhangPerimeter
        )
    }

    /// Check if this role is support.
    pub fn is_support(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::SupportMaterial | ExtrusionRole::SupportMaterialInterface
        )
    }

    /// Get a descriptive name for this role.
    pub fn name(&self) -> &'static str {
        match self {
            ExtrusionRole::None => "none",
            ExtrusionRole::Perimeter => "perimeter",
            ExtrusionRole::ExternalPerimeter => "external perimeter",
            ExtrusionRole::OverhangPerimeter => "overhang perimeter",
            ExtrusionRole::InternalInfill => "internal infill",
            ExtrusionRole::SolidInfill => "solid infill",
            ExtrusionRole::TopSolidInfill => "top solid infill",
            ExtrusionRole::BridgeInfill => "bridge infill",
            ExtrusionRole::GapFill => "gap fill",
            ExtrusionRole::Skirt => "skirt",
            ExtrusionRole::SupportMaterial => "support material",
            ExtrusionRole::SupportMaterialInterface => "support interface",
            ExtrusionRole::WipeTower => "wipe tower",
            ExtrusionRole::Custom => "custom",
            ExtrusionRole::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ExtrusionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seam placement strategy of a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtrusionLoopRole {
    #[default]
    Default,
    ContourInternalPerimeter,
    Skirt,
}
