//! The extrusion entity contract and the owning handle over all entity kinds.

use super::{
    ExtrusionEntityCollection, ExtrusionLoop, ExtrusionMultiPath, ExtrusionMultiPath3D,
    ExtrusionPath, ExtrusionPath3D, ExtrusionRole, ExtrusionVisitor,
};
use crate::geometry::{Point, Polygons, Polyline, Polylines};
use crate::{CoordF, Result};
use std::fmt;

/// The closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Path,
    Path3D,
    MultiPath,
    MultiPath3D,
    Loop,
    Collection,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Path => "ExtrusionPath",
            EntityKind::Path3D => "ExtrusionPath3D",
            EntityKind::MultiPath => "ExtrusionMultiPath",
            EntityKind::MultiPath3D => "ExtrusionMultiPath3D",
            EntityKind::Loop => "ExtrusionLoop",
            EntityKind::Collection => "ExtrusionEntityCollection",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities shared by every extrusion entity.
///
/// Lengths are in scaled units, volumes in mm³ and volumetric rates in mm³ per mm of
/// head motion.
pub trait ExtrusionEntity {
    fn kind(&self) -> EntityKind;

    fn role(&self) -> ExtrusionRole;

    fn is_collection(&self) -> bool {
        false
    }

    fn is_loop(&self) -> bool {
        false
    }

    /// Whether path ordering may flip this entity's direction.
    fn can_reverse(&self) -> bool {
        true
    }

    /// Reverse the extrusion direction in place.
    ///
    /// Kinds that forbid reversal return [`crate::Error::ReverseForbidden`] and are left
    /// untouched.
    fn reverse(&mut self) -> Result<()>;

    fn first_point(&self) -> Option<Point>;

    fn last_point(&self) -> Option<Point>;

    /// Append the 2D polygons covered by the extrusion, offset by half the extrusion width
    /// plus `scaled_epsilon`. The epsilon makes footprints of adjacent extrusions overlap,
    /// so their union has no gaps.
    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF);

    /// Like [`Self::collect_polygons_covered_by_width`], but offset by half the extrusion
    /// spacing. Useful to calculate the area really filled in by 100% rectilinear infill.
    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF);

    fn polygons_covered_by_width(&self, scaled_epsilon: CoordF) -> Polygons {
        let mut out = Polygons::new();
        self.collect_polygons_covered_by_width(&mut out, scaled_epsilon);
        out
    }

    fn polygons_covered_by_spacing(&self, scaled_epsilon: CoordF) -> Polygons {
        let mut out = Polygons::new();
        self.collect_polygons_covered_by_spacing(&mut out, scaled_epsilon);
        out
    }

    /// Minimum volumetric rate of this entity. Used by the constant nozzle pressure
    /// algorithm.
    fn min_mm3_per_mm(&self) -> CoordF;

    fn as_polyline(&self) -> Polyline;

    fn collect_polylines(&self, dst: &mut Polylines);

    fn as_polylines(&self) -> Polylines {
        let mut dst = Polylines::new();
        self.collect_polylines(&mut dst);
        dst
    }

    fn length(&self) -> CoordF;

    fn total_volume(&self) -> CoordF;

    /// Invoke the visitor method matching this entity's kind.
    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()>;

    /// Invoke the mutable visitor method matching this entity's kind.
    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()>;
}

/// Owning handle to one entity of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Path(ExtrusionPath),
    Path3D(ExtrusionPath3D),
    MultiPath(ExtrusionMultiPath),
    MultiPath3D(ExtrusionMultiPath3D),
    Loop(ExtrusionLoop),
    Collection(ExtrusionEntityCollection),
}

/// Ordered sequence of owned entities of mixed kinds.
pub type ExtrusionEntities = Vec<Entity>;

impl Entity {
    fn inner(&self) -> &dyn ExtrusionEntity {
        match self {
            Entity::Path(path) => path,
            Entity::Path3D(path) => path,
            Entity::MultiPath(multipath) => multipath,
            Entity::MultiPath3D(multipath) => multipath,
            Entity::Loop(extrusion_loop) => extrusion_loop,
            Entity::Collection(collection) => collection,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ExtrusionEntity {
        match self {
            Entity::Path(path) => path,
            Entity::Path3D(path) => path,
            Entity::MultiPath(multipath) => multipath,
            Entity::MultiPath3D(multipath) => multipath,
            Entity::Loop(extrusion_loop) => extrusion_loop,
            Entity::Collection(collection) => collection,
        }
    }

    pub fn as_path(&self) -> Option<&ExtrusionPath> {
        match self {
            Entity::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_loop(&self) -> Option<&ExtrusionLoop> {
        match self {
            Entity::Loop(extrusion_loop) => Some(extrusion_loop),
            _ => None,
        }
    }

    pub fn as_loop_mut(&mut self) -> Option<&mut ExtrusionLoop> {
        match self {
            Entity::Loop(extrusion_loop) => Some(extrusion_loop),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&ExtrusionEntityCollection> {
        match self {
            Entity::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl ExtrusionEntity for Entity {
    fn kind(&self) -> EntityKind {
        self.inner().kind()
    }

    fn role(&self) -> ExtrusionRole {
        self.inner().role()
    }

    fn is_collection(&self) -> bool {
        self.inner().is_collection()
    }

    fn is_loop(&self) -> bool {
        self.inner().is_loop()
    }

    fn can_reverse(&self) -> bool {
        self.inner().can_reverse()
    }

    fn reverse(&mut self) -> Result<()> {
        self.inner_mut().reverse()
    }

    fn first_point(&self) -> Option<Point> {
        self.inner().first_point()
    }

    fn last_point(&self) -> Option<Point> {
        self.inner().last_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.inner()
            .collect_polygons_covered_by_width(out, scaled_epsilon)
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.inner()
            .collect_polygons_covered_by_spacing(out, scaled_epsilon)
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.inner().min_mm3_per_mm()
    }

    fn as_polyline(&self) -> Polyline {
        self.inner().as_polyline()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        self.inner().collect_polylines(dst)
    }

    fn length(&self) -> CoordF {
        self.inner().length()
    }

    fn total_volume(&self) -> CoordF {
        self.inner().total_volume()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        self.inner().visit(visitor)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        self.inner_mut().visit_mut(visitor)
    }
}

impl From<ExtrusionPath> for Entity {
    fn from(path: ExtrusionPath) -> Self {
        Entity::Path(path)
    }
}

impl From<ExtrusionPath3D> for Entity {
    fn from(path: ExtrusionPath3D) -> Self {
        Entity::Path3D(path)
    }
}

impl From<ExtrusionMultiPath> for Entity {
    fn from(multipath: ExtrusionMultiPath) -> Self {
        Entity::MultiPath(multipath)
    }
}

impl From<ExtrusionMultiPath3D> for Entity {
    fn from(multipath: ExtrusionMultiPath3D) -> Self {
        Entity::MultiPath3D(multipath)
    }
}

impl From<ExtrusionLoop> for Entity {
    fn from(extrusion_loop: ExtrusionLoop) -> Self {
        Entity::Loop(extrusion_loop)
    }
}

impl From<ExtrusionEntityCollection> for Entity {
    fn from(collection: ExtrusionEntityCollection) -> Self {
        Entity::Collection(collection)
    }
}
