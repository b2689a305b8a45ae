//! Extrusion entities.
//!
//! The closed family of printable toolpath kinds:
//! - [`ExtrusionPath`]: one polyline with constant flow
//! - [`ExtrusionPath3D`]: a path with a per-vertex elevation offset
//! - [`ExtrusionMultiPath`] / [`ExtrusionMultiPath3D`]: chains extruded in one motion
//! - [`ExtrusionLoop`]: a closed ring of paths
//! - [`ExtrusionEntityCollection`]: an ordered container of any of the above
//!
//! All kinds implement [`ExtrusionEntity`]; [`Entity`] owns one value of any kind.

mod append;
mod collection;
mod entity;
mod extrusion_loop;
mod multi_path;
mod path;
mod path_3d;
mod printer;
mod role;
mod visitor;

pub use append::{
    extrusion_entities_append_loops, extrusion_entities_append_paths, extrusion_paths_append,
};
pub use collection::ExtrusionEntityCollection;
pub use entity::{Entity, EntityKind, ExtrusionEntities, ExtrusionEntity};
pub use extrusion_loop::ExtrusionLoop;
pub use multi_path::{ExtrusionMultiEntity, ExtrusionMultiPath, ExtrusionMultiPath3D};
pub use path::{ExtrusionPath, ExtrusionPaths, BRIDGE_EXTRA_SPACING};
pub use path_3d::{ExtrusionPath3D, ExtrusionPaths3D};
pub use printer::ExtrusionPrinter;
pub use role::{ExtrusionLoopRole, ExtrusionRole};
pub use visitor::{dispatch, dispatch_mut, ExtrusionVisitor};
