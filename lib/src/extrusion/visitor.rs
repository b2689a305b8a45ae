//! Double dispatch over entity kinds.
//!
//! An [`ExtrusionVisitor`] gets one method per concrete kind, in an immutable and a mutable
//! form. Defaults:
//! - every `*_mut` method forwards to its immutable counterpart, so read-only visitors only
//!   implement the immutable methods;
//! - immutable methods of the composite kinds walk their children;
//! - immutable methods of the leaf kinds fail with [`Error::UnhandledEntity`], so a kind the
//!   visitor does not handle is never skipped silently.
//!
//! Because of the forwarding, the default mutable walk of a composite is the immutable
//! one: a visitor that overrides only `visit_path_mut` is handed `&ExtrusionPath` through
//! `visit_path` for paths nested in composites. Mutating visitors override the `*_mut`
//! methods of every composite they descend into and recurse with [`dispatch_mut`].

use super::{
    Entity, EntityKind, ExtrusionEntityCollection, ExtrusionLoop, ExtrusionMultiPath,
    ExtrusionMultiPath3D, ExtrusionPath, ExtrusionPath3D,
};
use crate::{Error, Result};

/// Per-kind callbacks. See the module docs for the default behaviour.
///
/// The `*_mut` composite defaults do not descend mutably; override them to modify nested
/// entities.
pub trait ExtrusionVisitor {
    fn visit_path(&mut self, _path: &ExtrusionPath) -> Result<()> {
        Err(Error::UnhandledEntity(EntityKind::Path))
    }

    fn visit_path_mut(&mut self, path: &mut ExtrusionPath) -> Result<()> {
        self.visit_path(path)
    }

    fn visit_path_3d(&mut self, _path: &ExtrusionPath3D) -> Result<()> {
        Err(Error::UnhandledEntity(EntityKind::Path3D))
    }

    fn visit_path_3d_mut(&mut self, path: &mut ExtrusionPath3D) -> Result<()> {
        self.visit_path_3d(path)
    }

    fn visit_multi_path(&mut self, multipath: &ExtrusionMultiPath) -> Result<()> {
        for path in &multipath.paths {
            self.visit_path(path)?;
        }
        Ok(())
    }

    fn visit_multi_path_mut(&mut self, multipath: &mut ExtrusionMultiPath) -> Result<()> {
        self.visit_multi_path(multipath)
    }

    fn visit_multi_path_3d(&mut self, multipath: &ExtrusionMultiPath3D) -> Result<()> {
        for path in &multipath.paths {
            self.visit_path_3d(path)?;
        }
        Ok(())
    }

    fn visit_multi_path_3d_mut(&mut self, multipath: &mut ExtrusionMultiPath3D) -> Result<()> {
        self.visit_multi_path_3d(multipath)
    }

    fn visit_loop(&mut self, extrusion_loop: &ExtrusionLoop) -> Result<()> {
        for path in &extrusion_loop.paths {
            self.visit_path(path)?;
        }
        Ok(())
    }

    fn visit_loop_mut(&mut self, extrusion_loop: &mut ExtrusionLoop) -> Result<()> {
        self.visit_loop(extrusion_loop)
    }

    fn visit_collection(&mut self, collection: &ExtrusionEntityCollection) -> Result<()> {
        for entity in &collection.entities {
            dispatch(self, entity)?;
        }
        Ok(())
    }

    fn visit_collection_mut(&mut self, collection: &mut ExtrusionEntityCollection) -> Result<()> {
        self.visit_collection(collection)
    }
}

/// Route an entity to the visitor method of its kind.
pub fn dispatch<V: ExtrusionVisitor + ?Sized>(visitor: &mut V, entity: &Entity) -> Result<()> {
    match entity {
        Entity::Path(path) => visitor.visit_path(path),
        Entity::Path3D(path) => visitor.visit_path_3d(path),
        Entity::MultiPath(multipath) => visitor.visit_multi_path(multipath),
        Entity::MultiPath3D(multipath) => visitor.visit_multi_path_3d(multipath),
        Entity::Loop(extrusion_loop) => visitor.visit_loop(extrusion_loop),
        Entity::Collection(collection) => visitor.visit_collection(collection),
    }
}

/// Route an entity to the mutable visitor method of its kind.
pub fn dispatch_mut<V: ExtrusionVisitor + ?Sized>(visitor: &mut V, entity: &mut Entity) -> Result<()> {
    match entity {
        Entity::Path(path) => visitor.visit_path_mut(path),
        Entity::Path3D(path) => visitor.visit_path_3d_mut(path),
        Entity::MultiPath(multipath) => visitor.visit_multi_path_mut(multipath),
        Entity::MultiPath3D(multipath) => visitor.visit_multi_path_3d_mut(multipath),
        Entity::Loop(extrusion_loop) => visitor.visit_loop_mut(extrusion_loop),
        Entity::Collection(collection) => visitor.visit_collection_mut(collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::{ExtrusionEntity, ExtrusionLoopRole, ExtrusionRole};
    use crate::geometry::{Point, Polyline};
    use crate::{scale, unscale_f, CoordF};

    fn segment(role: ExtrusionRole) -> ExtrusionPath {
        ExtrusionPath::with_params(role, 0.05, 0.4, 0.2).with_polyline(Polyline::from_points(vec![
            Point::new_scale(0.0, 0.0),
            Point::new_scale(1.0, 0.0),
        ]))
    }

    /// Sums the length of every planar path it sees.
    #[derive(Default)]
    struct LengthSum {
        total: CoordF,
        paths: usize,
    }

    impl ExtrusionVisitor for LengthSum {
        fn visit_path(&mut self, path: &ExtrusionPath) -> Result<()> {
            self.total += path.length();
            self.paths += 1;
            Ok(())
        }
    }

    /// Sets the feedrate of every planar path.
    struct SetFeedrate(CoordF);

    impl ExtrusionVisitor for SetFeedrate {
        fn visit_path(&mut self, _path: &ExtrusionPath) -> Result<()> {
            Ok(())
        }

        fn visit_path_mut(&mut self, path: &mut ExtrusionPath) -> Result<()> {
            path.feedrate = self.0;
            Ok(())
        }

        fn visit_loop_mut(&mut self, extrusion_loop: &mut ExtrusionLoop) -> Result<()> {
            for path in &mut extrusion_loop.paths {
                self.visit_path_mut(path)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_collection_default_walks_children() {
        let mut collection = ExtrusionEntityCollection::new();
        collection.append(segment(ExtrusionRole::GapFill));
        collection.append(ExtrusionLoop::from_paths(
            vec![segment(ExtrusionRole::Perimeter), segment(ExtrusionRole::Perimeter)],
            ExtrusionLoopRole::Default,
        ));
        collection.append(ExtrusionMultiPath::from_paths(vec![segment(ExtrusionRole::SolidInfill)]));

        let mut visitor = LengthSum::default();
        collection.visit(&mut visitor).unwrap();
        assert_eq!(visitor.paths, 4);
        assert!((unscale_f(visitor.total) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unhandled_leaf_fails_loudly() {
        let mut path3d = ExtrusionPath3D::new(ExtrusionRole::Perimeter);
        path3d.push(Point::new(0, 0), 0);
        path3d.push(Point::new(scale(1.0), 0), 0);
        let entity = Entity::from(path3d);

        let mut visitor = LengthSum::default();
        let err = entity.visit(&mut visitor).unwrap_err();
        assert!(matches!(err, Error::UnhandledEntity(EntityKind::Path3D)));
        assert!(matches!(
            dispatch(&mut visitor, &entity),
            Err(Error::UnhandledEntity(EntityKind::Path3D))
        ));
    }

    #[test]
    fn test_mut_forwards_to_immutable() {
        let mut entity = Entity::from(segment(ExtrusionRole::Skirt));
        let mut visitor = LengthSum::default();
        dispatch_mut(&mut visitor, &mut entity).unwrap();
        assert_eq!(visitor.paths, 1);
    }

    #[test]
    fn test_mutable_visit_changes_entities() {
        let mut entity = Entity::from(ExtrusionLoop::from_paths(
            vec![segment(ExtrusionRole::Perimeter), segment(ExtrusionRole::Perimeter)],
            ExtrusionLoopRole::Default,
        ));
        entity.visit_mut(&mut SetFeedrate(42.0)).unwrap();
        let extrusion_loop = entity.as_loop().unwrap();
        assert!(extrusion_loop.paths.iter().all(|p| p.feedrate == 42.0));
    }

    /// [`SetFeedrate`] that also descends mutably into collections.
    struct DeepSetFeedrate(SetFeedrate);

    impl ExtrusionVisitor for DeepSetFeedrate {
        fn visit_path(&mut self, path: &ExtrusionPath) -> Result<()> {
            self.0.visit_path(path)
        }

        fn visit_path_mut(&mut self, path: &mut ExtrusionPath) -> Result<()> {
            self.0.visit_path_mut(path)
        }

        fn visit_collection_mut(&mut self, collection: &mut ExtrusionEntityCollection) -> Result<()> {
            for entity in &mut collection.entities {
                dispatch_mut(self, entity)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_collection_mut_walk_is_read_only() {
        let mut collection = ExtrusionEntityCollection::new();
        collection.append(segment(ExtrusionRole::GapFill));

        // The default walk hands nested paths to `visit_path`.
        collection.visit_mut(&mut SetFeedrate(42.0)).unwrap();
        assert_eq!(collection.entities[0].as_path().unwrap().feedrate, 0.0);

        collection.visit_mut(&mut DeepSetFeedrate(SetFeedrate(42.0))).unwrap();
        assert_eq!(collection.entities[0].as_path().unwrap().feedrate, 42.0);
    }
}
