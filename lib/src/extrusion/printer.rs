//! Textual trace of an entity tree, for tests and debugging.

use super::{
    dispatch, EntityKind, ExtrusionEntity, ExtrusionEntityCollection, ExtrusionLoop,
    ExtrusionMultiPath, ExtrusionMultiPath3D, ExtrusionPath, ExtrusionPath3D, ExtrusionRole,
    ExtrusionVisitor,
};
use crate::geometry::Point;
use crate::{unscale, Coord, Result};

/// Visitor rendering entities as `Kind:role{...}` with coordinates in mm.
///
/// ```text
/// ExtrusionPath:perimeter{0:0,10:0}
/// ExtrusionPath3D:top solid infill{0:0:0,10:0:0.5}
/// ExtrusionLoop:external perimeter{ExtrusionPath:external perimeter{...},...}
/// ```
#[derive(Debug, Default)]
pub struct ExtrusionPrinter {
    out: String,
}

impl ExtrusionPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn open(&mut self, kind: EntityKind, role: ExtrusionRole) {
        self.out.push_str(kind.name());
        self.out.push(':');
        self.out.push_str(role.name());
        self.out.push('{');
    }

    fn point(&mut self, p: &Point) {
        self.out
            .push_str(&format!("{}:{}", unscale(p.x), unscale(p.y)));
    }

    fn point_3d(&mut self, p: &Point, z: Coord) {
        self.point(p);
        self.out.push_str(&format!(":{}", unscale(z)));
    }

    fn separator(&mut self, index: usize) {
        if index > 0 {
            self.out.push(',');
        }
    }
}

impl ExtrusionVisitor for ExtrusionPrinter {
    fn visit_path(&mut self, path: &ExtrusionPath) -> Result<()> {
        self.open(EntityKind::Path, path.role());
        for (i, p) in path.polyline.points().iter().enumerate() {
            self.separator(i);
            self.point(p);
        }
        self.out.push('}');
        Ok(())
    }

    fn visit_path_3d(&mut self, path: &ExtrusionPath3D) -> Result<()> {
        self.open(EntityKind::Path3D, path.role());
        for (i, (p, z)) in path.vertices().enumerate() {
            self.separator(i);
            self.point_3d(&p, z);
        }
        self.out.push('}');
        Ok(())
    }

    fn visit_multi_path(&mut self, multipath: &ExtrusionMultiPath) -> Result<()> {
        self.open(EntityKind::MultiPath, multipath.role());
        for (i, path) in multipath.paths.iter().enumerate() {
            self.separator(i);
            self.visit_path(path)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn visit_multi_path_3d(&mut self, multipath: &ExtrusionMultiPath3D) -> Result<()> {
        self.open(EntityKind::MultiPath3D, multipath.role());
        for (i, path) in multipath.paths.iter().enumerate() {
            self.separator(i);
            self.visit_path_3d(path)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn visit_loop(&mut self, extrusion_loop: &ExtrusionLoop) -> Result<()> {
        self.open(EntityKind::Loop, extrusion_loop.role());
        for (i, path) in extrusion_loop.paths.iter().enumerate() {
            self.separator(i);
            self.visit_path(path)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn visit_collection(&mut self, collection: &ExtrusionEntityCollection) -> Result<()> {
        self.open(EntityKind::Collection, collection.role());
        for (i, entity) in collection.entities.iter().enumerate() {
            self.separator(i);
            dispatch(self, entity)?;
        }
        self.out.push('}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::{ExtrusionEntity, ExtrusionLoopRole};
    use crate::geometry::Polyline;
    use crate::scale;

    fn segment(role: ExtrusionRole, a: (f64, f64), b: (f64, f64)) -> ExtrusionPath {
        ExtrusionPath::with_params(role, 0.05, 0.4, 0.2).with_polyline(Polyline::from_points(vec![
            Point::new_scale(a.0, a.1),
            Point::new_scale(b.0, b.1),
        ]))
    }

    #[test]
    fn test_print_path() {
        let mut printer = ExtrusionPrinter::new();
        segment(ExtrusionRole::Perimeter, (0.0, 0.0), (10.0, 0.5))
            .visit(&mut printer)
            .unwrap();
        assert_eq!(printer.as_str(), "ExtrusionPath:perimeter{0:0,10:0.5}");
    }

    #[test]
    fn test_print_path_3d() {
        let mut path = ExtrusionPath3D::new(ExtrusionRole::TopSolidInfill);
        path.push(Point::new(0, 0), 0);
        path.push(Point::new(scale(10.0), 0), scale(0.5));

        let mut printer = ExtrusionPrinter::new();
        path.visit(&mut printer).unwrap();
        assert_eq!(
            printer.into_string(),
            "ExtrusionPath3D:top solid infill{0:0:0,10:0:0.5}"
        );
    }

    #[test]
    fn test_print_nested() {
        let mut collection = ExtrusionEntityCollection::new();
        collection.append(ExtrusionLoop::from_paths(
            vec![
                segment(ExtrusionRole::Perimeter, (0.0, 0.0), (1.0, 0.0)),
                segment(ExtrusionRole::Perimeter, (1.0, 0.0), (0.0, 0.0)),
            ],
            ExtrusionLoopRole::Default,
        ));
        collection.append(ExtrusionMultiPath::from_paths(vec![segment(
            ExtrusionRole::GapFill,
            (2.0, 0.0),
            (3.0, 0.0),
        )]));

        let mut printer = ExtrusionPrinter::new();
        collection.visit(&mut printer).unwrap();
        assert_eq!(
            printer.as_str(),
            "ExtrusionEntityCollection:mixed{\
             ExtrusionLoop:perimeter{ExtrusionPath:perimeter{0:0,1:0},ExtrusionPath:perimeter{1:0,0:0}},\
             ExtrusionMultiPath:gap fill{ExtrusionPath:gap fill{2:0,3:0}}}"
        );
    }
}
