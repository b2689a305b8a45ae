//! Heterogeneous entity collection.

use super::{
    Entity, EntityKind, ExtrusionEntities, ExtrusionEntity, ExtrusionRole, ExtrusionVisitor,
};
use crate::geometry::{Point, Polygons, Polyline, Polylines};
use crate::{CoordF, Result};

/// An ordered, owning container of entities of any kind, possibly nested.
///
/// This is what path generators hand over to the G-code writer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtrusionEntityCollection {
    pub entities: ExtrusionEntities,
    /// Keep the entities in their current order when planning travel moves.
    pub no_sort: bool,
}

impl ExtrusionEntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: ExtrusionEntities) -> Self {
        Self {
            entities,
            no_sort: false,
        }
    }

    pub fn append(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    pub fn extend<I, E>(&mut self, entities: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        self.entities.extend(entities.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Number of non-collection entities, counting through nested collections.
    pub fn items_count(&self) -> usize {
        self.entities
            .iter()
            .map(|e| match e {
                Entity::Collection(nested) => nested.items_count(),
                _ => 1,
            })
            .sum()
    }

    /// Copy of this collection with all nested collections expanded in place.
    pub fn flatten(&self) -> Self {
        let mut out = Self {
            entities: Vec::with_capacity(self.entities.len()),
            no_sort: self.no_sort,
        };
        self.flatten_into(&mut out.entities);
        out
    }

    fn flatten_into(&self, dst: &mut ExtrusionEntities) {
        for entity in &self.entities {
            match entity {
                Entity::Collection(nested) => nested.flatten_into(dst),
                other => dst.push(other.clone()),
            }
        }
    }
}

impl ExtrusionEntity for ExtrusionEntityCollection {
    fn kind(&self) -> EntityKind {
        EntityKind::Collection
    }

    /// The common role of all entities, [`ExtrusionRole::Mixed`] when they differ.
    fn role(&self) -> ExtrusionRole {
        self.entities.iter().fold(ExtrusionRole::None, |out, e| {
            let role = e.role();
            if out == ExtrusionRole::None || out == role {
                role
            } else {
                ExtrusionRole::Mixed
            }
        })
    }

    fn is_collection(&self) -> bool {
        true
    }

    fn can_reverse(&self) -> bool {
        !self.no_sort
    }

    /// Reverse the order of the entities and each reversible non-loop entity.
    ///
    /// Loops keep their winding.
    fn reverse(&mut self) -> Result<()> {
        for entity in &mut self.entities {
            if entity.can_reverse() && !entity.is_loop() {
                entity.reverse()?;
            }
        }
        self.entities.reverse();
        Ok(())
    }

    fn first_point(&self) -> Option<Point> {
        self.entities.first().and_then(|e| e.first_point())
    }

    fn last_point(&self) -> Option<Point> {
        self.entities.last().and_then(|e| e.last_point())
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for entity in &self.entities {
            entity.collect_polygons_covered_by_width(out, scaled_epsilon);
        }
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for entity in &self.entities {
            entity.collect_polygons_covered_by_spacing(out, scaled_epsilon);
        }
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.entities
            .iter()
            .map(|e| e.min_mm3_per_mm())
            .fold(CoordF::MAX, CoordF::min)
    }

    /// All member polylines joined head to tail.
    fn as_polyline(&self) -> Polyline {
        let mut out = Polyline::new();
        for polyline in self.as_polylines() {
            out.append(&polyline);
        }
        out
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        for entity in &self.entities {
            entity.collect_polylines(dst);
        }
    }

    fn length(&self) -> CoordF {
        self.entities.iter().map(|e| e.length()).sum()
    }

    fn total_volume(&self) -> CoordF {
        self.entities.iter().map(|e| e.total_volume()).sum()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_collection(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_collection_mut(self)
    }
}

impl<'a> IntoIterator for &'a ExtrusionEntityCollection {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl FromIterator<Entity> for ExtrusionEntityCollection {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::from_entities(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::{
        ExtrusionLoop, ExtrusionLoopRole, ExtrusionMultiPath3D, ExtrusionPath, ExtrusionPath3D,
    };
    use crate::unscale_f;

    fn segment(a: (f64, f64), b: (f64, f64), role: ExtrusionRole, mm3_per_mm: f64) -> ExtrusionPath {
        ExtrusionPath::with_params(role, mm3_per_mm, 0.4, 0.2).with_polyline(Polyline::from_points(
            vec![Point::new_scale(a.0, a.1), Point::new_scale(b.0, b.1)],
        ))
    }

    fn make_loop() -> ExtrusionLoop {
        ExtrusionLoop::from_path(
            ExtrusionPath::with_params(ExtrusionRole::Perimeter, 0.05, 0.45, 0.2).with_polyline(
                Polyline::from_points(vec![
                    Point::new_scale(0.0, 0.0),
                    Point::new_scale(5.0, 0.0),
                    Point::new_scale(5.0, 5.0),
                    Point::new_scale(0.0, 0.0),
                ]),
            ),
            ExtrusionLoopRole::Default,
        )
    }

    #[test]
    fn test_role() {
        let mut collection = ExtrusionEntityCollection::new();
        assert_eq!(collection.role(), ExtrusionRole::None);

        collection.append(segment((0.0, 0.0), (1.0, 0.0), ExtrusionRole::GapFill, 0.01));
        collection.append(segment((1.0, 0.0), (2.0, 0.0), ExtrusionRole::GapFill, 0.02));
        assert_eq!(collection.role(), ExtrusionRole::GapFill);

        collection.append(make_loop());
        assert_eq!(collection.role(), ExtrusionRole::Mixed);
    }

    #[test]
    fn test_aggregates() {
        let mut collection = ExtrusionEntityCollection::new();
        collection.append(segment((0.0, 0.0), (10.0, 0.0), ExtrusionRole::GapFill, 0.01));
        collection.append(make_loop());

        let expected_length = 10.0 + 5.0 + 5.0 + 50.0_f64.sqrt();
        assert!((unscale_f(collection.length()) - expected_length).abs() < 1e-6);
        assert!((collection.min_mm3_per_mm() - 0.01).abs() < 1e-12);
        let volume: f64 = collection.iter().map(|e| e.total_volume()).sum();
        assert!((collection.total_volume() - volume).abs() < 1e-12);
        assert_eq!(collection.as_polylines().len(), 2);
        assert_eq!(collection.as_polyline().len(), 6);
        assert_eq!(ExtrusionEntityCollection::new().min_mm3_per_mm(), f64::MAX);
    }

    #[test]
    fn test_reverse_skips_loops_and_forbidden_kinds() {
        let mut non_planar = ExtrusionPath3D::new(ExtrusionRole::TopSolidInfill);
        non_planar.push(Point::new_scale(0.0, 0.0), 0);
        non_planar.push(Point::new_scale(1.0, 0.0), 50);
        let chain = ExtrusionMultiPath3D::from_paths(vec![non_planar]);

        let mut collection = ExtrusionEntityCollection::new();
        collection.append(segment((0.0, 0.0), (1.0, 0.0), ExtrusionRole::GapFill, 0.01));
        collection.append(make_loop());
        collection.append(chain.clone());

        collection.reverse().unwrap();

        assert_eq!(collection.entities[0], Entity::from(chain));
        assert_eq!(collection.entities[1], Entity::from(make_loop()));
        assert_eq!(collection.last_point(), Some(Point::new_scale(0.0, 0.0)));
    }

    #[test]
    fn test_nested_flatten() {
        let mut inner = ExtrusionEntityCollection::new();
        inner.append(segment((0.0, 0.0), (1.0, 0.0), ExtrusionRole::SolidInfill, 0.02));
        inner.append(segment((1.0, 0.0), (2.0, 0.0), ExtrusionRole::SolidInfill, 0.02));

        let mut outer = ExtrusionEntityCollection::new();
        outer.append(make_loop());
        outer.append(inner);
        assert_eq!(outer.len(), 2);
        assert_eq!(outer.items_count(), 3);

        let flat = outer.flatten();
        assert_eq!(flat.len(), 3);
        assert!(flat.iter().all(|e| !e.is_collection()));
        assert!((flat.length() - outer.length()).abs() < 1e-6);
    }

    #[test]
    fn test_no_sort_disables_reverse_flag() {
        let mut collection: ExtrusionEntityCollection =
            vec![Entity::from(make_loop())].into_iter().collect();
        assert!(collection.can_reverse());
        collection.no_sort = true;
        assert!(!collection.can_reverse());
        assert!(collection.is_collection());
    }
}
