//! Intersectable trait and the Intersection record for ray-geometry queries.

use vista_math::Point3;

use crate::{Geometry, Ray};

/// Record of a ray-geometry intersection.
///
/// The geometry is borrowed from the scene, which outlives every
/// intersection computed against it.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Geometry that was hit
    pub geometry: &'a Geometry,
    /// Point of intersection
    pub point: Point3,
    /// Distance from the ray origin
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(geometry: &'a Geometry, point: Point3, distance: f64) -> Self {
        Self {
            geometry,
            point,
            distance,
        }
    }
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// Intersections with `ray` at distances in `(0, max_distance]`.
    ///
    /// Returns `None` when nothing is hit; never an empty list.
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'a>>>;

    /// All intersections in front of the ray origin.
    fn intersect_all<'a>(&'a self, ray: &Ray) -> Option<Vec<Intersection<'a>>> {
        self.intersect(ray, f64::INFINITY)
    }
}

/// An unordered collection of geometries, queried by linear scan.
#[derive(Debug, Clone, Default)]
pub struct Geometries {
    members: Vec<Geometry>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a geometry to the collection.
    pub fn add(&mut self, geometry: Geometry) {
        self.members.push(geometry);
    }

    /// Get the number of geometries.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.members.iter()
    }
}

impl FromIterator<Geometry> for Geometries {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Intersectable for Geometries {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'a>>> {
        let mut merged: Option<Vec<Intersection<'a>>> = None;

        for member in &self.members {
            if let Some(hits) = member.intersect(ray, max_distance) {
                merged.get_or_insert_with(Vec::new).extend(hits);
            }
        }

        merged
    }
}
