//! Point entity

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// A point entity in 3D space
#[derive(Debug, Clone)]
pub struct Point {
    /// Common entity data
    pub common: EntityCommon,
    /// Location of the point
    pub location: Vector3,
}

impl Point {
    /// Create a new point at a specific location
    pub fn new(location: Vector3) -> Self {
        Point {
            common: EntityCommon::new(),
            location,
        }
    }

    /// Create a new point from coordinates
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Point::new(Vector3::new(x, y, z))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(Vector3::ZERO)
    }
}

impl CadObject for Point {
    fn handle(&self) -> Handle {
        self.common.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common.handle = handle;
    }

    fn owner(&self) -> Handle {
        self.common.owner
    }

    fn set_owner(&mut self, owner: Handle) {
        self.common.owner = owner;
    }

    fn document(&self) -> Option<DocumentId> {
        self.common.document
    }

    fn set_document(&mut self, document: Option<DocumentId>) {
        self.common.document = document;
    }

    fn object_name(&self) -> &'static str {
        "POINT"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbPoint"
    }
}

impl Entity for Point {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }

    fn translate(&mut self, offset: Vector3) {
        self.location = self.location + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = Point::from_coords(10.0, 20.0, 30.0);
        assert_eq!(point.location, Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(point.object_name(), "POINT");
        assert_eq!(point.subclass_marker(), "AcDbPoint");
    }

    #[test]
    fn test_point_translate() {
        let mut point = Point::new(Vector3::new(1.0, 2.0, 3.0));
        point.translate(Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(point.location, Vector3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn test_point_bounding_box() {
        let point = Point::from_coords(5.0, 10.0, 15.0);
        let bbox = point.bounding_box().unwrap();
        assert_eq!(bbox.min, point.location);
        assert_eq!(bbox.max, point.location);
    }
}
