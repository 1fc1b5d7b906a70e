//! Line entity

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// A straight line segment between two points
#[derive(Debug, Clone)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point
    pub start: Vector3,
    /// End point
    pub end: Vector3,
}

impl Line {
    /// Create a new line between two points
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Line {
            common: EntityCommon::new(),
            start,
            end,
        }
    }

    /// Length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Midpoint of the line
    pub fn midpoint(&self) -> Vector3 {
        (self.start + self.end) / 2.0
    }

    /// Direction from start to end, normalized
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }
}

impl CadObject for Line {
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
        "LINE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbLine"
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&[self.start, self.end])
    }

    fn translate(&mut self, offset: Vector3) {
        self.start = self.start + offset;
        self.end = self.end + offset;
    }
}
