//! Circle entity

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// A circle defined by center and radius
#[derive(Debug, Clone)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Create a new circle
    pub fn new(center: Vector3, radius: f64) -> Self {
        Circle {
            common: EntityCommon::new(),
            center,
            radius,
        }
    }

    /// Circle area
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Circle circumference
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

impl CadObject for Circle {
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
        "CIRCLE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbCircle"
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        let r = Vector3::new(self.radius, self.radius, 0.0);
        Some(BoundingBox3D::new(self.center - r, self.center + r))
    }

    fn translate(&mut self, offset: Vector3) {
        self.center = self.center + offset;
    }
}
