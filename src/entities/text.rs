//! Single-line text entity

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// A single-line text entity
#[derive(Debug, Clone)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content
    pub value: String,
    /// Insertion point (baseline left)
    pub insertion_point: Vector3,
    /// Text height
    pub height: f64,
    /// Rotation angle in radians
    pub rotation: f64,
    /// Text style name
    pub style: String,
}

impl Text {
    /// Create a new text entity
    pub fn new(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        Text {
            common: EntityCommon::new(),
            value: value.into(),
            insertion_point,
            height,
            rotation: 0.0,
            style: "Standard".to_string(),
        }
    }

    /// Estimated rendered width (the real width depends on the font)
    pub fn estimated_width(&self) -> f64 {
        self.value.chars().count() as f64 * self.height * 0.6
    }
}

impl CadObject for Text {
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
        "TEXT"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbText"
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        // Rotation is ignored in this estimate
        let max = self.insertion_point + Vector3::new(self.estimated_width(), self.height, 0.0);
        Some(BoundingBox3D::new(self.insertion_point, max))
    }

    fn translate(&mut self, offset: Vector3) {
        self.insertion_point = self.insertion_point + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new("hello", Vector3::ZERO, 2.5);
        assert_eq!(text.value, "hello");
        assert_eq!(text.height, 2.5);
        assert_eq!(text.style, "Standard");
    }

    #[test]
    fn test_estimated_width() {
        let text = Text::new("ab", Vector3::ZERO, 1.0);
        assert!((text.estimated_width() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_text_bounding_box() {
        let text = Text::new("ab", Vector3::new(1.0, 1.0, 0.0), 1.0);
        let bbox = text.bounding_box().unwrap();
        assert_eq!(bbox.min, Vector3::new(1.0, 1.0, 0.0));
        assert!((bbox.max.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_translate() {
        let mut text = Text::new("x", Vector3::ZERO, 1.0);
        text.translate(Vector3::new(0.0, 5.0, 0.0));
        assert_eq!(text.insertion_point, Vector3::new(0.0, 5.0, 0.0));
    }
}
