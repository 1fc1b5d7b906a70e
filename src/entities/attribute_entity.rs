//! Attribute instance entity

use super::attribute_definition::{
    AttributeDefinition, AttributeFlags, HorizontalAlignment, VerticalAlignment,
};
use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// An attribute value carried by an insert
///
/// Instances are tied to the attribute definitions of the referenced block
/// by tag. The attribute synchronizer keeps the instance list of every
/// insert aligned with the block's definitions.
#[derive(Debug, Clone)]
pub struct AttributeEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Tag of the defining template
    pub tag: String,
    /// Current value
    pub value: String,
    /// Text position
    pub position: Vector3,
    /// Text height
    pub height: f64,
    /// Rotation angle in radians
    pub rotation: f64,
    /// Behavior flags
    pub flags: AttributeFlags,
    /// Horizontal justification
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical justification
    pub vertical_alignment: VerticalAlignment,
    /// Text style name
    pub style: String,
}

impl AttributeEntity {
    /// Subclass discriminator of attribute instances
    pub const SUBCLASS_MARKER: &'static str = "AcDbAttribute";

    /// Create a bare instance with the given tag and value
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        AttributeEntity {
            common: EntityCommon::new(),
            tag: tag.into(),
            value: value.into(),
            position: Vector3::ZERO,
            height: 1.0,
            rotation: 0.0,
            flags: AttributeFlags::default(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            style: "Standard".to_string(),
        }
    }

    /// Instantiate from a definition, copying its template fields
    ///
    /// Identity fields start fresh; the instance belongs to whichever
    /// insert later adds it.
    pub fn from_definition(definition: &AttributeDefinition) -> Self {
        let mut common = EntityCommon::with_layer(definition.common.layer.clone());
        common.color = definition.common.color;
        common.line_type = definition.common.line_type.clone();
        common.line_weight = definition.common.line_weight;
        common.transparency = definition.common.transparency;
        common.invisible = definition.common.invisible;

        AttributeEntity {
            common,
            tag: definition.tag.clone(),
            value: definition.value.clone(),
            position: definition.position,
            height: definition.height,
            rotation: definition.rotation,
            flags: definition.flags,
            horizontal_alignment: definition.horizontal_alignment,
            vertical_alignment: definition.vertical_alignment,
            style: definition.style.clone(),
        }
    }
}

impl CadObject for AttributeEntity {
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
        "ATTRIB"
    }

    fn subclass_marker(&self) -> &'static str {
        Self::SUBCLASS_MARKER
    }
}

impl Entity for AttributeEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.position))
    }

    fn translate(&mut self, offset: Vector3) {
        self.position = self.position + offset;
    }
}
