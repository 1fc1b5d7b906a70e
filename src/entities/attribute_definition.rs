//! Attribute definition entity

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Behavior flags shared by attribute definitions and instances
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttributeFlags: u8 {
        /// Attribute is not displayed
        const INVISIBLE = 1;
        /// Attribute carries a constant value
        const CONSTANT = 2;
        /// Input is verified on insertion
        const VERIFY = 4;
        /// Attribute is preset (no prompt on insertion)
        const PRESET = 8;
    }
}

/// Horizontal text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Aligned,
    Middle,
    Fit,
}

/// Vertical text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Baseline,
    Bottom,
    Middle,
    Top,
}

/// Template declaring an attribute inside a block definition
///
/// Every insert referencing the block gets one attribute instance per
/// definition, keyed by the (not necessarily unique) tag.
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    /// Common entity data
    pub common: EntityCommon,
    /// Tag linking instances to this definition
    pub tag: String,
    /// Prompt shown when the attribute is filled in
    pub prompt: String,
    /// Default value new instances start with
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

impl AttributeDefinition {
    /// Subclass discriminator of attribute definitions
    pub const SUBCLASS_MARKER: &'static str = "AcDbAttributeDefinition";

    /// Create a new definition with a generated prompt
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        AttributeDefinition {
            common: EntityCommon::new(),
            prompt: format!("Enter {}:", tag),
            tag,
            value: String::new(),
            position: Vector3::ZERO,
            height: 1.0,
            rotation: 0.0,
            flags: AttributeFlags::default(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            style: "Standard".to_string(),
        }
    }

    /// Create a definition with a default value
    pub fn with_value(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let mut def = AttributeDefinition::new(tag);
        def.value = value.into();
        def
    }
}

impl CadObject for AttributeDefinition {
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
        "ATTDEF"
    }

    fn subclass_marker(&self) -> &'static str {
        Self::SUBCLASS_MARKER
    }
}

impl Entity for AttributeDefinition {
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
