//! Text style table record

use crate::object::{CadObject, DocumentId};
use crate::tables::TableEntry;
use crate::types::Handle;

/// A text style table record
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Style name
    pub name: String,
    /// Font file name
    pub font_file: String,
    /// Fixed text height, 0 when height is free per entity
    pub height: f64,
    /// Width scale factor
    pub width_factor: f64,
    /// Oblique angle in radians
    pub oblique_angle: f64,
}

impl TextStyle {
    /// Create a new text style using the default font
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
            font_file: "txt".to_string(),
            height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
        }
    }

    /// The "Standard" style every document carries
    pub fn standard() -> Self {
        TextStyle::new("Standard")
    }

    /// Check if text of this style has a fixed height
    pub fn has_fixed_height(&self) -> bool {
        self.height > 0.0
    }
}

impl CadObject for TextStyle {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn owner(&self) -> Handle {
        self.owner
    }

    fn set_owner(&mut self, owner: Handle) {
        self.owner = owner;
    }

    fn document(&self) -> Option<DocumentId> {
        self.document
    }

    fn set_document(&mut self, document: Option<DocumentId>) {
        self.document = document;
    }

    fn object_name(&self) -> &'static str {
        "STYLE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbTextStyleTableRecord"
    }
}

impl TableEntry for TextStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        self.name.eq_ignore_ascii_case("Standard")
    }
}
