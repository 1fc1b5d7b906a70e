//! Dimension style table record
//!
//! Field names follow the format's raw DIMVAR names so they line up with
//! what editors and the codec call them.

use crate::object::{CadObject, DocumentId};
use crate::tables::TableEntry;
use crate::types::Handle;

/// A dimension style table record
#[derive(Debug, Clone)]
pub struct DimStyle {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Style name
    pub name: String,
    /// Overall scale factor applied to offsets, extensions, and gaps
    pub dimscale: f64,
    /// Extension line offset from the definition points
    pub dimexo: f64,
    /// Extension line distance beyond the dimension line
    pub dimexe: f64,
    /// Gap between dimension line and text
    pub dimgap: f64,
    /// Text height
    pub dimtxt: f64,
    /// Arrowhead size
    pub dimasz: f64,
    /// Suppress the first half of the dimension line
    pub dimsd1: bool,
    /// Suppress the second half of the dimension line
    pub dimsd2: bool,
    /// Suppress the first extension line
    pub dimse1: bool,
    /// Suppress the second extension line
    pub dimse2: bool,
    /// Line type override for the first extension line
    pub dimltex1: Option<String>,
    /// Line type override for the second extension line
    pub dimltex2: Option<String>,
}

impl DimStyle {
    /// Create a new dimension style with the standard defaults
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
            dimscale: 1.0,
            dimexo: 0.625,
            dimexe: 1.25,
            dimgap: 0.625,
            dimtxt: 0.18,
            dimasz: 0.18,
            dimsd1: false,
            dimsd2: false,
            dimse1: false,
            dimse2: false,
            dimltex1: None,
            dimltex2: None,
        }
    }

    /// The "Standard" style every document carries
    pub fn standard() -> Self {
        DimStyle::new("Standard")
    }
}

impl CadObject for DimStyle {
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
        "DIMSTYLE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbDimStyleTableRecord"
    }
}

impl TableEntry for DimStyle {
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
