//! Line type table record

use crate::object::{CadObject, DocumentId};
use crate::tables::TableEntry;
use crate::types::Handle;

/// One dash/dot/space element of a line type pattern
///
/// Positive lengths are dashes, negative lengths are spaces, zero is a dot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineTypeElement {
    /// Element length in drawing units
    pub length: f64,
}

impl LineTypeElement {
    /// A dash of the given length
    pub fn dash(length: f64) -> Self {
        LineTypeElement {
            length: length.abs(),
        }
    }

    /// A space of the given length
    pub fn space(length: f64) -> Self {
        LineTypeElement {
            length: -length.abs(),
        }
    }

    /// A dot
    pub fn dot() -> Self {
        LineTypeElement { length: 0.0 }
    }

    /// Check if this element draws a dash
    pub fn is_dash(&self) -> bool {
        self.length > 0.0
    }

    /// Check if this element is a pen-up gap
    pub fn is_space(&self) -> bool {
        self.length < 0.0
    }

    /// Check if this element is a dot
    pub fn is_dot(&self) -> bool {
        self.length == 0.0
    }
}

/// A line type table record
#[derive(Debug, Clone)]
pub struct LineType {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Line type name
    pub name: String,
    /// Descriptive text shown in editors
    pub description: String,
    /// Dash/dot/space pattern, empty for continuous lines
    pub elements: Vec<LineTypeElement>,
}

impl LineType {
    /// Create a new line type with an empty pattern
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
        }
    }

    /// The standard "Continuous" line type
    pub fn continuous() -> Self {
        let mut lt = LineType::new("Continuous");
        lt.description = "Solid line".to_string();
        lt
    }

    /// The "ByLayer" placeholder record
    pub fn by_layer() -> Self {
        LineType::new("ByLayer")
    }

    /// The "ByBlock" placeholder record
    pub fn by_block() -> Self {
        LineType::new("ByBlock")
    }

    /// Total pattern length (sum of absolute element lengths)
    pub fn pattern_length(&self) -> f64 {
        self.elements.iter().map(|e| e.length.abs()).sum()
    }
}

impl CadObject for LineType {
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
        "LTYPE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbLinetypeTableRecord"
    }
}

impl TableEntry for LineType {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        matches!(
            self.name.to_uppercase().as_str(),
            "CONTINUOUS" | "BYLAYER" | "BYBLOCK"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements() {
        assert!(LineTypeElement::dash(0.5).is_dash());
        assert!(LineTypeElement::space(0.25).is_space());
        assert!(LineTypeElement::dot().is_dot());
    }

    #[test]
    fn test_pattern_length() {
        let mut lt = LineType::new("Dashed");
        lt.elements.push(LineTypeElement::dash(0.5));
        lt.elements.push(LineTypeElement::space(0.25));
        assert_eq!(lt.pattern_length(), 0.75);
    }

    #[test]
    fn test_standard_records() {
        assert!(LineType::continuous().is_standard());
        assert!(LineType::by_layer().is_standard());
        assert!(LineType::by_block().is_standard());
        assert!(!LineType::new("Dashed").is_standard());
    }
}
