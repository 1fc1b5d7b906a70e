//! Layer table record

use crate::object::{CadObject, DocumentId};
use crate::tables::TableEntry;
use crate::types::{Color, Handle, LineWeight};

/// State flags of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFlags {
    /// Layer is frozen (not displayed, not regenerated)
    pub frozen: bool,
    /// Layer is locked against editing
    pub locked: bool,
    /// Layer is switched off (not displayed, still regenerated)
    pub off: bool,
}

/// A layer table record
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Layer name
    pub name: String,
    /// State flags
    pub flags: LayerFlags,
    /// Default color of entities on this layer
    pub color: Color,
    /// Default line type name
    pub line_type: String,
    /// Default line weight
    pub line_weight: LineWeight,
    /// Whether entities on this layer are plotted
    pub is_plottable: bool,
}

impl Layer {
    /// Name of the default layer every document carries
    pub const DEFAULT_NAME: &'static str = "0";

    /// Name of the definition-points layer dimension markers live on
    pub const DEFPOINTS_NAME: &'static str = "Defpoints";

    /// Create a new layer with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
            flags: LayerFlags::default(),
            color: Color::WHITE,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Standard,
            is_plottable: true,
        }
    }

    /// The standard layer "0"
    pub fn layer_0() -> Self {
        Layer::new(Self::DEFAULT_NAME)
    }

    /// The non-plotting "Defpoints" layer dimension definition points use
    pub fn defpoints() -> Self {
        let mut layer = Layer::new(Self::DEFPOINTS_NAME);
        layer.is_plottable = false;
        layer
    }

    /// Freeze the layer
    pub fn freeze(&mut self) {
        self.flags.frozen = true;
    }

    /// Thaw the layer
    pub fn thaw(&mut self) {
        self.flags.frozen = false;
    }

    /// Lock the layer against editing
    pub fn lock(&mut self) {
        self.flags.locked = true;
    }

    /// Unlock the layer
    pub fn unlock(&mut self) {
        self.flags.locked = false;
    }

    /// Switch the layer off
    pub fn turn_off(&mut self) {
        self.flags.off = true;
    }

    /// Switch the layer on
    pub fn turn_on(&mut self) {
        self.flags.off = false;
    }

    /// Check whether entities on this layer are displayed
    pub fn is_visible(&self) -> bool {
        !self.flags.frozen && !self.flags.off
    }
}

impl CadObject for Layer {
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
        "LAYER"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbLayerTableRecord"
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        self.name == Self::DEFAULT_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_0() {
        let layer = Layer::layer_0();
        assert_eq!(layer.name, "0");
        assert!(layer.is_standard());
        assert!(layer.is_plottable);
        assert_eq!(layer.color, Color::WHITE);
    }

    #[test]
    fn test_defpoints_not_plottable() {
        let layer = Layer::defpoints();
        assert_eq!(layer.name, "Defpoints");
        assert!(!layer.is_plottable);
        assert!(!layer.is_standard());
    }

    #[test]
    fn test_visibility() {
        let mut layer = Layer::new("Walls");
        assert!(layer.is_visible());

        layer.freeze();
        assert!(!layer.is_visible());
        layer.thaw();

        layer.turn_off();
        assert!(!layer.is_visible());
        layer.turn_on();
        assert!(layer.is_visible());
    }

    #[test]
    fn test_lock_unlock() {
        let mut layer = Layer::new("Walls");
        layer.lock();
        assert!(layer.flags.locked);
        layer.unlock();
        assert!(!layer.flags.locked);
    }
}
