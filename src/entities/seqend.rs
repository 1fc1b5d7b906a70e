//! Seqend entity: end-of-sequence terminator for vertex and attribute streams

use super::{Entity, EntityCommon};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// Terminator entity closing a vertex or attribute sequence.
///
/// Seqend has no geometry. It only carries the common entity fields; the
/// legacy format requires it to exist, with its own handle, at the end of
/// every attached vertex/attribute stream.
#[derive(Debug, Clone)]
pub struct Seqend {
    /// Common entity data
    pub common: EntityCommon,
}

impl Seqend {
    /// Create a new terminator
    pub fn new() -> Self {
        Seqend {
            common: EntityCommon::new(),
        }
    }
}

impl Default for Seqend {
    fn default() -> Self {
        Self::new()
    }
}

impl CadObject for Seqend {
    fn handle(&self) -> Handle { self.common.handle }
    fn set_handle(&mut self, handle: Handle) { self.common.handle = handle; }
    fn owner(&self) -> Handle { self.common.owner }
    fn set_owner(&mut self, owner: Handle) { self.common.owner = owner; }
    fn document(&self) -> Option<DocumentId> { self.common.document }
    fn set_document(&mut self, document: Option<DocumentId>) { self.common.document = document; }
    fn object_name(&self) -> &'static str { "SEQEND" }
    fn subclass_marker(&self) -> &'static str { "AcDbEntity" }
}

impl Entity for Seqend {
    fn common(&self) -> &EntityCommon { &self.common }
    fn common_mut(&mut self) -> &mut EntityCommon { &mut self.common }
    fn bounding_box(&self) -> Option<BoundingBox3D> { None }
    fn translate(&mut self, _offset: Vector3) {}
}
