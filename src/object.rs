//! Object identity shared by every node of the document graph
//!
//! Every entity, table record, and helper object carries a handle, a weak
//! owner back-reference, and a weak document back-reference. Back-references
//! are plain identifiers, never owning pointers, so a detached object can
//! outlive the document it came from.

use crate::types::Handle;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a document instance
///
/// Membership checks compare ids instead of aliasing document references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Mint a fresh id. Ids are never reused within a process.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        DocumentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Common identity and codec metadata of every graph node
///
/// `set_handle`, `set_owner`, and `set_document` are maintained by the
/// owning document during attach/detach. Calling them directly on an
/// attached object desynchronizes the document's handle registry.
pub trait CadObject {
    /// The object's handle. Null while never attached.
    fn handle(&self) -> Handle;

    /// Overwrite the handle.
    fn set_handle(&mut self, handle: Handle);

    /// Handle of the object owning this one. Null for top-level objects.
    fn owner(&self) -> Handle;

    /// Overwrite the owner back-reference.
    fn set_owner(&mut self, owner: Handle);

    /// Id of the owning document, if attached.
    fn document(&self) -> Option<DocumentId>;

    /// Overwrite the document back-reference.
    fn set_document(&mut self, document: Option<DocumentId>);

    /// Format name token (e.g. `"INSERT"`, `"DIMENSION"`)
    fn object_name(&self) -> &'static str;

    /// Format subclass discriminator (e.g. `"AcDbBlockReference"`)
    fn subclass_marker(&self) -> &'static str;

    /// Check whether the object is attached to the given document
    fn is_attached_to(&self, id: DocumentId) -> bool {
        self.document() == Some(id)
    }
}
