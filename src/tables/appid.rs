//! Application id table record

use crate::object::{CadObject, DocumentId};
use crate::tables::TableEntry;
use crate::types::Handle;

/// An application id table record
///
/// Registers an application name extended data can be attached under.
#[derive(Debug, Clone)]
pub struct AppId {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Application name
    pub name: String,
}

impl AppId {
    /// Create a new application id record
    pub fn new(name: impl Into<String>) -> Self {
        AppId {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
        }
    }

    /// The "ACAD" record every document carries
    pub fn acad() -> Self {
        AppId::new("ACAD")
    }
}

impl CadObject for AppId {
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
        "APPID"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbRegAppTableRecord"
    }
}

impl TableEntry for AppId {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        self.name.eq_ignore_ascii_case("ACAD")
    }
}
