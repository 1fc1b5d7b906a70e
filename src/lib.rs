//! # cadgraph
//!
//! An in-memory document model for CAD drawings, inspired by
//! [ACadSharp](https://github.com/DomCR/ACadSharp).
//!
//! A [`CadDocument`] owns named tables (layers, line types, text and
//! dimension styles, application ids, block records) and every entity lives
//! in the entity list of a block record, with model space as the default
//! container. Objects carry weak back-references (a handle and a document
//! id) instead of owning pointers, so entities can be detached, carried
//! around as plain values, and attached to another document.
//!
//! ## Features
//!
//! - Document object graph with attach/detach lifecycle and handle registry
//! - Typed entity collections that reject members of the wrong subtype
//! - Block references (inserts) with attribute synchronization
//! - Aligned dimensions that regenerate their support geometry from the
//!   resolved dimension style
//! - Composite bounding boxes across nested block references
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cadgraph::{CadDocument, EntityType, Line, Vector3};
//!
//! let mut doc = CadDocument::new();
//!
//! // Add a line to model space
//! let handle = doc.add_entity(EntityType::Line(Line::new(
//!     Vector3::ZERO,
//!     Vector3::new(10.0, 5.0, 0.0),
//! )))?;
//!
//! // Detached entities keep their handle and can be re-attached
//! let line = doc.remove_entity(handle)?;
//! doc.add_entity(line)?;
//! # Ok::<(), cadgraph::CadError>(())
//! ```
//!
//! ## Architecture
//!
//! The library uses a trait-based design:
//!
//! - `CadObject` - identity shared by every node of the graph
//! - `Entity` - trait for graphical entities
//! - `TableEntry` - trait for named table records
//! - `CadDocument` - central document structure

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod collection;
pub mod entities;
pub mod error;
pub mod notification;
pub mod object;
pub mod types;
pub mod tables;
pub mod document;

// Re-export commonly used types
pub use error::{CadError, Result};
pub use types::{BoundingBox3D, Color, Handle, LineWeight, Transparency, Vector2, Vector3};

// Re-export graph plumbing
pub use collection::{CadObjectCollection, MemberFilter, SeqendCollection};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use object::{CadObject, DocumentId};

// Re-export entity types
pub use entities::{
    AlignedDimension, AttributeDefinition, AttributeEntity, Circle, Entity, EntityType, Insert,
    Line, Point, PolyfaceFace, PolyfaceMesh, PolyfaceVertex, Polyline3D, Seqend, Text, Vertex3D,
};

// Re-export table types
pub use tables::{
    AppId, BlockRecord, DimStyle, Layer, LineType, RecordRef, Table, TableEntry, TextStyle,
};

// Re-export document
pub use document::{CadDocument, EntityPlacement, ObjectRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_cad_document_creation() {
        let doc = CadDocument::new();
        assert!(doc.layers.contains(Layer::DEFAULT_NAME));
        assert!(doc.model_space().is_some());

        let doc2 = CadDocument::default();
        assert_ne!(doc.id(), doc2.id());
    }
}
