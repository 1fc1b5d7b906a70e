//! Document and block builders shared across integration tests.
//!
//! The furniture blocks model the common case: a block with visible
//! geometry plus attribute definitions that inserts instantiate.

#![allow(dead_code)]

use cadgraph::entities::{
    AlignedDimension, AttributeDefinition, Circle, EntityType, Insert, Line,
};
use cadgraph::tables::BlockRecord;
use cadgraph::types::{Handle, Vector3};
use cadgraph::CadDocument;

/// A furniture block with geometry and two attribute definitions:
/// `PARTNO` (defaulting to "CH-100") and `OWNER` (empty default).
pub fn chair_block() -> BlockRecord {
    let mut block = BlockRecord::new("Chair");
    block
        .add_entity(EntityType::Line(Line::new(
            Vector3::ZERO,
            Vector3::new(0.5, 0.5, 0.0),
        )))
        .unwrap();
    block
        .add_entity(EntityType::Circle(Circle::new(
            Vector3::new(0.25, 0.25, 0.0),
            0.2,
        )))
        .unwrap();
    block
        .add_entity(EntityType::AttributeDefinition(
            AttributeDefinition::with_value("PARTNO", "CH-100"),
        ))
        .unwrap();
    block
        .add_entity(EntityType::AttributeDefinition(AttributeDefinition::new(
            "OWNER",
        )))
        .unwrap();
    block
}

/// A second block for re-pointing tests, with a single `DESKNO` definition.
pub fn desk_block() -> BlockRecord {
    let mut block = BlockRecord::new("Desk");
    block
        .add_entity(EntityType::Line(Line::new(
            Vector3::ZERO,
            Vector3::new(1.5, 0.75, 0.0),
        )))
        .unwrap();
    block
        .add_entity(EntityType::AttributeDefinition(
            AttributeDefinition::with_value("DESKNO", "D-1"),
        ))
        .unwrap();
    block
}

/// Document with the chair block installed and one insert in model space.
/// Returns the document and the insert's handle.
pub fn document_with_chair_insert() -> (CadDocument, Handle) {
    let mut doc = CadDocument::new();
    doc.add_block_record(chair_block()).unwrap();
    let record = doc.block_records.get("Chair").expect("chair block installed");
    let insert = Insert::new(record);
    let handle = doc.add_entity(EntityType::Insert(insert)).unwrap();
    (doc, handle)
}

/// Horizontal aligned dimension measuring (0,0,0) to (10,0,0), offset 5.
pub fn horizontal_dimension() -> AlignedDimension {
    AlignedDimension::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), 5.0)
}

/// Document with a horizontal dimension attached to model space.
/// Returns the document and the dimension's handle.
pub fn document_with_dimension() -> (CadDocument, Handle) {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity(EntityType::AlignedDimension(horizontal_dimension()))
        .unwrap();
    (doc, handle)
}
