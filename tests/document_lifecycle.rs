//! Attach/detach lifecycle and handle registry integration tests.
//!
//! Exercises single ownership across documents, handle stability over
//! detach/re-attach round trips, membership type guards, and registry
//! accounting for compound entities.

mod common;

use cadgraph::entities::{Circle, EntityType, Line, Point, Polyline3D, Vertex3D};
use cadgraph::error::CadError;
use cadgraph::tables::Layer;
use cadgraph::types::{Handle, Vector3};
use cadgraph::{CadDocument, CadObject, NotificationType};
use proptest::prelude::*;

use common::builders::chair_block;

#[test]
fn test_attach_sets_identity_and_registers() {
    let mut doc = CadDocument::new();
    let baseline = doc.object_count();
    let handle = doc
        .add_entity(EntityType::Point(Point::from_coords(1.0, 2.0, 3.0)))
        .unwrap();

    assert!(handle.is_valid());
    assert!(doc.is_registered(handle));
    assert_eq!(doc.object_count(), baseline + 1);

    let entity = doc.get_entity(handle).unwrap();
    assert_eq!(entity.as_entity().document(), Some(doc.id()));
    assert_eq!(
        entity.as_entity().owner(),
        doc.model_space().unwrap().handle()
    );
}

#[test]
fn test_detach_clears_membership_keeps_handle() {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity(EntityType::Circle(Circle::new(Vector3::ZERO, 4.0)))
        .unwrap();
    let baseline = doc.object_count();

    let removed = doc.remove_entity(handle).unwrap();
    assert_eq!(removed.as_entity().handle(), handle);
    assert_eq!(removed.as_entity().document(), None);
    assert_eq!(removed.as_entity().owner(), Handle::NULL);
    assert!(!doc.is_registered(handle));
    assert_eq!(doc.object_count(), baseline - 1);
    assert!(doc.get_entity(handle).is_none());
}

#[test]
fn test_round_trip_keeps_handle_silently() {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity(EntityType::Point(Point::from_coords(7.0, 8.0, 9.0)))
        .unwrap();

    let removed = doc.remove_entity(handle).unwrap();
    let again = doc.add_entity(removed).unwrap();

    assert_eq!(again, handle);
    assert!(doc.notifications.is_empty());
}

#[test]
fn test_attach_to_second_document_is_rejected() {
    let mut first = CadDocument::new();
    let handle = first
        .add_entity(EntityType::Line(Line::new(
            Vector3::ZERO,
            Vector3::new(5.0, 0.0, 0.0),
        )))
        .unwrap();
    let attached = first.get_entity(handle).unwrap().clone();

    let mut second = CadDocument::new();
    match second.add_entity(attached) {
        Err(CadError::AlreadyAttached(value)) => assert_eq!(value, handle.value()),
        other => panic!("expected AlreadyAttached, got {other:?}"),
    }
    assert_eq!(second.model_space().unwrap().entities.len(), 0);
    // the first document still owns the entity
    assert!(first.is_registered(handle));
}

#[test]
fn test_detached_entity_attaches_elsewhere() {
    let mut first = CadDocument::new();
    let handle = first
        .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
        .unwrap();
    let detached = first.remove_entity(handle).unwrap();

    let mut second = CadDocument::new();
    let in_second = second.add_entity(detached).unwrap();
    assert!(second.is_registered(in_second));
    let entity = second.get_entity(in_second).unwrap();
    assert_eq!(entity.as_entity().document(), Some(second.id()));
    assert!(!first.is_registered(handle));
}

#[test]
fn test_double_detach_reports_not_attached() {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
        .unwrap();
    doc.remove_entity(handle).unwrap();
    match doc.remove_entity(handle) {
        Err(CadError::NotAttached(value)) => assert_eq!(value, handle.value()),
        other => panic!("expected NotAttached, got {other:?}"),
    }
}

#[test]
fn test_duplicate_table_names_rejected_case_insensitive() {
    let mut doc = CadDocument::new();
    doc.add_layer(Layer::new("Walls")).unwrap();
    match doc.add_layer(Layer::new("WALLS")) {
        Err(CadError::DuplicateName(name)) => assert_eq!(name, "WALLS"),
        other => panic!("expected DuplicateName, got {other:?}"),
    }
    assert!(doc.layers.contains("walls"));
}

#[test]
fn test_wrong_member_type_leaves_document_untouched() {
    let mut doc = CadDocument::new();
    let baseline = doc.object_count();
    let vertex = Vertex3D::new(Vector3::ZERO);

    match doc.add_entity(EntityType::Vertex3D(vertex)) {
        Err(CadError::InvalidMemberType { found, .. }) => {
            assert_eq!(found, "AcDb3dPolylineVertex");
        }
        other => panic!("expected InvalidMemberType, got {other:?}"),
    }
    assert_eq!(doc.object_count(), baseline);
    assert_eq!(doc.model_space().unwrap().entities.len(), 0);
}

#[test]
fn test_compound_entity_registers_subtree() {
    let mut doc = CadDocument::new();
    let baseline = doc.object_count();

    let polyline = Polyline3D::from_points(&[
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
    ]);
    let handle = doc.add_entity(EntityType::Polyline3D(polyline)).unwrap();

    // polyline + three vertices + seqend
    assert_eq!(doc.object_count(), baseline + 5);
    match doc.get_entity(handle) {
        Some(EntityType::Polyline3D(polyline)) => {
            for vertex in polyline.vertices.iter() {
                assert_eq!(vertex.as_entity().owner(), handle);
                assert!(doc.is_registered(vertex.as_entity().handle()));
            }
            assert_eq!(polyline.vertices.seqend().common.owner, handle);
        }
        other => panic!("expected a polyline, got {other:?}"),
    }

    let removed = doc.remove_entity(handle).unwrap();
    assert_eq!(doc.object_count(), baseline);
    match removed {
        EntityType::Polyline3D(polyline) => {
            assert_eq!(polyline.vertices.len(), 3);
            for vertex in polyline.vertices.iter() {
                assert_eq!(vertex.as_entity().document(), None);
            }
        }
        other => panic!("expected a polyline, got {other:?}"),
    }
}

#[test]
fn test_collision_reassigns_handle_and_warns() {
    let mut doc = CadDocument::new();
    let first = doc
        .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
        .unwrap();

    let mut copy = Point::from_coords(9.0, 9.0, 9.0);
    copy.set_handle(first);
    let second = doc.add_entity(EntityType::Point(copy)).unwrap();

    assert_ne!(second, first);
    assert!(doc.is_registered(first));
    assert!(doc.is_registered(second));
    assert!(doc.notifications.has_type(NotificationType::Warning));
}

#[test]
fn test_free_handle_is_kept_on_attach() {
    let mut doc = CadDocument::new();
    let mut point = Point::from_coords(0.0, 0.0, 0.0);
    point.set_handle(Handle::new(0x1000));

    let handle = doc.add_entity(EntityType::Point(point)).unwrap();
    assert_eq!(handle, Handle::new(0x1000));
    assert!(doc.notifications.is_empty());
    // the allocator moves past the kept handle
    assert!(doc.next_handle() > 0x1000);
}

#[test]
fn test_take_put_preserves_position() {
    let mut doc = CadDocument::new();
    let first = doc
        .add_entity(EntityType::Point(Point::from_coords(1.0, 0.0, 0.0)))
        .unwrap();
    let middle = doc
        .add_entity(EntityType::Point(Point::from_coords(2.0, 0.0, 0.0)))
        .unwrap();
    let last = doc
        .add_entity(EntityType::Point(Point::from_coords(3.0, 0.0, 0.0)))
        .unwrap();

    let (placement, entity) = doc.take_entity(middle).unwrap();
    assert_eq!(placement.index(), 1);
    assert!(!doc.is_registered(middle));

    let back = doc.put_entity(placement, entity).unwrap();
    assert_eq!(back, middle);

    let model = doc.model_space().unwrap();
    assert_eq!(model.entities.position_of(first), Some(0));
    assert_eq!(model.entities.position_of(middle), Some(1));
    assert_eq!(model.entities.position_of(last), Some(2));
}

#[test]
fn test_get_entity_mut_edits_geometry() {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity(EntityType::Circle(Circle::new(Vector3::ZERO, 1.0)))
        .unwrap();

    match doc.get_entity_mut(handle) {
        Some(EntityType::Circle(circle)) => circle.radius = 2.5,
        other => panic!("expected a circle, got {other:?}"),
    }
    match doc.get_entity(handle) {
        Some(EntityType::Circle(circle)) => assert_eq!(circle.radius, 2.5),
        other => panic!("expected a circle, got {other:?}"),
    }
}

#[test]
fn test_removed_block_record_unregisters_entities() {
    let mut doc = CadDocument::new();
    let baseline = doc.object_count();

    doc.add_block_record(chair_block()).unwrap();
    let added = doc.object_count() - baseline;
    // record + line + circle + two attribute definitions
    assert_eq!(added, 5);

    let record = doc.remove_block_record("Chair").unwrap();
    assert_eq!(doc.object_count(), baseline);
    assert_eq!(record.document(), None);
    assert_eq!(record.entities.len(), 4);
    for entity in record.entities.iter() {
        assert_eq!(entity.as_entity().document(), None);
    }
}

#[test]
fn test_standard_records_cannot_be_removed() {
    let mut doc = CadDocument::new();
    assert!(doc.remove_block_record("*Model_Space").is_err());
    assert!(doc.remove_block_record("*Paper_Space").is_err());
    assert!(doc.model_space().is_some());
    assert!(doc.paper_space().is_some());
}

#[test]
fn test_entities_iterates_model_space_in_order() {
    let mut doc = CadDocument::new();
    doc.add_entity(EntityType::Point(Point::from_coords(1.0, 0.0, 0.0)))
        .unwrap();
    doc.add_entity(EntityType::Point(Point::from_coords(2.0, 0.0, 0.0)))
        .unwrap();

    let xs: Vec<f64> = doc
        .entities()
        .map(|entity| match entity {
            EntityType::Point(point) => point.location.x,
            other => panic!("expected a point, got {other:?}"),
        })
        .collect();
    assert_eq!(xs, vec![1.0, 2.0]);
}

proptest! {
    /// Random interleavings of attach and detach keep the registry exact:
    /// the live count matches, every live handle resolves, and no handle
    /// is ever assigned twice.
    #[test]
    fn test_registry_stays_consistent(ops in proptest::collection::vec(0u8..3u8, 1..40)) {
        let mut doc = CadDocument::new();
        let baseline = doc.object_count();
        let mut live: Vec<Handle> = Vec::new();
        let mut seen: Vec<Handle> = Vec::new();

        for op in ops {
            match op {
                0 => {
                    let handle = doc
                        .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
                        .unwrap();
                    live.push(handle);
                    seen.push(handle);
                }
                1 => {
                    let handle = doc
                        .add_entity(EntityType::Line(Line::new(
                            Vector3::ZERO,
                            Vector3::new(1.0, 0.0, 0.0),
                        )))
                        .unwrap();
                    live.push(handle);
                    seen.push(handle);
                }
                _ => {
                    if let Some(handle) = live.pop() {
                        let removed = doc.remove_entity(handle).unwrap();
                        prop_assert_eq!(removed.as_entity().handle(), handle);
                        prop_assert!(!doc.is_registered(handle));
                    }
                }
            }
        }

        prop_assert_eq!(doc.object_count(), baseline + live.len());
        for handle in &live {
            prop_assert!(doc.is_registered(*handle));
        }
        let total = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
    }
}
