//! Block record table entry

use super::TableEntry;
use crate::collection::{CadObjectCollection, MemberFilter};
use crate::entities::{self, AttributeDefinition, EntityType};
use crate::error::Result;
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// Block record flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockFlags {
    /// Block is anonymous
    pub anonymous: bool,
    /// Block has attribute definitions
    pub has_attributes: bool,
}

/// A block record table entry
///
/// The record owns the block's geometry directly; referencing entities point
/// back at it by name.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    pub(crate) handle: Handle,
    pub(crate) owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Block name
    pub name: String,
    /// Block flags
    pub flags: BlockFlags,
    /// Base point for block insertion
    pub base_point: Vector3,
    /// Entities owned by this block
    pub entities: CadObjectCollection,
}

impl BlockRecord {
    /// Name of the model space block
    pub const MODEL_SPACE_NAME: &'static str = "*Model_Space";
    /// Name of the paper space block
    pub const PAPER_SPACE_NAME: &'static str = "*Paper_Space";

    /// Entity subtypes a block may directly contain
    ///
    /// Structural records (vertices, faces, seqends, attribute instances)
    /// only live inside their parent entity, never at block level.
    pub const MEMBER_FILTER: MemberFilter = MemberFilter::only(
        "a drawable entity",
        &[
            "AcDbPoint",
            "AcDbLine",
            "AcDbCircle",
            "AcDbText",
            "AcDbBlockReference",
            "AcDbAttributeDefinition",
            "AcDbAlignedDimension",
            "AcDb3dPolyline",
            "AcDbPolyFaceMesh",
        ],
    );

    /// Create a new block record
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            name: name.into(),
            flags: BlockFlags::default(),
            base_point: Vector3::ZERO,
            entities: CadObjectCollection::new(Self::MEMBER_FILTER),
        }
    }

    /// Create the model space block record
    pub fn model_space() -> Self {
        BlockRecord::new(Self::MODEL_SPACE_NAME)
    }

    /// Create the paper space block record
    pub fn paper_space() -> Self {
        BlockRecord::new(Self::PAPER_SPACE_NAME)
    }

    /// Check if this is the model space block
    pub fn is_model_space(&self) -> bool {
        self.name == Self::MODEL_SPACE_NAME
    }

    /// Check if this is a paper space block
    pub fn is_paper_space(&self) -> bool {
        self.name.starts_with(Self::PAPER_SPACE_NAME)
    }

    /// Check if this block is anonymous
    pub fn is_anonymous(&self) -> bool {
        self.flags.anonymous || self.name.starts_with('*')
    }

    /// Append an entity to the block's geometry
    pub fn add_entity(&mut self, entity: EntityType) -> Result<()> {
        self.entities.add(entity)
    }

    /// The block's attribute definitions, in entity order
    pub fn attribute_definitions(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.entities.iter().filter_map(|e| match e {
            EntityType::AttributeDefinition(def) => Some(def),
            _ => None,
        })
    }

    /// Check if the block carries any attribute definitions
    pub fn has_attribute_definitions(&self) -> bool {
        self.attribute_definitions().next().is_some()
    }

    /// Union of the member entities' bounding boxes
    ///
    /// Members without a defined extent are skipped; `None` when no member
    /// contributes one.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let mut result: Option<BoundingBox3D> = None;
        for entity in &self.entities {
            result = BoundingBox3D::merge_optional(result, entity.as_entity().bounding_box());
        }
        result
    }

    /// Clone the record and everything in it, stripping document membership
    ///
    /// Handles and internal owner links are kept so a later attach can reuse
    /// them where they are still free.
    pub fn detached_clone(&self) -> BlockRecord {
        let mut record = self.clone();
        record.document = None;
        record.owner = Handle::NULL;
        record.clear_documents();
        record
    }

    /// Strip document membership from every entity in the block
    pub(crate) fn clear_documents(&mut self) {
        for entity in self.entities.iter_mut() {
            entities::clear_documents(entity);
        }
    }
}

impl CadObject for BlockRecord {
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
        "BLOCK_RECORD"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbBlockTableRecord"
    }
}

impl TableEntry for BlockRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        self.is_model_space() || self.is_paper_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line, Point, Vertex3D};
    use crate::error::CadError;

    #[test]
    fn test_block_record_creation() {
        let block = BlockRecord::new("Chair");
        assert_eq!(block.name, "Chair");
        assert!(!block.is_anonymous());
        assert!(block.entities.is_empty());
    }

    #[test]
    fn test_model_space() {
        let block = BlockRecord::model_space();
        assert!(block.is_model_space());
        assert!(block.is_standard());
        assert!(!block.is_paper_space());
        assert!(block.is_anonymous());
    }

    #[test]
    fn test_paper_space() {
        let block = BlockRecord::paper_space();
        assert!(block.is_paper_space());
        assert!(block.is_standard());
        assert!(!block.is_model_space());
    }

    #[test]
    fn test_member_filter_rejects_structural_records() {
        let mut block = BlockRecord::new("Chair");
        block
            .add_entity(EntityType::Line(Line::new(Vector3::ZERO, Vector3::UNIT_X)))
            .unwrap();

        let err = block
            .add_entity(EntityType::Vertex3D(Vertex3D::new(Vector3::ZERO)))
            .unwrap_err();
        assert!(matches!(err, CadError::InvalidMemberType { .. }));
        assert_eq!(block.entities.len(), 1);
    }

    #[test]
    fn test_attribute_definitions() {
        let mut block = BlockRecord::new("Chair");
        block
            .add_entity(EntityType::Circle(Circle::new(Vector3::ZERO, 1.0)))
            .unwrap();
        block
            .add_entity(EntityType::AttributeDefinition(AttributeDefinition::new(
                "PARTNO",
            )))
            .unwrap();
        block
            .add_entity(EntityType::AttributeDefinition(AttributeDefinition::new(
                "OWNER",
            )))
            .unwrap();

        let tags: Vec<&str> = block.attribute_definitions().map(|d| d.tag.as_str()).collect();
        assert_eq!(tags, vec!["PARTNO", "OWNER"]);
        assert!(block.has_attribute_definitions());
    }

    #[test]
    fn test_bounding_box_union() {
        let mut block = BlockRecord::new("Chair");
        block
            .add_entity(EntityType::Point(Point::new(Vector3::new(-1.0, 0.0, 0.0))))
            .unwrap();
        block
            .add_entity(EntityType::Point(Point::new(Vector3::new(3.0, 2.0, 0.0))))
            .unwrap();

        let bbox = block.bounding_box().unwrap();
        assert_eq!(bbox.min, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_empty_block_has_no_bounding_box() {
        let block = BlockRecord::new("Empty");
        assert!(block.bounding_box().is_none());
    }

    #[test]
    fn test_detached_clone_strips_documents() {
        let mut block = BlockRecord::new("Chair");
        block.set_document(Some(DocumentId::next()));
        let mut point = Point::new(Vector3::ZERO);
        point.common.document = Some(DocumentId::next());
        block.add_entity(EntityType::Point(point)).unwrap();

        let clone = block.detached_clone();
        assert!(clone.document().is_none());
        assert!(clone
            .entities
            .iter()
            .all(|e| e.as_entity().document().is_none()));
    }
}
