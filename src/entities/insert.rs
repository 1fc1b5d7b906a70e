//! Insert entity (block reference)

use super::{AttributeDefinition, AttributeEntity, Entity, EntityCommon, EntityType};
use crate::collection::{MemberFilter, SeqendCollection};
use crate::error::{CadError, Result};
use crate::object::{CadObject, DocumentId};
use crate::tables::{BlockRecord, RecordRef};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// Insert entity placing an instance of a block definition
///
/// The referenced block is held by name while the insert belongs to a
/// document and as a private record clone while it is detached. Attribute
/// instances mirror the block's attribute definitions one-to-one by tag.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Referenced block definition
    pub block: RecordRef<BlockRecord>,
    /// Insertion point
    pub insert_point: Vector3,
    /// Per-axis scale factors
    pub scale: Vector3,
    /// Rotation angle in radians
    pub rotation: f64,
    /// Attribute instances, one per definition tag
    pub attributes: SeqendCollection,
}

impl Insert {
    const ATTRIBUTE_FILTER: MemberFilter = MemberFilter::only(
        AttributeEntity::SUBCLASS_MARKER,
        &[AttributeEntity::SUBCLASS_MARKER],
    );

    /// Create an insert referencing a private clone of `block`
    ///
    /// Attribute instances are created immediately from the block's
    /// definitions.
    pub fn new(block: &BlockRecord) -> Self {
        let mut insert = Insert {
            common: EntityCommon::new(),
            block: RecordRef::Owned(Box::new(block.detached_clone())),
            insert_point: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            attributes: SeqendCollection::new(Self::ATTRIBUTE_FILTER),
        };
        let definitions: Vec<AttributeDefinition> =
            block.attribute_definitions().cloned().collect();
        insert.synchronize_attributes(&definitions);
        insert
    }

    /// Create an insert referencing a block by name only
    ///
    /// The name must resolve against the block table of the document the
    /// insert is later added to. No attribute instances are created until
    /// the reference resolves.
    pub fn with_block_name(name: impl Into<String>) -> Self {
        Insert {
            common: EntityCommon::new(),
            block: RecordRef::Named(name.into()),
            insert_point: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            attributes: SeqendCollection::new(Self::ATTRIBUTE_FILTER),
        }
    }

    /// Builder: set the insertion point
    pub fn at(mut self, insert_point: Vector3) -> Self {
        self.insert_point = insert_point;
        self
    }

    /// Builder: set the scale factors
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Builder: set the rotation angle
    pub fn with_rotation(mut self, angle: f64) -> Self {
        self.rotation = angle;
        self
    }

    /// The referenced block's name
    pub fn block_name(&self) -> &str {
        self.block.name()
    }

    /// First attribute instance bearing `tag`
    pub fn attribute(&self, tag: &str) -> Option<&AttributeEntity> {
        self.attributes.iter().find_map(|e| match e {
            EntityType::AttributeEntity(att) if att.tag == tag => Some(att),
            _ => None,
        })
    }

    /// Mutable access to the first attribute instance bearing `tag`
    pub fn attribute_mut(&mut self, tag: &str) -> Option<&mut AttributeEntity> {
        self.attributes.iter_mut().find_map(|e| match e {
            EntityType::AttributeEntity(att) if att.tag == tag => Some(att),
            _ => None,
        })
    }

    /// Set the value of the attribute bearing `tag`
    ///
    /// Returns `false` if no instance carries the tag.
    pub fn set_attribute_value(&mut self, tag: &str, value: impl Into<String>) -> bool {
        match self.attribute_mut(tag) {
            Some(att) => {
                att.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Rebuild the attribute instances from the private block clone
    ///
    /// Fails when the block is held by name; resolving a name needs the
    /// owning document, which runs this through its own update operation.
    pub fn update_attributes(&mut self) -> Result<()> {
        let definitions: Vec<AttributeDefinition> = match &self.block {
            RecordRef::Owned(record) => record.attribute_definitions().cloned().collect(),
            RecordRef::Named(name) => {
                return Err(CadError::InvalidArgument(format!(
                    "block '{}' cannot be resolved without a document",
                    name
                )))
            }
        };
        self.synchronize_attributes(&definitions);
        Ok(())
    }

    /// Reconcile attribute instances against a definition list
    ///
    /// Instances whose tag no longer matches any definition are removed,
    /// then one instance is created for each definition tag that has none.
    /// Duplicate tags on either side are tolerated: membership is decided
    /// by first match, so surviving duplicates are kept as they are.
    pub(crate) fn synchronize_attributes(&mut self, definitions: &[AttributeDefinition]) {
        let mut index = 0;
        while index < self.attributes.len() {
            let keep = match self.attributes.get(index) {
                Some(EntityType::AttributeEntity(att)) => {
                    definitions.iter().any(|d| d.tag == att.tag)
                }
                _ => true,
            };
            if keep {
                index += 1;
            } else {
                self.attributes.remove(index);
            }
        }

        for definition in definitions {
            if self.attribute(&definition.tag).is_none() {
                let _ = self.attributes.add(EntityType::AttributeEntity(
                    AttributeEntity::from_definition(definition),
                ));
            }
        }
    }
}

impl CadObject for Insert {
    fn handle(&self) -> Handle {
        self.common.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common.handle = handle;
    }

    fn owner(&self) -> Handle {
        self.common.owner
    }

    fn set_owner(&mut self, owner: Handle) {
        self.common.owner = owner;
    }

    fn document(&self) -> Option<DocumentId> {
        self.common.document
    }

    fn set_document(&mut self, document: Option<DocumentId>) {
        self.common.document = document;
    }

    fn object_name(&self) -> &'static str {
        "INSERT"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbBlockReference"
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    /// Referenced block's extent scaled and translated to the insertion
    ///
    /// Rotation is not applied. A by-name reference has no extent here;
    /// resolving it takes the owning document's block table.
    fn bounding_box(&self) -> Option<BoundingBox3D> {
        let record = self.block.owned()?;
        let child = record.bounding_box()?;
        let min = child.min.component_mul(&self.scale) + self.insert_point;
        let max = child.max.component_mul(&self.scale) + self.insert_point;
        Some(BoundingBox3D::new(min, max))
    }

    fn translate(&mut self, offset: Vector3) {
        self.insert_point = self.insert_point + offset;
        for attribute in self.attributes.iter_mut() {
            attribute.as_entity_mut().translate(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;

    fn chair_block() -> BlockRecord {
        let mut block = BlockRecord::new("Chair");
        block
            .add_entity(EntityType::Line(Line::new(Vector3::ZERO, Vector3::UNIT_X)))
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

    #[test]
    fn test_new_creates_attribute_instances() {
        let insert = Insert::new(&chair_block());
        assert_eq!(insert.block_name(), "Chair");
        assert_eq!(insert.attributes.len(), 2);
        assert_eq!(insert.attribute("PARTNO").unwrap().value, "CH-100");
        assert_eq!(insert.attribute("OWNER").unwrap().value, "");
    }

    #[test]
    fn test_with_block_name_starts_empty() {
        let insert = Insert::with_block_name("Chair");
        assert!(insert.block.is_named());
        assert!(insert.attributes.is_empty());
    }

    #[test]
    fn test_update_attributes_requires_private_clone() {
        let mut insert = Insert::with_block_name("Chair");
        let err = insert.update_attributes().unwrap_err();
        assert!(matches!(err, CadError::InvalidArgument(_)));
    }

    #[test]
    fn test_update_attributes_reconciles() {
        let mut block = chair_block();
        let mut insert = Insert::new(&block);
        insert.set_attribute_value("PARTNO", "CH-200");

        // Drop OWNER from the definitions, add COLOR
        block.entities.remove(2);
        block
            .add_entity(EntityType::AttributeDefinition(AttributeDefinition::new(
                "COLOR",
            )))
            .unwrap();
        insert.block = RecordRef::Owned(Box::new(block.detached_clone()));
        insert.update_attributes().unwrap();

        assert_eq!(insert.attributes.len(), 2);
        assert_eq!(insert.attribute("PARTNO").unwrap().value, "CH-200");
        assert!(insert.attribute("OWNER").is_none());
        assert_eq!(insert.attribute("COLOR").unwrap().value, "");
    }

    #[test]
    fn test_duplicate_definition_tags_produce_one_instance() {
        let mut block = BlockRecord::new("Tagged");
        block
            .add_entity(EntityType::AttributeDefinition(
                AttributeDefinition::with_value("ID", "first"),
            ))
            .unwrap();
        block
            .add_entity(EntityType::AttributeDefinition(
                AttributeDefinition::with_value("ID", "second"),
            ))
            .unwrap();

        let insert = Insert::new(&block);
        assert_eq!(insert.attributes.len(), 1);
        assert_eq!(insert.attribute("ID").unwrap().value, "first");
    }

    #[test]
    fn test_bounding_box_scales_and_translates() {
        let mut block = BlockRecord::new("Unit");
        block
            .add_entity(EntityType::Line(Line::new(
                Vector3::ZERO,
                Vector3::new(1.0, 1.0, 1.0),
            )))
            .unwrap();

        let insert = Insert::new(&block)
            .at(Vector3::new(100.0, 0.0, 0.0))
            .with_scale(2.0, 1.0, 1.0);
        let bbox = insert.bounding_box().unwrap();
        assert_eq!(bbox.min, Vector3::new(100.0, 0.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(102.0, 1.0, 1.0));
    }

    #[test]
    fn test_named_reference_has_no_bounding_box() {
        let insert = Insert::with_block_name("Chair");
        assert!(insert.bounding_box().is_none());
    }

    #[test]
    fn test_translate_moves_attributes() {
        let mut insert = Insert::new(&chair_block());
        insert.translate(Vector3::new(5.0, 0.0, 0.0));

        assert_eq!(insert.insert_point, Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(
            insert.attribute("PARTNO").unwrap().position,
            Vector3::new(5.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_explode_is_unsupported() {
        let insert = Insert::new(&chair_block());
        assert!(matches!(
            insert.explode(),
            Err(CadError::Unsupported("explode"))
        ));
    }
}
