//! CAD entity types and traits

use crate::error::{CadError, Result};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Color, Handle, LineWeight, Transparency, Vector3};

pub mod attribute_definition;
pub mod attribute_entity;
pub mod circle;
pub mod dimension;
pub mod insert;
pub mod line;
pub mod point;
pub mod polyface_mesh;
pub mod polyline3d;
pub mod seqend;
pub mod text;

pub use attribute_definition::{
    AttributeDefinition, AttributeFlags, HorizontalAlignment, VerticalAlignment,
};
pub use attribute_entity::AttributeEntity;
pub use circle::Circle;
pub use dimension::AlignedDimension;
pub use insert::Insert;
pub use line::Line;
pub use point::Point;
pub use polyface_mesh::{PolyfaceFace, PolyfaceMesh, PolyfaceVertex};
pub use polyline3d::{Polyline3D, PolylineFlags, Vertex3D, VertexFlags};
pub use seqend::Seqend;
pub use text::Text;

/// Base trait for all CAD entities
///
/// Style properties resolve through the shared [`EntityCommon`] block;
/// geometry and capabilities are per subtype.
pub trait Entity: CadObject {
    /// The shared style/identity block
    fn common(&self) -> &EntityCommon;

    /// Mutable access to the shared style/identity block
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }

    /// Set the entity's layer name
    fn set_layer(&mut self, layer: String) {
        self.common_mut().layer = layer;
    }

    /// Get the entity's color
    fn color(&self) -> Color {
        self.common().color
    }

    /// Set the entity's color
    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    /// Get the entity's line type name
    fn line_type(&self) -> &str {
        &self.common().line_type
    }

    /// Set the entity's line type name
    fn set_line_type(&mut self, line_type: String) {
        self.common_mut().line_type = line_type;
    }

    /// Get the entity's line weight
    fn line_weight(&self) -> LineWeight {
        self.common().line_weight
    }

    /// Set the entity's line weight
    fn set_line_weight(&mut self, weight: LineWeight) {
        self.common_mut().line_weight = weight;
    }

    /// Get the entity's transparency
    fn transparency(&self) -> Transparency {
        self.common().transparency
    }

    /// Set the entity's transparency
    fn set_transparency(&mut self, transparency: Transparency) {
        self.common_mut().transparency = transparency;
    }

    /// Check if the entity is invisible
    fn is_invisible(&self) -> bool {
        self.common().invisible
    }

    /// Set the entity's visibility
    fn set_invisible(&mut self, invisible: bool) {
        self.common_mut().invisible = invisible;
    }

    /// Axis-aligned bounding box, `None` for entities without extent
    fn bounding_box(&self) -> Option<BoundingBox3D>;

    /// Move the entity by a translation vector
    fn translate(&mut self, offset: Vector3);

    /// Decompose the entity into primitive entities
    ///
    /// Subtypes without a decomposition fail with
    /// [`CadError::Unsupported`]; the caller treats that as a per-entity
    /// limitation, not a document failure.
    fn explode(&self) -> Result<Vec<EntityType>> {
        let _ = self;
        Err(CadError::Unsupported("explode"))
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    pub(crate) handle: Handle,
    pub owner: Handle,
    pub(crate) document: Option<DocumentId>,
    /// Layer name
    pub layer: String,
    /// Color
    pub color: Color,
    /// Line type name
    pub line_type: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Transparency
    pub transparency: Transparency,
    /// Visibility flag
    pub invisible: bool,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            document: None,
            layer: "0".to_string(),
            color: Color::ByLayer,
            line_type: "ByLayer".to_string(),
            line_weight: LineWeight::ByLayer,
            transparency: Transparency::OPAQUE,
            invisible: false,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    /// Point entity
    Point(Point),
    /// Line entity
    Line(Line),
    /// Circle entity
    Circle(Circle),
    /// Text entity
    Text(Text),
    /// Sequence-end terminator entity
    Seqend(Seqend),
    /// Insert entity (block reference)
    Insert(Insert),
    /// Attribute definition entity
    AttributeDefinition(AttributeDefinition),
    /// Attribute entity (block attribute instance)
    AttributeEntity(AttributeEntity),
    /// Aligned dimension entity
    AlignedDimension(AlignedDimension),
    /// 3D polyline entity
    Polyline3D(Polyline3D),
    /// 3D polyline vertex entity
    Vertex3D(Vertex3D),
    /// Polyface mesh entity
    PolyfaceMesh(PolyfaceMesh),
    /// Polyface mesh vertex entity
    PolyfaceVertex(PolyfaceVertex),
    /// Polyface mesh face record entity
    PolyfaceFace(PolyfaceFace),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Text(e) => e,
            EntityType::Seqend(e) => e,
            EntityType::Insert(e) => e,
            EntityType::AttributeDefinition(e) => e,
            EntityType::AttributeEntity(e) => e,
            EntityType::AlignedDimension(e) => e,
            EntityType::Polyline3D(e) => e,
            EntityType::Vertex3D(e) => e,
            EntityType::PolyfaceMesh(e) => e,
            EntityType::PolyfaceVertex(e) => e,
            EntityType::PolyfaceFace(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Text(e) => e,
            EntityType::Seqend(e) => e,
            EntityType::Insert(e) => e,
            EntityType::AttributeDefinition(e) => e,
            EntityType::AttributeEntity(e) => e,
            EntityType::AlignedDimension(e) => e,
            EntityType::Polyline3D(e) => e,
            EntityType::Vertex3D(e) => e,
            EntityType::PolyfaceMesh(e) => e,
            EntityType::PolyfaceVertex(e) => e,
            EntityType::PolyfaceFace(e) => e,
        }
    }
}

/// Collect the handles of an entity and everything nested in it
///
/// Privately held record clones are not walked; only the document decides
/// whether those enter a table.
pub(crate) fn collect_handles(entity: &EntityType, out: &mut Vec<Handle>) {
    out.push(entity.as_entity().handle());
    match entity {
        EntityType::Insert(insert) => {
            out.push(insert.attributes.seqend.common.handle);
            for attribute in insert.attributes.iter() {
                collect_handles(attribute, out);
            }
        }
        EntityType::AlignedDimension(dimension) => {
            for member in dimension.block.iter() {
                collect_handles(member, out);
            }
        }
        EntityType::Polyline3D(polyline) => {
            out.push(polyline.vertices.seqend.common.handle);
            for vertex in polyline.vertices.iter() {
                collect_handles(vertex, out);
            }
        }
        EntityType::PolyfaceMesh(mesh) => {
            out.push(mesh.vertices.seqend.common.handle);
            for vertex in mesh.vertices.iter() {
                collect_handles(vertex, out);
            }
            for face in mesh.faces.iter() {
                collect_handles(face, out);
            }
        }
        _ => {}
    }
}

/// Strip document membership from an entity and everything nested in it
///
/// Handles and owner links are kept so a later attach can reuse them where
/// they are still free.
pub(crate) fn clear_documents(entity: &mut EntityType) {
    entity.as_entity_mut().set_document(None);
    match entity {
        EntityType::Insert(insert) => {
            insert.attributes.seqend.common.document = None;
            for attribute in insert.attributes.iter_mut() {
                clear_documents(attribute);
            }
            if let Some(record) = insert.block.owned_mut() {
                record.set_document(None);
                record.clear_documents();
            }
        }
        EntityType::AlignedDimension(dimension) => {
            for member in dimension.block.iter_mut() {
                clear_documents(member);
            }
            if let Some(style) = dimension.style.owned_mut() {
                style.set_document(None);
            }
        }
        EntityType::Polyline3D(polyline) => {
            polyline.vertices.seqend.common.document = None;
            for vertex in polyline.vertices.iter_mut() {
                clear_documents(vertex);
            }
        }
        EntityType::PolyfaceMesh(mesh) => {
            mesh.vertices.seqend.common.document = None;
            for vertex in mesh.vertices.iter_mut() {
                clear_documents(vertex);
            }
            for face in mesh.faces.iter_mut() {
                clear_documents(face);
            }
        }
        _ => {}
    }
}
