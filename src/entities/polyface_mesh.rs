//! Polyface mesh entity: vertices plus face records indexing into them

use super::polyline3d::{PolylineFlags, VertexFlags};
use super::{Entity, EntityCommon, EntityType};
use crate::collection::{CadObjectCollection, MemberFilter, SeqendCollection};
use crate::error::{CadError, Result};
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};

/// A location vertex of a polyface mesh
#[derive(Debug, Clone)]
pub struct PolyfaceVertex {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertex location
    pub location: Vector3,
    /// Role bits
    pub flags: VertexFlags,
}

impl PolyfaceVertex {
    /// Subclass discriminator of polyface mesh vertices
    pub const SUBCLASS_MARKER: &'static str = "AcDbPolyFaceMeshVertex";

    /// Create a new mesh vertex at the given location
    pub fn new(location: Vector3) -> Self {
        PolyfaceVertex {
            common: EntityCommon::new(),
            location,
            flags: VertexFlags::POLYGON_MESH | VertexFlags::POLYFACE_MESH,
        }
    }

    /// Create a new mesh vertex from coordinates
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        PolyfaceVertex::new(Vector3::new(x, y, z))
    }
}

impl CadObject for PolyfaceVertex {
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
        "VERTEX"
    }

    fn subclass_marker(&self) -> &'static str {
        Self::SUBCLASS_MARKER
    }
}

impl Entity for PolyfaceVertex {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }

    fn translate(&mut self, offset: Vector3) {
        self.location = self.location + offset;
    }
}

/// A face record referencing mesh vertices by 1-based index
///
/// A negative index marks the edge starting at that vertex as invisible;
/// index 0 means the slot is unused (triangular face).
#[derive(Debug, Clone)]
pub struct PolyfaceFace {
    /// Common entity data
    pub common: EntityCommon,
    /// First vertex index
    pub index1: i16,
    /// Second vertex index
    pub index2: i16,
    /// Third vertex index
    pub index3: i16,
    /// Fourth vertex index, 0 for triangles
    pub index4: i16,
}

impl PolyfaceFace {
    /// Subclass discriminator of face records
    pub const SUBCLASS_MARKER: &'static str = "AcDbFaceRecord";

    /// Create a triangular face
    pub fn triangle(index1: i16, index2: i16, index3: i16) -> Self {
        PolyfaceFace {
            common: EntityCommon::new(),
            index1,
            index2,
            index3,
            index4: 0,
        }
    }

    /// Create a quadrilateral face
    pub fn quad(index1: i16, index2: i16, index3: i16, index4: i16) -> Self {
        PolyfaceFace {
            common: EntityCommon::new(),
            index1,
            index2,
            index3,
            index4,
        }
    }

    /// Check if this face is a triangle
    pub fn is_triangle(&self) -> bool {
        self.index4 == 0 || self.index4.abs() == self.index3.abs()
    }

    /// Number of distinct vertices (3 or 4)
    pub fn vertex_count(&self) -> usize {
        if self.is_triangle() {
            3
        } else {
            4
        }
    }

    /// The face's vertex indices with visibility signs stripped
    pub fn vertex_indices(&self) -> Vec<i16> {
        let mut indices = vec![self.index1.abs(), self.index2.abs(), self.index3.abs()];
        if !self.is_triangle() {
            indices.push(self.index4.abs());
        }
        indices
    }

    /// Check edge visibility; `edge` counts from 0 in face order
    pub fn is_edge_visible(&self, edge: usize) -> bool {
        match edge {
            0 => self.index1 >= 0,
            1 => self.index2 >= 0,
            2 => self.index3 >= 0,
            3 => self.index4 >= 0,
            _ => false,
        }
    }
}

impl CadObject for PolyfaceFace {
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
        "VERTEX"
    }

    fn subclass_marker(&self) -> &'static str {
        Self::SUBCLASS_MARKER
    }
}

impl Entity for PolyfaceFace {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        None
    }

    fn translate(&mut self, _offset: Vector3) {}
}

/// A polyface mesh entity
///
/// Vertices form a seqend-terminated stream; face records index into that
/// stream 1-based. Each collection accepts only its own record subtype.
#[derive(Debug, Clone)]
pub struct PolyfaceMesh {
    /// Common entity data
    pub common: EntityCommon,
    /// Polyline state bits
    pub flags: PolylineFlags,
    /// Location vertices, closed by a seqend terminator
    pub vertices: SeqendCollection,
    /// Face records
    pub faces: CadObjectCollection,
}

impl PolyfaceMesh {
    const VERTEX_FILTER: MemberFilter = MemberFilter::only(
        PolyfaceVertex::SUBCLASS_MARKER,
        &[PolyfaceVertex::SUBCLASS_MARKER],
    );
    const FACE_FILTER: MemberFilter = MemberFilter::only(
        PolyfaceFace::SUBCLASS_MARKER,
        &[PolyfaceFace::SUBCLASS_MARKER],
    );

    /// Create an empty polyface mesh
    pub fn new() -> Self {
        PolyfaceMesh {
            common: EntityCommon::new(),
            flags: PolylineFlags::POLYFACE_MESH,
            vertices: SeqendCollection::new(Self::VERTEX_FILTER),
            faces: CadObjectCollection::new(Self::FACE_FILTER),
        }
    }

    /// Append a vertex, returning its 1-based face-record index
    pub fn add_vertex(&mut self, location: Vector3) -> i16 {
        // Vertices built here always pass the member filter
        let _ = self
            .vertices
            .add(EntityType::PolyfaceVertex(PolyfaceVertex::new(location)));
        self.vertices.len() as i16
    }

    /// Append a triangular face
    pub fn add_triangle(&mut self, i1: i16, i2: i16, i3: i16) {
        let _ = self
            .faces
            .add(EntityType::PolyfaceFace(PolyfaceFace::triangle(i1, i2, i3)));
    }

    /// Append a quadrilateral face
    pub fn add_quad(&mut self, i1: i16, i2: i16, i3: i16, i4: i16) {
        let _ = self
            .faces
            .add(EntityType::PolyfaceFace(PolyfaceFace::quad(i1, i2, i3, i4)));
    }

    /// Vertex locations in stream order
    pub fn vertex_positions(&self) -> Vec<Vector3> {
        self.vertices
            .iter()
            .filter_map(|e| match e {
                EntityType::PolyfaceVertex(v) => Some(v.location),
                _ => None,
            })
            .collect()
    }

    /// Locations of a face's corners, `None` if an index is out of range
    pub fn face_vertices(&self, face: &PolyfaceFace) -> Option<Vec<Vector3>> {
        let positions = self.vertex_positions();
        face.vertex_indices()
            .iter()
            .map(|&i| {
                let i = i as usize;
                if i >= 1 && i <= positions.len() {
                    Some(positions[i - 1])
                } else {
                    None
                }
            })
            .collect()
    }

    /// Unit normal of a face, `None` for degenerate or invalid faces
    pub fn face_normal(&self, face: &PolyfaceFace) -> Option<Vector3> {
        let corners = self.face_vertices(face)?;
        let normal = (corners[1] - corners[0]).cross(&(corners[2] - corners[0]));
        if normal.length() > 0.0 {
            Some(normal.normalize())
        } else {
            None
        }
    }

    /// Check every face record indexes an existing vertex
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len() as i16;
        for face in self.faces.iter() {
            if let EntityType::PolyfaceFace(face) = face {
                for index in face.vertex_indices() {
                    if index < 1 || index > vertex_count {
                        return Err(CadError::InvalidArgument(format!(
                            "face index {} out of range (mesh has {} vertices)",
                            index, vertex_count
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Build an axis-aligned box mesh (8 vertices, 6 quads)
    pub fn create_box(corner: Vector3, width: f64, depth: f64, height: f64) -> Self {
        let mut mesh = PolyfaceMesh::new();
        let (x, y, z) = (corner.x, corner.y, corner.z);

        let v1 = mesh.add_vertex(Vector3::new(x, y, z));
        let v2 = mesh.add_vertex(Vector3::new(x + width, y, z));
        let v3 = mesh.add_vertex(Vector3::new(x + width, y + depth, z));
        let v4 = mesh.add_vertex(Vector3::new(x, y + depth, z));
        let v5 = mesh.add_vertex(Vector3::new(x, y, z + height));
        let v6 = mesh.add_vertex(Vector3::new(x + width, y, z + height));
        let v7 = mesh.add_vertex(Vector3::new(x + width, y + depth, z + height));
        let v8 = mesh.add_vertex(Vector3::new(x, y + depth, z + height));

        mesh.add_quad(v1, v2, v3, v4);
        mesh.add_quad(v5, v6, v7, v8);
        mesh.add_quad(v1, v2, v6, v5);
        mesh.add_quad(v2, v3, v7, v6);
        mesh.add_quad(v3, v4, v8, v7);
        mesh.add_quad(v4, v1, v5, v8);
        mesh
    }
}

impl Default for PolyfaceMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl CadObject for PolyfaceMesh {
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
        "POLYLINE"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbPolyFaceMesh"
    }
}

impl Entity for PolyfaceMesh {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.vertex_positions())
    }

    fn translate(&mut self, offset: Vector3) {
        for vertex in self.vertices.iter_mut() {
            vertex.as_entity_mut().translate(offset);
        }
    }
}
