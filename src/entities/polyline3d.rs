//! 3D polyline entity and its vertices

use super::{Entity, EntityCommon, EntityType, Line};
use crate::collection::{MemberFilter, SeqendCollection};
use crate::error::Result;
use crate::object::{CadObject, DocumentId};
use crate::types::{BoundingBox3D, Handle, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Polyline state bits as the format encodes them
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: u8 {
        /// Closed polyline (or closed in M direction for meshes)
        const CLOSED = 1;
        /// Curve-fit vertices were added
        const CURVE_FIT = 2;
        /// Spline-fit vertices were added
        const SPLINE_FIT = 4;
        /// 3D polyline
        const POLYLINE_3D = 8;
        /// 3D polygon mesh
        const POLYGON_MESH = 16;
        /// Polygon mesh closed in the N direction
        const CLOSED_N = 32;
        /// Polyface mesh
        const POLYFACE_MESH = 64;
        /// Line type pattern continues around vertices
        const CONTINUOUS_LINETYPE = 128;
    }
}

bitflags! {
    /// Vertex role bits as the format encodes them
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VertexFlags: u8 {
        /// Extra vertex created by curve fitting
        const CURVE_FIT_EXTRA = 1;
        /// Curve-fit tangent defined
        const CURVE_FIT_TANGENT = 2;
        /// Spline vertex created by spline fitting
        const SPLINE_VERTEX = 8;
        /// Spline frame control point
        const SPLINE_CONTROL = 16;
        /// 3D polyline vertex
        const POLYLINE_3D = 32;
        /// 3D polygon mesh vertex
        const POLYGON_MESH = 64;
        /// Polyface mesh vertex
        const POLYFACE_MESH = 128;
    }
}

/// A vertex of a 3D polyline
#[derive(Debug, Clone)]
pub struct Vertex3D {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertex location
    pub location: Vector3,
    /// Role bits
    pub flags: VertexFlags,
}

impl Vertex3D {
    /// Subclass discriminator of 3D polyline vertices
    pub const SUBCLASS_MARKER: &'static str = "AcDb3dPolylineVertex";

    /// Create a new vertex at the given location
    pub fn new(location: Vector3) -> Self {
        Vertex3D {
            common: EntityCommon::new(),
            location,
            flags: VertexFlags::POLYLINE_3D,
        }
    }
}

impl CadObject for Vertex3D {
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

impl Entity for Vertex3D {
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

/// A 3D polyline through a sequence of vertices
#[derive(Debug, Clone)]
pub struct Polyline3D {
    /// Common entity data
    pub common: EntityCommon,
    /// Polyline state bits
    pub flags: PolylineFlags,
    /// Vertex sequence, closed by a seqend terminator
    pub vertices: SeqendCollection,
}

impl Polyline3D {
    const VERTEX_FILTER: MemberFilter =
        MemberFilter::only(Vertex3D::SUBCLASS_MARKER, &[Vertex3D::SUBCLASS_MARKER]);

    /// Create an empty 3D polyline
    pub fn new() -> Self {
        Polyline3D {
            common: EntityCommon::new(),
            flags: PolylineFlags::POLYLINE_3D,
            vertices: SeqendCollection::new(Self::VERTEX_FILTER),
        }
    }

    /// Create a polyline through the given points
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut polyline = Polyline3D::new();
        for point in points {
            polyline.add_vertex(*point);
        }
        polyline
    }

    /// Append a vertex at the given location
    pub fn add_vertex(&mut self, location: Vector3) {
        // Vertices built here always pass the member filter
        let _ = self
            .vertices
            .add(EntityType::Vertex3D(Vertex3D::new(location)));
    }

    /// Check if the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    /// Close the polyline (last vertex connects back to the first)
    pub fn close(&mut self) {
        self.flags.insert(PolylineFlags::CLOSED);
    }

    /// Open the polyline
    pub fn open(&mut self) {
        self.flags.remove(PolylineFlags::CLOSED);
    }

    /// Vertex locations in sequence order
    pub fn vertex_positions(&self) -> Vec<Vector3> {
        self.vertices
            .iter()
            .filter_map(|e| match e {
                EntityType::Vertex3D(v) => Some(v.location),
                _ => None,
            })
            .collect()
    }

    /// First vertex location
    pub fn start_point(&self) -> Option<Vector3> {
        self.vertex_positions().first().copied()
    }

    /// Last vertex location
    pub fn end_point(&self) -> Option<Vector3> {
        self.vertex_positions().last().copied()
    }

    /// Total polyline length, including the closing segment when closed
    pub fn length(&self) -> f64 {
        let positions = self.vertex_positions();
        if positions.len() < 2 {
            return 0.0;
        }
        let mut length: f64 = positions
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum();
        if self.is_closed() {
            length += positions[positions.len() - 1].distance(&positions[0]);
        }
        length
    }
}

impl Default for Polyline3D {
    fn default() -> Self {
        Self::new()
    }
}

impl CadObject for Polyline3D {
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
        "AcDb3dPolyline"
    }
}

impl Entity for Polyline3D {
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

    /// Decompose into one line per segment, plus the closing segment when
    /// closed
    fn explode(&self) -> Result<Vec<EntityType>> {
        let positions = self.vertex_positions();
        let mut segments = Vec::new();
        for pair in positions.windows(2) {
            let mut line = Line::new(pair[0], pair[1]);
            line.common.layer = self.common.layer.clone();
            segments.push(EntityType::Line(line));
        }
        if self.is_closed() && positions.len() >= 2 {
            let mut line = Line::new(positions[positions.len() - 1], positions[0]);
            line.common.layer = self.common.layer.clone();
            segments.push(EntityType::Line(line));
        }
        Ok(segments)
    }
}
