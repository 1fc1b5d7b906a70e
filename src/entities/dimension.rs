//! Aligned dimension entity and its generated support block

use std::f64::consts::{FRAC_PI_2, PI};

use super::{Entity, EntityCommon, EntityType, Line, Point};
use crate::collection::{CadObjectCollection, MemberFilter};
use crate::error::{CadError, Result};
use crate::object::{CadObject, DocumentId};
use crate::tables::{DimStyle, Layer, RecordRef};
use crate::types::{BoundingBox3D, Handle, Vector2, Vector3};

/// Sign of `value`, `0.0` at zero
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Aligned dimension measuring the distance between two definition points
///
/// The dimension owns a private support block of primitive entities that
/// draws it: marker points, the dimension line, and extension lines. The
/// block is derived state, recomputed wholesale from the definition points,
/// the offset, and the style; it is never edited in place.
#[derive(Debug, Clone)]
pub struct AlignedDimension {
    /// Common entity data
    pub common: EntityCommon,
    /// First definition point
    pub first_point: Vector3,
    /// Second definition point
    pub second_point: Vector3,
    /// Signed distance from the measured segment to the dimension line
    pub offset: f64,
    /// Dimension style
    pub style: RecordRef<DimStyle>,
    /// Anchor point for the measurement text
    pub text_middle_point: Vector3,
    /// Rotation of the measurement text in radians
    pub text_rotation: f64,
    /// Whether the text anchor was placed manually rather than computed
    pub is_text_user_defined_location: bool,
    pub(crate) block: CadObjectCollection,
}

impl AlignedDimension {
    const SUPPORT_FILTER: MemberFilter = MemberFilter::only(
        "a dimension support entity",
        &["AcDbPoint", "AcDbLine", "AcDbText"],
    );

    /// Create an aligned dimension between two points
    ///
    /// The support block starts empty; regenerate it once the dimension is
    /// configured.
    pub fn new(first_point: Vector3, second_point: Vector3, offset: f64) -> Self {
        AlignedDimension {
            common: EntityCommon::new(),
            first_point,
            second_point,
            offset,
            style: RecordRef::Owned(Box::new(DimStyle::standard())),
            text_middle_point: Vector3::ZERO,
            text_rotation: 0.0,
            is_text_user_defined_location: false,
            block: CadObjectCollection::new(Self::SUPPORT_FILTER),
        }
    }

    /// The measured distance between the two definition points
    pub fn measurement(&self) -> f64 {
        self.first_point.distance(&self.second_point)
    }

    /// The support block's entities
    pub fn block_entities(&self) -> &CadObjectCollection {
        &self.block
    }

    /// Recompute the support block from the private style clone
    ///
    /// Fails when the style is held by name; resolving a name needs the
    /// owning document, which runs this through its own regenerate
    /// operation.
    pub fn regenerate_block(&mut self) -> Result<()> {
        let style = match &self.style {
            RecordRef::Owned(style) => (**style).clone(),
            RecordRef::Named(name) => {
                return Err(CadError::InvalidArgument(format!(
                    "dimension style '{}' cannot be resolved without a document",
                    name
                )))
            }
        };
        self.rebuild_block(&style);
        Ok(())
    }

    /// Recompute the support block against a resolved style
    ///
    /// The new entity list is built completely before the old one is
    /// discarded, so the block is never left partially rebuilt.
    pub(crate) fn rebuild_block(&mut self, style: &DimStyle) {
        let ref1 = self.first_point.xy();
        let ref2 = self.second_point.xy();
        let direction = ref2 - ref1;
        let mut perp = direction.perpendicular().normalize();
        if perp.length_squared() == 0.0 {
            perp = Vector2::UNIT_Y;
        }

        let dim_ref1 = ref1 + perp * self.offset;
        let dim_ref2 = ref2 + perp * self.offset;
        let ref_angle = direction.angle();

        let mut entities: Vec<EntityType> = Vec::new();

        for location in [ref1, ref2, dim_ref2] {
            let mut marker = Point::new(location.extend(0.0));
            marker.common.layer = Layer::DEFPOINTS_NAME.to_string();
            entities.push(EntityType::Point(marker));
        }

        // The dimension line stays visible while either side alone is
        // suppressed; only suppressing both sides hides it.
        if !(style.dimsd1 && style.dimsd2) {
            entities.push(EntityType::Line(Line::new(
                dim_ref1.extend(0.0),
                dim_ref2.extend(0.0),
            )));
        }

        let exo = sign(self.offset) * style.dimexo * style.dimscale;
        let exe = sign(self.offset) * style.dimexe * style.dimscale;
        if !style.dimse1 {
            entities.push(Self::extension_line(
                ref1 + perp * exo,
                dim_ref1 + perp * exe,
                style.dimltex1.as_deref(),
            ));
        }
        if !style.dimse2 {
            entities.push(Self::extension_line(
                ref2 + perp * exo,
                dim_ref2 + perp * exe,
                style.dimltex2.as_deref(),
            ));
        }

        let text_ref = dim_ref1.midpoint(&dim_ref2);
        let mut gap = style.dimgap * style.dimscale;
        let mut rotation = ref_angle;
        if rotation > FRAC_PI_2 && rotation <= 3.0 * FRAC_PI_2 {
            gap = -gap;
            rotation += PI;
        }

        self.text_middle_point = (text_ref + perp * gap).extend(0.0);
        self.text_rotation = rotation;
        self.is_text_user_defined_location = false;

        self.block.replace_all(entities);
    }

    fn extension_line(start: Vector2, end: Vector2, line_type: Option<&str>) -> EntityType {
        let mut line = Line::new(start.extend(0.0), end.extend(0.0));
        if let Some(name) = line_type {
            line.common.line_type = name.to_string();
        }
        EntityType::Line(line)
    }
}

impl CadObject for AlignedDimension {
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
        "DIMENSION"
    }

    fn subclass_marker(&self) -> &'static str {
        "AcDbAlignedDimension"
    }
}

impl Entity for AlignedDimension {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&[self.first_point, self.second_point])
    }

    fn translate(&mut self, offset: Vector3) {
        self.first_point = self.first_point + offset;
        self.second_point = self.second_point + offset;
        self.text_middle_point = self.text_middle_point + offset;
        for member in self.block.iter_mut() {
            member.as_entity_mut().translate(offset);
        }
    }

    /// Decompose into clones of the generated support entities
    fn explode(&self) -> Result<Vec<EntityType>> {
        Ok(self.block.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement() {
        let dim = AlignedDimension::new(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0), 5.0);
        assert_eq!(dim.measurement(), 5.0);
    }

    #[test]
    fn test_regenerate_requires_private_style() {
        let mut dim = AlignedDimension::new(Vector3::ZERO, Vector3::UNIT_X, 1.0);
        dim.style = RecordRef::Named("Standard".to_string());

        let err = dim.regenerate_block().unwrap_err();
        assert!(matches!(err, CadError::InvalidArgument(_)));
        assert!(dim.block_entities().is_empty());
    }

    #[test]
    fn test_regenerate_replaces_block_wholesale() {
        let mut dim = AlignedDimension::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), 5.0);
        dim.regenerate_block().unwrap();
        assert_eq!(dim.block_entities().len(), 6);

        dim.regenerate_block().unwrap();
        assert_eq!(dim.block_entities().len(), 6);
    }

    #[test]
    fn test_markers_land_on_defpoints() {
        let mut dim = AlignedDimension::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), 5.0);
        dim.regenerate_block().unwrap();

        let marker_layers: Vec<&str> = dim
            .block_entities()
            .iter()
            .filter_map(|e| match e {
                EntityType::Point(p) => Some(p.common.layer.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(marker_layers, vec!["Defpoints"; 3]);
    }

    #[test]
    fn test_explode_clones_support_entities() {
        let mut dim = AlignedDimension::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), 5.0);
        dim.regenerate_block().unwrap();

        let parts = dim.explode().unwrap();
        assert_eq!(parts.len(), dim.block_entities().len());
    }

    #[test]
    fn test_sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-2.5), -1.0);
    }

    #[test]
    fn test_translate_moves_definition_and_support() {
        let mut dim = AlignedDimension::new(Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0), 5.0);
        dim.regenerate_block().unwrap();
        dim.translate(Vector3::new(0.0, 0.0, 2.0));

        assert_eq!(dim.first_point, Vector3::new(0.0, 0.0, 2.0));
        match dim.block_entities().get(0) {
            Some(EntityType::Point(p)) => assert_eq!(p.location.z, 2.0),
            other => panic!("expected marker point, got {:?}", other),
        }
    }
}
