//! CAD document: the root owner of the object graph
//!
//! A [`CadDocument`] owns its named tables by value, and every entity lives
//! inside the entity list of some [`BlockRecord`]. Attachment is tracked
//! through weak back-references (handle + document id), so objects can be
//! detached, carried around, and re-attached without reference cycles.
//!
//! All structural mutation of attached objects goes through the document so
//! the handle registry stays consistent: `add_entity`, `remove_entity`,
//! `take_entity`/`put_entity`, and the regeneration operations.

use ahash::AHashSet;

use crate::entities::{self, AttributeDefinition, EntityType, Seqend};
use crate::error::{CadError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::object::{CadObject, DocumentId};
use crate::tables::{
    AppId, BlockRecord, DimStyle, Layer, LineType, RecordRef, Table, TableEntry, TextStyle,
};
use crate::types::{BoundingBox3D, Handle};

/// Registry of every handle-bearing object reachable from a document
///
/// Attach registers each object exactly once and detach unregisters it
/// exactly once; a violation surfaces as [`CadError::Registry`] instead of
/// a silently orphaned or double-counted handle.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    handles: AHashSet<Handle>,
}

impl ObjectRegistry {
    fn register(&mut self, handle: Handle) -> Result<()> {
        if handle.is_null() {
            return Err(CadError::Registry(
                "cannot register the null handle".to_string(),
            ));
        }
        if !self.handles.insert(handle) {
            return Err(CadError::Registry(format!(
                "handle {} registered twice",
                handle
            )));
        }
        Ok(())
    }

    fn unregister(&mut self, handle: Handle) -> Result<()> {
        if !self.handles.remove(&handle) {
            return Err(CadError::Registry(format!(
                "handle {} was not registered",
                handle
            )));
        }
        Ok(())
    }

    /// Check whether a handle is registered
    pub fn contains(&self, handle: Handle) -> bool {
        self.handles.contains(&handle)
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Where a temporarily taken entity goes back to
///
/// Produced by [`CadDocument::take_entity`] and consumed by
/// [`CadDocument::put_entity`].
#[derive(Debug, Clone)]
pub struct EntityPlacement {
    block_name: String,
    index: usize,
}

impl EntityPlacement {
    /// Name of the block record the entity was taken from
    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// Position the entity held in that block's entity list
    pub fn index(&self) -> usize {
        self.index
    }
}

/// An in-memory CAD drawing
///
/// Construction seeds the standard records every drawing carries: layer
/// `"0"`, the `Continuous`/`ByLayer`/`ByBlock` line types, the `Standard`
/// text and dimension styles, the `ACAD` application id, and the model and
/// paper space block records.
///
/// The tables are public for read access and record-level edits. Inserting
/// or removing records and entities should go through the document methods,
/// which assign handles and keep the registry in sync.
#[derive(Debug)]
pub struct CadDocument {
    id: DocumentId,
    /// Layer table
    pub layers: Table<Layer>,
    /// Line type table
    pub line_types: Table<LineType>,
    /// Text style table
    pub text_styles: Table<TextStyle>,
    /// Dimension style table
    pub dim_styles: Table<DimStyle>,
    /// Application id table
    pub app_ids: Table<AppId>,
    /// Block record table; model space is the default entity container
    pub block_records: Table<BlockRecord>,
    /// Diagnostics recorded by lifecycle operations
    pub notifications: NotificationCollection,
    registry: ObjectRegistry,
    next_handle: u64,
}

impl CadDocument {
    /// Create a document with the standard seeded records
    pub fn new() -> Self {
        let mut document = CadDocument {
            id: DocumentId::next(),
            layers: Table::new(),
            line_types: Table::new(),
            text_styles: Table::new(),
            dim_styles: Table::new(),
            app_ids: Table::new(),
            block_records: Table::new(),
            notifications: NotificationCollection::new(),
            registry: ObjectRegistry::default(),
            // Handle values below 0x10 are reserved for well-known objects
            next_handle: 0x10,
        };
        document.initialize_defaults();
        document
    }

    fn initialize_defaults(&mut self) {
        self.add_layer(Layer::layer_0()).ok();
        self.add_line_type(LineType::continuous()).ok();
        self.add_line_type(LineType::by_layer()).ok();
        self.add_line_type(LineType::by_block()).ok();
        self.add_text_style(TextStyle::standard()).ok();
        self.add_dim_style(DimStyle::standard()).ok();
        self.add_app_id(AppId::acad()).ok();
        self.add_block_record(BlockRecord::model_space()).ok();
        self.add_block_record(BlockRecord::paper_space()).ok();
    }

    /// Process-unique identity of this document
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// The next handle value the allocator will hand out
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    /// Number of registered handle-bearing objects in the document
    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    /// Check whether a handle is currently registered here
    pub fn is_registered(&self, handle: Handle) -> bool {
        self.registry.contains(handle)
    }

    fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Keep the object's existing handle when it is free in this document,
    /// otherwise allocate a fresh one and record a warning.
    fn claim_handle(&mut self, current: Handle) -> Handle {
        if current.is_null() || self.registry.contains(current) {
            let fresh = self.allocate_handle();
            if !current.is_null() {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("handle {} is already in use, reassigned to {}", current, fresh),
                );
            }
            fresh
        } else {
            // Keep the handle; the allocator must never hand it out again
            if current.value() >= self.next_handle {
                self.next_handle = current.value() + 1;
            }
            current
        }
    }

    fn ensure_attachable(&self, document: Option<DocumentId>, handle: Handle) -> Result<()> {
        match document {
            Some(existing) if existing != self.id => {
                Err(CadError::AlreadyAttached(handle.value()))
            }
            _ => Ok(()),
        }
    }

    /// Assign identity to a table record entering this document
    fn commit_record(&mut self, record: &mut dyn CadObject) -> Result<Handle> {
        let handle = self.claim_handle(record.handle());
        record.set_handle(handle);
        record.set_document(Some(self.id));
        self.registry.register(handle)?;
        Ok(handle)
    }

    // ----- table record insertion -----

    /// Add a layer, assigning its handle
    pub fn add_layer(&mut self, mut layer: Layer) -> Result<Handle> {
        self.ensure_attachable(layer.document(), layer.handle())?;
        if self.layers.contains(layer.name()) {
            return Err(CadError::DuplicateName(layer.name().to_string()));
        }
        let handle = self.commit_record(&mut layer)?;
        self.layers.add(layer)?;
        Ok(handle)
    }

    /// Add a line type, assigning its handle
    pub fn add_line_type(&mut self, mut line_type: LineType) -> Result<Handle> {
        self.ensure_attachable(line_type.document(), line_type.handle())?;
        if self.line_types.contains(line_type.name()) {
            return Err(CadError::DuplicateName(line_type.name().to_string()));
        }
        let handle = self.commit_record(&mut line_type)?;
        self.line_types.add(line_type)?;
        Ok(handle)
    }

    /// Add a text style, assigning its handle
    pub fn add_text_style(&mut self, mut style: TextStyle) -> Result<Handle> {
        self.ensure_attachable(style.document(), style.handle())?;
        if self.text_styles.contains(style.name()) {
            return Err(CadError::DuplicateName(style.name().to_string()));
        }
        let handle = self.commit_record(&mut style)?;
        self.text_styles.add(style)?;
        Ok(handle)
    }

    /// Add a dimension style, assigning its handle
    pub fn add_dim_style(&mut self, mut style: DimStyle) -> Result<Handle> {
        self.ensure_attachable(style.document(), style.handle())?;
        if self.dim_styles.contains(style.name()) {
            return Err(CadError::DuplicateName(style.name().to_string()));
        }
        let handle = self.commit_record(&mut style)?;
        self.dim_styles.add(style)?;
        Ok(handle)
    }

    /// Add an application id, assigning its handle
    pub fn add_app_id(&mut self, mut app_id: AppId) -> Result<Handle> {
        self.ensure_attachable(app_id.document(), app_id.handle())?;
        if self.app_ids.contains(app_id.name()) {
            return Err(CadError::DuplicateName(app_id.name().to_string()));
        }
        let handle = self.commit_record(&mut app_id)?;
        self.app_ids.add(app_id)?;
        Ok(handle)
    }

    /// Add a block record together with its entity tree
    ///
    /// Every entity in the record is attached: handles assigned, document
    /// and owner back-references set, and nested references resolved. Fails
    /// without touching the document if the record name is taken, the record
    /// belongs to another document, or any entity cannot be attached.
    pub fn add_block_record(&mut self, mut record: BlockRecord) -> Result<Handle> {
        self.ensure_attachable(record.document(), record.handle())?;
        if self.block_records.contains(record.name()) {
            return Err(CadError::DuplicateName(record.name().to_string()));
        }
        for entity in record.entities.iter() {
            self.validate_attachable(entity)?;
        }
        let handle = self.commit_record(&mut record)?;
        record.entities.set_owner(handle);
        for entity in record.entities.iter_mut() {
            self.attach_entity_tree(entity, handle)?;
        }
        self.block_records.add(record)?;
        Ok(handle)
    }

    /// Remove a block record and detach its entity tree
    ///
    /// Model and paper space cannot be removed. Inserts that still reference
    /// the removed record by name are left dangling; [`Self::resolve_references`]
    /// reports them.
    pub fn remove_block_record(&mut self, name: &str) -> Result<BlockRecord> {
        match self.block_records.get(name) {
            Some(record) if record.is_standard() => {
                return Err(CadError::InvalidArgument(format!(
                    "standard block '{}' cannot be removed",
                    record.name
                )));
            }
            Some(_) => {}
            None => {
                return Err(CadError::InvalidArgument(format!(
                    "no block record named '{}'",
                    name
                )));
            }
        }
        let mut record = match self.block_records.remove(name) {
            Some(record) => record,
            None => {
                return Err(CadError::InvalidArgument(format!(
                    "no block record named '{}'",
                    name
                )));
            }
        };
        self.registry.unregister(record.handle())?;
        let mut handles = Vec::new();
        for entity in record.entities.iter() {
            entities::collect_handles(entity, &mut handles);
        }
        for handle in handles {
            if !handle.is_null() {
                self.registry.unregister(handle)?;
            }
        }
        record.set_document(None);
        record.set_owner(Handle::NULL);
        record.clear_documents();
        Ok(record)
    }

    // ----- entity lifecycle -----

    /// Add an entity to model space
    ///
    /// Returns the handle assigned to the entity.
    pub fn add_entity(&mut self, entity: EntityType) -> Result<Handle> {
        self.add_entity_to_block(BlockRecord::MODEL_SPACE_NAME, entity)
    }

    /// Add an entity to the entity list of a named block record
    ///
    /// The whole operation validates before it mutates: a rejected entity
    /// leaves the document untouched. On success the entity and every nested
    /// object (attributes, vertices, faces, seqend terminators, generated
    /// dimension geometry) carry fresh or verified-free handles and are
    /// registered. A block reference held as a private clone is resolved:
    /// if the document already has a record with that name the clone is
    /// discarded, otherwise the clone enters the block record table.
    pub fn add_entity_to_block(&mut self, block_name: &str, entity: EntityType) -> Result<Handle> {
        let owner = match self.block_records.get(block_name) {
            Some(record) => {
                let marker = entity.as_entity().subclass_marker();
                if !record.entities.filter().accepts(marker) {
                    return Err(CadError::InvalidMemberType {
                        expected: record.entities.filter().description(),
                        found: marker,
                    });
                }
                record.handle()
            }
            None => {
                return Err(CadError::InvalidArgument(format!(
                    "no block record named '{}'",
                    block_name
                )));
            }
        };
        self.validate_attachable(&entity)?;
        let mut entity = entity;
        let handle = self.attach_entity_tree(&mut entity, owner)?;
        if let Some(record) = self.block_records.get_mut(block_name) {
            record.entities.add(entity)?;
        }
        Ok(handle)
    }

    /// Remove an entity from the document, detaching it fully
    ///
    /// The returned entity keeps its handle but loses its document and owner
    /// back-references; every handle in its subtree is unregistered. A block
    /// or style reference held by name is converted to a private clone of the
    /// table record so the entity stays self-contained. If the named record
    /// no longer exists the name is kept and a warning is recorded.
    pub fn remove_entity(&mut self, handle: Handle) -> Result<EntityType> {
        let (_, mut entity) = self.take_entity(handle)?;
        self.resolve_detached_references(&mut entity);
        entities::clear_documents(&mut entity);
        entity.as_entity_mut().set_owner(Handle::NULL);
        Ok(entity)
    }

    /// Temporarily take an attached entity out of its block for mutation
    ///
    /// The entity keeps its document mark but its subtree handles are
    /// unregistered while it is in flight. [`Self::put_entity`] reverses
    /// this, re-registering surviving handles and assigning fresh ones to
    /// subobjects created in between.
    pub fn take_entity(&mut self, handle: Handle) -> Result<(EntityPlacement, EntityType)> {
        if !self.registry.contains(handle) {
            return Err(CadError::NotAttached(handle.value()));
        }
        let (block_name, index) = self
            .find_entity(handle)
            .ok_or(CadError::ObjectNotFound(handle.value()))?;
        let entity = match self.block_records.get_mut(&block_name) {
            Some(record) => record.entities.items.remove(index),
            None => return Err(CadError::ObjectNotFound(handle.value())),
        };
        let mut handles = Vec::new();
        entities::collect_handles(&entity, &mut handles);
        for h in handles {
            if !h.is_null() {
                self.registry.unregister(h)?;
            }
        }
        Ok((EntityPlacement { block_name, index }, entity))
    }

    /// Put a taken entity back at the position it came from
    pub fn put_entity(&mut self, placement: EntityPlacement, mut entity: EntityType) -> Result<Handle> {
        let EntityPlacement { block_name, index } = placement;
        let owner = match self.block_records.get(&block_name) {
            Some(record) => record.handle(),
            None => {
                return Err(CadError::InvalidArgument(format!(
                    "no block record named '{}'",
                    block_name
                )));
            }
        };
        let handle = self.attach_entity_tree(&mut entity, owner)?;
        match self.block_records.get_mut(&block_name) {
            Some(record) => {
                let index = index.min(record.entities.items.len());
                record.entities.items.insert(index, entity);
                Ok(handle)
            }
            None => Err(CadError::InvalidArgument(format!(
                "no block record named '{}'",
                block_name
            ))),
        }
    }

    /// Find a top-level entity by handle
    pub fn get_entity(&self, handle: Handle) -> Option<&EntityType> {
        for record in self.block_records.iter() {
            if let Some(index) = record.entities.position_of(handle) {
                return record.entities.get(index);
            }
        }
        None
    }

    /// Find a top-level entity by handle, mutably
    ///
    /// Geometry edits are fine through this; structural edits (adding or
    /// removing nested objects) must go through [`Self::take_entity`] and
    /// [`Self::put_entity`] so the registry stays consistent.
    pub fn get_entity_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        for record in self.block_records.iter_mut() {
            if let Some(index) = record.entities.position_of(handle) {
                return record.entities.get_mut(index);
            }
        }
        None
    }

    fn find_entity(&self, handle: Handle) -> Option<(String, usize)> {
        for record in self.block_records.iter() {
            if let Some(index) = record.entities.position_of(handle) {
                return Some((record.name.clone(), index));
            }
        }
        None
    }

    /// The model space block record
    pub fn model_space(&self) -> Option<&BlockRecord> {
        self.block_records.get(BlockRecord::MODEL_SPACE_NAME)
    }

    /// The paper space block record
    pub fn paper_space(&self) -> Option<&BlockRecord> {
        self.block_records.get(BlockRecord::PAPER_SPACE_NAME)
    }

    /// Iterate over the model space entities
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.model_space().into_iter().flat_map(|r| r.entities.iter())
    }

    // ----- attach / detach internals -----

    /// Read-only pre-flight check for attaching an entity tree
    fn validate_attachable(&self, entity: &EntityType) -> Result<()> {
        let object = entity.as_entity();
        self.ensure_attachable(object.document(), object.handle())?;
        match entity {
            EntityType::Insert(insert) => {
                match &insert.block {
                    RecordRef::Named(name) => {
                        if !self.block_records.contains(name) {
                            return Err(CadError::InvalidArgument(format!(
                                "no block record named '{}'",
                                name
                            )));
                        }
                    }
                    RecordRef::Owned(record) => {
                        // A clone that will be adopted brings its own tree
                        if !self.block_records.contains(record.name()) {
                            for member in record.entities.iter() {
                                self.validate_attachable(member)?;
                            }
                        }
                    }
                }
                for attribute in insert.attributes.iter() {
                    self.validate_attachable(attribute)?;
                }
            }
            EntityType::AlignedDimension(dimension) => {
                if let RecordRef::Named(name) = &dimension.style {
                    if !self.dim_styles.contains(name) {
                        return Err(CadError::InvalidArgument(format!(
                            "no dimension style named '{}'",
                            name
                        )));
                    }
                }
                for member in dimension.block_entities().iter() {
                    self.validate_attachable(member)?;
                }
            }
            EntityType::Polyline3D(polyline) => {
                for vertex in polyline.vertices.iter() {
                    self.validate_attachable(vertex)?;
                }
            }
            EntityType::PolyfaceMesh(mesh) => {
                for vertex in mesh.vertices.iter() {
                    self.validate_attachable(vertex)?;
                }
                for face in mesh.faces.iter() {
                    self.validate_attachable(face)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Attach an entity and everything nested inside it
    fn attach_entity_tree(&mut self, entity: &mut EntityType, owner: Handle) -> Result<Handle> {
        let id = self.id;
        let handle = self.claim_handle(entity.as_entity().handle());
        {
            let object = entity.as_entity_mut();
            object.set_handle(handle);
            object.set_document(Some(id));
            object.set_owner(owner);
        }
        self.registry.register(handle)?;

        match entity {
            EntityType::Insert(insert) => {
                self.adopt_block_reference(&mut insert.block)?;
                insert.attributes.set_owner(handle);
                self.attach_seqend(&mut insert.attributes.seqend, handle)?;
                for attribute in insert.attributes.iter_mut() {
                    self.attach_entity_tree(attribute, handle)?;
                }
            }
            EntityType::AlignedDimension(dimension) => {
                self.adopt_style_reference(&mut dimension.style)?;
                dimension.block.set_owner(handle);
                for member in dimension.block.iter_mut() {
                    self.attach_entity_tree(member, handle)?;
                }
            }
            EntityType::Polyline3D(polyline) => {
                polyline.vertices.set_owner(handle);
                self.attach_seqend(&mut polyline.vertices.seqend, handle)?;
                for vertex in polyline.vertices.iter_mut() {
                    self.attach_entity_tree(vertex, handle)?;
                }
            }
            EntityType::PolyfaceMesh(mesh) => {
                mesh.vertices.set_owner(handle);
                mesh.faces.set_owner(handle);
                self.attach_seqend(&mut mesh.vertices.seqend, handle)?;
                for vertex in mesh.vertices.iter_mut() {
                    self.attach_entity_tree(vertex, handle)?;
                }
                for face in mesh.faces.iter_mut() {
                    self.attach_entity_tree(face, handle)?;
                }
            }
            _ => {}
        }
        Ok(handle)
    }

    fn attach_seqend(&mut self, seqend: &mut Seqend, owner: Handle) -> Result<()> {
        let handle = self.claim_handle(seqend.common.handle);
        seqend.common.handle = handle;
        seqend.common.document = Some(self.id);
        seqend.common.owner = owner;
        self.registry.register(handle)
    }

    /// Resolve a block reference entering the document
    ///
    /// A by-name reference must resolve against the block record table. A
    /// privately held clone is discarded when the document already has a
    /// record with that name; otherwise the clone is adopted into the table.
    /// Either way the reference ends up by-name.
    fn adopt_block_reference(&mut self, slot: &mut RecordRef<BlockRecord>) -> Result<()> {
        match slot.make_named() {
            Some(record) => {
                if !self.block_records.contains(record.name()) {
                    let record = if record.document().is_some() {
                        Box::new(record.detached_clone())
                    } else {
                        record
                    };
                    self.add_block_record(*record)?;
                }
                Ok(())
            }
            None => {
                if self.block_records.contains(slot.name()) {
                    Ok(())
                } else {
                    Err(CadError::InvalidArgument(format!(
                        "no block record named '{}'",
                        slot.name()
                    )))
                }
            }
        }
    }

    /// Resolve a dimension style reference entering the document
    fn adopt_style_reference(&mut self, slot: &mut RecordRef<DimStyle>) -> Result<()> {
        match slot.make_named() {
            Some(mut style) => {
                if !self.dim_styles.contains(style.name()) {
                    if style.document().is_some() {
                        style.set_document(None);
                        style.set_owner(Handle::NULL);
                    }
                    self.add_dim_style(*style)?;
                }
                Ok(())
            }
            None => {
                if self.dim_styles.contains(slot.name()) {
                    Ok(())
                } else {
                    Err(CadError::InvalidArgument(format!(
                        "no dimension style named '{}'",
                        slot.name()
                    )))
                }
            }
        }
    }

    /// Convert by-name references to private clones on detach
    fn resolve_detached_references(&mut self, entity: &mut EntityType) {
        match entity {
            EntityType::Insert(insert) => {
                let name = match &insert.block {
                    RecordRef::Named(name) => Some(name.clone()),
                    RecordRef::Owned(_) => None,
                };
                if let Some(name) = name {
                    match self.block_records.get(&name) {
                        Some(record) => {
                            let clone = record.detached_clone();
                            insert.block.make_owned(clone);
                        }
                        None => {
                            self.notifications.notify(
                                NotificationType::Warning,
                                format!(
                                    "block record '{}' is missing; detached reference kept by name",
                                    name
                                ),
                            );
                        }
                    }
                }
            }
            EntityType::AlignedDimension(dimension) => {
                let name = match &dimension.style {
                    RecordRef::Named(name) => Some(name.clone()),
                    RecordRef::Owned(_) => None,
                };
                if let Some(name) = name {
                    match self.dim_styles.get(&name) {
                        Some(style) => {
                            let mut clone = style.clone();
                            clone.set_document(None);
                            clone.set_owner(Handle::NULL);
                            dimension.style.make_owned(clone);
                        }
                        None => {
                            self.notifications.notify(
                                NotificationType::Warning,
                                format!(
                                    "dimension style '{}' is missing; detached reference kept by name",
                                    name
                                ),
                            );
                        }
                    }
                }
            }
            _ => {}
        }
    }

    // ----- regeneration operations -----

    /// Rebuild a dimension's generated support geometry in place
    ///
    /// Resolves the dimension's style (by name against the table, or the
    /// private copy), rebuilds the support block, and makes sure the
    /// `Defpoints` layer the markers land on exists. Old support entities
    /// are unregistered, new ones get fresh handles; the dimension itself
    /// keeps its handle and position. Everything that can fail is checked
    /// before the document is touched.
    pub fn regenerate_dimension_block(&mut self, handle: Handle) -> Result<()> {
        let style = match self.checked_entity(handle)? {
            EntityType::AlignedDimension(dimension) => match &dimension.style {
                RecordRef::Named(name) => match self.dim_styles.get(name) {
                    Some(style) => style.clone(),
                    None => {
                        return Err(CadError::InvalidArgument(format!(
                            "no dimension style named '{}'",
                            name
                        )));
                    }
                },
                RecordRef::Owned(style) => (**style).clone(),
            },
            _ => {
                return Err(CadError::InvalidArgument(format!(
                    "object {} is not a dimension",
                    handle
                )));
            }
        };
        let (placement, mut entity) = self.take_entity(handle)?;
        if let EntityType::AlignedDimension(dimension) = &mut entity {
            dimension.rebuild_block(&style);
        }
        self.ensure_defpoints_layer();
        self.put_entity(placement, entity).map(|_| ())
    }

    /// Reconcile an insert's attribute instances with its block's definitions
    ///
    /// Instances whose tag no longer matches any definition are dropped and
    /// unregistered; definitions without a matching instance get a fresh
    /// instance with a fresh handle. Matching instances keep their handles
    /// and values, so running this twice changes nothing.
    pub fn update_insert_attributes(&mut self, handle: Handle) -> Result<()> {
        let definitions = match self.checked_entity(handle)? {
            EntityType::Insert(insert) => match &insert.block {
                RecordRef::Named(name) => match self.block_records.get(name) {
                    Some(record) => {
                        record.attribute_definitions().cloned().collect::<Vec<_>>()
                    }
                    None => {
                        return Err(CadError::InvalidArgument(format!(
                            "no block record named '{}'",
                            name
                        )));
                    }
                },
                RecordRef::Owned(record) => {
                    record.attribute_definitions().cloned().collect()
                }
            },
            _ => {
                return Err(CadError::InvalidArgument(format!(
                    "object {} is not an insert",
                    handle
                )));
            }
        };
        let (placement, mut entity) = self.take_entity(handle)?;
        if let EntityType::Insert(insert) = &mut entity {
            insert.synchronize_attributes(&definitions);
        }
        self.put_entity(placement, entity).map(|_| ())
    }

    /// Point an insert at a different block record and resync its attributes
    pub fn set_insert_block(&mut self, handle: Handle, block_name: &str) -> Result<()> {
        let (record_name, definitions) = match self.block_records.get(block_name) {
            Some(record) => {
                let definitions: Vec<AttributeDefinition> =
                    record.attribute_definitions().cloned().collect();
                (record.name.clone(), definitions)
            }
            None => {
                return Err(CadError::InvalidArgument(format!(
                    "no block record named '{}'",
                    block_name
                )));
            }
        };
        match self.checked_entity(handle)? {
            EntityType::Insert(_) => {}
            _ => {
                return Err(CadError::InvalidArgument(format!(
                    "object {} is not an insert",
                    handle
                )));
            }
        }
        let (placement, mut entity) = self.take_entity(handle)?;
        if let EntityType::Insert(insert) = &mut entity {
            insert.block = RecordRef::Named(record_name);
            insert.synchronize_attributes(&definitions);
        }
        self.put_entity(placement, entity).map(|_| ())
    }

    /// Look up a top-level entity, distinguishing a detached object from an
    /// unknown handle
    fn checked_entity(&self, handle: Handle) -> Result<&EntityType> {
        if !self.registry.contains(handle) {
            return Err(CadError::NotAttached(handle.value()));
        }
        self.get_entity(handle)
            .ok_or(CadError::ObjectNotFound(handle.value()))
    }

    fn ensure_defpoints_layer(&mut self) {
        if !self.layers.contains(Layer::DEFPOINTS_NAME) {
            self.add_layer(Layer::defpoints()).ok();
        }
    }

    // ----- geometry queries -----

    /// Extent of a single attached entity, resolving block references
    ///
    /// Fails if the handle does not name a top-level entity. `Ok(None)`
    /// means the entity has no extent (an empty block, for example).
    pub fn entity_bounding_box(&self, handle: Handle) -> Result<Option<BoundingBox3D>> {
        let entity = self
            .get_entity(handle)
            .ok_or(CadError::ObjectNotFound(handle.value()))?;
        let mut visited = AHashSet::new();
        Ok(self.entity_box(entity, &mut visited))
    }

    /// Combined extent of a named block's entities
    ///
    /// Follows nested block references through the table, applying each
    /// insert's scale and translation. A reference cycle contributes
    /// nothing instead of recursing forever.
    pub fn block_bounding_box(&self, name: &str) -> Option<BoundingBox3D> {
        let mut visited = AHashSet::new();
        self.block_box(name, &mut visited)
    }

    /// Extent of everything in model space
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        self.block_bounding_box(BlockRecord::MODEL_SPACE_NAME)
    }

    fn block_box(&self, name: &str, visited: &mut AHashSet<String>) -> Option<BoundingBox3D> {
        let record = self.block_records.get(name)?;
        let key = record.name.to_uppercase();
        if !visited.insert(key.clone()) {
            return None;
        }
        let mut result = None;
        for entity in record.entities.iter() {
            result = BoundingBox3D::merge_optional(result, self.entity_box(entity, visited));
        }
        visited.remove(&key);
        result
    }

    fn entity_box(&self, entity: &EntityType, visited: &mut AHashSet<String>) -> Option<BoundingBox3D> {
        match entity {
            EntityType::Insert(insert) => {
                let child = match &insert.block {
                    RecordRef::Named(name) => self.block_box(name, visited)?,
                    RecordRef::Owned(record) => record.bounding_box()?,
                };
                let min = child.min.component_mul(&insert.scale) + insert.insert_point;
                let max = child.max.component_mul(&insert.scale) + insert.insert_point;
                Some(BoundingBox3D::new(min, max))
            }
            _ => entity.as_entity().bounding_box(),
        }
    }

    // ----- consistency sweep -----

    /// Check every by-name reference held by a top-level entity
    ///
    /// Records a warning per dangling reference (missing block record,
    /// dimension style, or layer) and returns how many were found.
    pub fn resolve_references(&mut self) -> usize {
        let mut dangling: Vec<String> = Vec::new();
        for record in self.block_records.iter() {
            for entity in record.entities.iter() {
                let layer = entity.as_entity().layer();
                if !self.layers.contains(layer) {
                    dangling.push(format!(
                        "entity {} references missing layer '{}'",
                        entity.as_entity().handle(),
                        layer
                    ));
                }
                match entity {
                    EntityType::Insert(insert) => {
                        if let RecordRef::Named(name) = &insert.block {
                            if !self.block_records.contains(name) {
                                dangling.push(format!(
                                    "insert {} references missing block '{}'",
                                    insert.common.handle, name
                                ));
                            }
                        }
                    }
                    EntityType::AlignedDimension(dimension) => {
                        if let RecordRef::Named(name) = &dimension.style {
                            if !self.dim_styles.contains(name) {
                                dangling.push(format!(
                                    "dimension {} references missing style '{}'",
                                    dimension.common.handle, name
                                ));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        let count = dangling.len();
        for message in dangling {
            self.notifications
                .notify(NotificationType::Warning, message);
        }
        count
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line, Point};
    use crate::types::Vector3;

    #[test]
    fn test_new_document_seeds_defaults() {
        let doc = CadDocument::new();
        assert!(doc.layers.contains(Layer::DEFAULT_NAME));
        assert_eq!(doc.line_types.len(), 3);
        assert!(doc.text_styles.contains("Standard"));
        assert!(doc.dim_styles.contains("Standard"));
        assert!(doc.app_ids.contains("ACAD"));
        assert!(doc.model_space().is_some());
        assert!(doc.paper_space().is_some());
        // 1 layer + 3 line types + 2 styles + 1 app id + 2 block records
        assert_eq!(doc.object_count(), 9);
        assert!(doc.next_handle() > 0x10);
    }

    #[test]
    fn test_add_entity_assigns_handle() {
        let mut doc = CadDocument::new();
        let handle = doc
            .add_entity(EntityType::Line(Line::new(Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0))))
            .ok()
            .unwrap();
        assert!(handle.is_valid());
        assert!(doc.is_registered(handle));

        let entity = doc.get_entity(handle).unwrap();
        assert_eq!(entity.as_entity().document(), Some(doc.id()));
        let model_handle = doc.model_space().unwrap().handle();
        assert_eq!(entity.as_entity().owner(), model_handle);
    }

    #[test]
    fn test_remove_entity_detaches_but_keeps_handle() {
        let mut doc = CadDocument::new();
        let handle = doc
            .add_entity(EntityType::Point(Point::from_coords(1.0, 2.0, 3.0)))
            .ok()
            .unwrap();
        let before = doc.object_count();

        let removed = doc.remove_entity(handle).ok().unwrap();
        assert_eq!(removed.as_entity().handle(), handle);
        assert_eq!(removed.as_entity().document(), None);
        assert_eq!(removed.as_entity().owner(), Handle::NULL);
        assert!(!doc.is_registered(handle));
        assert_eq!(doc.object_count(), before - 1);
        assert!(doc.get_entity(handle).is_none());
    }

    #[test]
    fn test_remove_entity_twice_reports_not_attached() {
        let mut doc = CadDocument::new();
        let handle = doc
            .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
            .ok()
            .unwrap();
        doc.remove_entity(handle).ok().unwrap();
        match doc.remove_entity(handle) {
            Err(CadError::NotAttached(value)) => assert_eq!(value, handle.value()),
            other => panic!("expected NotAttached, got {:?}", other),
        }
    }

    #[test]
    fn test_attach_to_second_document_fails() {
        let mut first = CadDocument::new();
        let handle = first
            .add_entity(EntityType::Circle(Circle::new(Vector3::ZERO, 2.0)))
            .ok()
            .unwrap();
        let attached = first.get_entity(handle).unwrap().clone();

        let mut second = CadDocument::new();
        match second.add_entity(attached) {
            Err(CadError::AlreadyAttached(value)) => assert_eq!(value, handle.value()),
            other => panic!("expected AlreadyAttached, got {:?}", other),
        }
    }

    #[test]
    fn test_reattach_after_detach_keeps_handle() {
        let mut doc = CadDocument::new();
        let handle = doc
            .add_entity(EntityType::Point(Point::from_coords(4.0, 5.0, 6.0)))
            .ok()
            .unwrap();
        let removed = doc.remove_entity(handle).ok().unwrap();
        let again = doc.add_entity(removed).ok().unwrap();
        assert_eq!(again, handle);
        assert!(doc.notifications.is_empty());
    }

    #[test]
    fn test_handle_collision_gets_fresh_handle_and_warning() {
        let mut doc = CadDocument::new();
        let first = doc
            .add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
            .ok()
            .unwrap();

        let mut copy = Point::from_coords(9.0, 9.0, 9.0);
        copy.common.handle = first;
        let second = doc.add_entity(EntityType::Point(copy)).ok().unwrap();
        assert_ne!(second, first);
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_duplicate_layer_name_rejected() {
        let mut doc = CadDocument::new();
        doc.add_layer(Layer::new("Walls")).ok().unwrap();
        match doc.add_layer(Layer::new("WALLS")) {
            Err(CadError::DuplicateName(name)) => assert_eq!(name, "WALLS"),
            other => panic!("expected DuplicateName, got {:?}", other),
        }
    }

    #[test]
    fn test_model_space_rejects_structural_records() {
        let mut doc = CadDocument::new();
        let vertex = crate::entities::Vertex3D::new(Vector3::ZERO);
        let before = doc.object_count();
        match doc.add_entity(EntityType::Vertex3D(vertex)) {
            Err(CadError::InvalidMemberType { .. }) => {}
            other => panic!("expected InvalidMemberType, got {:?}", other),
        }
        assert_eq!(doc.object_count(), before);
    }

    #[test]
    fn test_take_and_put_round_trips() {
        let mut doc = CadDocument::new();
        doc.add_entity(EntityType::Point(Point::from_coords(0.0, 0.0, 0.0)))
            .ok()
            .unwrap();
        let handle = doc
            .add_entity(EntityType::Line(Line::new(Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0))))
            .ok()
            .unwrap();
        let count = doc.object_count();

        let (placement, entity) = doc.take_entity(handle).ok().unwrap();
        assert_eq!(placement.block_name(), BlockRecord::MODEL_SPACE_NAME);
        assert_eq!(placement.index(), 1);
        assert!(!doc.is_registered(handle));

        let back = doc.put_entity(placement, entity).ok().unwrap();
        assert_eq!(back, handle);
        assert_eq!(doc.object_count(), count);
        let model = doc.model_space().unwrap();
        assert_eq!(model.entities.position_of(handle), Some(1));
    }

    #[test]
    fn test_remove_standard_block_rejected() {
        let mut doc = CadDocument::new();
        assert!(doc.remove_block_record(BlockRecord::MODEL_SPACE_NAME).is_err());
        assert!(doc.model_space().is_some());
    }

    #[test]
    fn test_polyline_attach_registers_whole_tree() {
        let mut doc = CadDocument::new();
        let before = doc.object_count();
        let mut polyline = crate::entities::Polyline3D::new();
        polyline.add_vertex(Vector3::new(0.0, 0.0, 0.0));
        polyline.add_vertex(Vector3::new(1.0, 0.0, 0.0));
        polyline.add_vertex(Vector3::new(1.0, 1.0, 0.0));
        let handle = doc
            .add_entity(EntityType::Polyline3D(polyline))
            .ok()
            .unwrap();
        // polyline + 3 vertices + seqend
        assert_eq!(doc.object_count(), before + 5);

        match doc.get_entity(handle) {
            Some(EntityType::Polyline3D(polyline)) => {
                for vertex in polyline.vertices.iter() {
                    assert_eq!(vertex.as_entity().owner(), handle);
                    assert!(doc.is_registered(vertex.as_entity().handle()));
                }
                assert_eq!(polyline.vertices.seqend().common.owner, handle);
            }
            other => panic!("expected a polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_references_reports_dangling_layer() {
        let mut doc = CadDocument::new();
        let mut point = Point::from_coords(0.0, 0.0, 0.0);
        point.common.layer = "Ghost".to_string();
        doc.add_entity(EntityType::Point(point)).ok().unwrap();
        assert_eq!(doc.resolve_references(), 1);
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }
}
