//! Named symbol tables and table-record references

use crate::error::{CadError, Result};
use crate::object::CadObject;
use indexmap::IndexMap;

pub mod appid;
pub mod block_record;
pub mod dimstyle;
pub mod layer;
pub mod linetype;
pub mod textstyle;

pub use appid::AppId;
pub use block_record::{BlockFlags, BlockRecord};
pub use dimstyle::DimStyle;
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};
pub use textstyle::TextStyle;

/// Base trait for all table records
pub trait TableEntry: CadObject {
    /// Get the record's name
    fn name(&self) -> &str;

    /// Set the record's name
    fn set_name(&mut self, name: String);

    /// Check if this is a standard/default record
    fn is_standard(&self) -> bool {
        false
    }
}

/// Generic table of named records
///
/// Names are unique per table and matched case-insensitively; enumeration
/// preserves insertion order.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add a record, rejecting duplicate names
    pub fn add(&mut self, entry: T) -> Result<()> {
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(CadError::DuplicateName(entry.name().to_string()));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Get a record by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable record by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Remove a record by name (case-insensitive)
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    /// Check if a record exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterate over all records mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    /// Get all record names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference slot for a named table record
///
/// An attached object refers to its record by name and the document's table
/// owns the single authoritative copy. A detached object carries a private
/// document-free clone instead, so it stays self-contained while outside any
/// document. The owning document flips the slot between the two states on
/// attach and detach.
#[derive(Debug, Clone)]
pub enum RecordRef<T: TableEntry> {
    /// Resolved by name against the owning document's table
    Named(String),
    /// Private clone carried by a detached object
    Owned(Box<T>),
}

impl<T: TableEntry> RecordRef<T> {
    /// The referenced record's name, whichever state the slot is in
    pub fn name(&self) -> &str {
        match self {
            RecordRef::Named(name) => name,
            RecordRef::Owned(record) => record.name(),
        }
    }

    /// Check if the slot currently resolves through a document table
    pub fn is_named(&self) -> bool {
        matches!(self, RecordRef::Named(_))
    }

    /// The private clone, if the slot carries one
    pub fn owned(&self) -> Option<&T> {
        match self {
            RecordRef::Named(_) => None,
            RecordRef::Owned(record) => Some(record),
        }
    }

    /// Mutable access to the private clone, if the slot carries one
    pub fn owned_mut(&mut self) -> Option<&mut T> {
        match self {
            RecordRef::Named(_) => None,
            RecordRef::Owned(record) => Some(record),
        }
    }

    /// Collapse the slot to a by-name reference, handing back the clone it
    /// previously carried (if any)
    pub fn make_named(&mut self) -> Option<Box<T>> {
        match self {
            RecordRef::Named(_) => None,
            RecordRef::Owned(record) => {
                let name = record.name().to_string();
                match std::mem::replace(self, RecordRef::Named(name)) {
                    RecordRef::Owned(record) => Some(record),
                    RecordRef::Named(_) => None,
                }
            }
        }
    }

    /// Replace the slot with a private clone of the given record
    pub fn make_owned(&mut self, record: T) {
        *self = RecordRef::Owned(Box::new(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        table.add(Layer::new("Walls")).unwrap();

        assert!(table.contains("Walls"));
        assert!(table.contains("walls"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("WALLS").unwrap().name(), "Walls");
    }

    #[test]
    fn test_table_duplicate_entry() {
        let mut table = Table::new();
        table.add(Layer::new("Walls")).unwrap();

        let err = table.add(Layer::new("walls")).unwrap_err();
        assert!(matches!(err, CadError::DuplicateName(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_remove() {
        let mut table = Table::new();
        table.add(Layer::new("Walls")).unwrap();

        let removed = table.remove("walls");
        assert!(removed.is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_iteration_order() {
        let mut table = Table::new();
        table.add(Layer::new("B")).unwrap();
        table.add(Layer::new("A")).unwrap();
        table.add(Layer::new("C")).unwrap();

        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_record_ref_states() {
        let mut slot: RecordRef<Layer> = RecordRef::Named("Walls".to_string());
        assert!(slot.is_named());
        assert_eq!(slot.name(), "Walls");
        assert!(slot.owned().is_none());
        assert!(slot.make_named().is_none());

        slot.make_owned(Layer::new("Walls"));
        assert!(!slot.is_named());
        assert_eq!(slot.name(), "Walls");
        assert!(slot.owned().is_some());

        let taken = slot.make_named();
        assert_eq!(taken.unwrap().name(), "Walls");
        assert!(slot.is_named());
        assert_eq!(slot.name(), "Walls");
    }
}
