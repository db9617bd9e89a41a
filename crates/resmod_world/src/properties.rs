//! Fixed-size property tables of textures and game objects.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Properties of one wall/floor texture.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureProperties {
    pub family: u8,
    pub target: u8,
    pub resilience: u8,
    pub distance_modifier: u16,
    pub climbable: bool,
    pub transparency_control: u8,
    pub animation_group: u8,
    pub animation_index: u8,
}

/// Identifies a type of game object.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectTriple {
    pub class: u8,
    pub subclass: u8,
    pub kind: u8,
}

impl ObjectTriple {
    pub fn new(class: u8, subclass: u8, kind: u8) -> Self {
        Self {
            class,
            subclass,
            kind,
        }
    }
}

impl fmt::Display for ObjectTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.class, self.subclass, self.kind)
    }
}

/// Properties of one object type, kept as the raw encoded sections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectProperties {
    /// Properties shared by all objects.
    pub common: Vec<u8>,
    /// Properties shared by the class.
    pub generic: Vec<u8>,
    /// Properties specific to the object type.
    pub specific: Vec<u8>,
    /// Render properties.
    pub render: Vec<u8>,
}

/// Texture properties addressed by texture index.
///
/// The table size is set at construction and never changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TexturePropertiesTable {
    entries: Vec<TextureProperties>,
}

impl TexturePropertiesTable {
    pub fn new(count: usize) -> Self {
        Self {
            entries: vec![TextureProperties::default(); count],
        }
    }

    /// Table of given size, taking as many entries from `entries` as fit.
    pub fn with_entries(count: usize, entries: &[TextureProperties]) -> Self {
        let mut table = Self::new(count);
        for (slot, properties) in table.entries.iter_mut().zip(entries) {
            *slot = *properties;
        }
        table
    }

    pub fn get(&self, index: usize) -> Option<&TextureProperties> {
        self.entries.get(index)
    }

    pub fn set(&mut self, index: usize, properties: TextureProperties) -> Result<()> {
        let count = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(Error::TextureIndexOutOfRange { index, count })?;
        *slot = properties;
        Ok(())
    }

    pub fn entries(&self) -> &[TextureProperties] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Object properties addressed by object triple.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectPropertiesTable {
    entries: BTreeMap<ObjectTriple, ObjectProperties>,
}

impl ObjectPropertiesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, triple: ObjectTriple) -> Option<&ObjectProperties> {
        self.entries.get(&triple)
    }

    pub fn set(&mut self, triple: ObjectTriple, properties: ObjectProperties) {
        self.entries.insert(triple, properties);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectTriple, &ObjectProperties)> {
        self.entries.iter().map(|(triple, props)| (*triple, props))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ObjectTriple, ObjectProperties)> for ObjectPropertiesTable {
    fn from_iter<T: IntoIterator<Item = (ObjectTriple, ObjectProperties)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_table_bounds() {
        let mut table = TexturePropertiesTable::new(2);
        let props = TextureProperties {
            climbable: true,
            ..Default::default()
        };

        table.set(1, props).unwrap();
        assert!(table.get(1).unwrap().climbable);

        let err = table.set(2, props).unwrap_err();
        assert!(matches!(
            err,
            Error::TextureIndexOutOfRange { index: 2, count: 2 }
        ));
    }

    #[test]
    fn test_texture_table_with_entries_keeps_size() {
        let props = TextureProperties {
            family: 3,
            ..Default::default()
        };
        let table = TexturePropertiesTable::with_entries(2, &[props, props, props]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().family, 3);

        let table = TexturePropertiesTable::with_entries(4, &[props]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(3).unwrap().family, 0);
    }

    #[test]
    fn test_object_table() {
        let mut table = ObjectPropertiesTable::new();
        let triple = ObjectTriple::new(1, 2, 3);
        assert!(table.get(triple).is_none());

        table.set(
            triple,
            ObjectProperties {
                specific: vec![0xAA],
                ..Default::default()
            },
        );
        assert_eq!(table.get(triple).unwrap().specific, vec![0xAA]);
        assert_eq!(triple.to_string(), "1/2/3");
    }
}
