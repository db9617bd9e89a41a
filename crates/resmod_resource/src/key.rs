use crate::id::ResourceId;
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses one block of one resource in one language.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    pub lang: Language,
    pub id: ResourceId,
    pub index: usize,
}

impl ResourceKey {
    pub fn new(lang: Language, id: ResourceId, index: usize) -> Self {
        Self { lang, id, index }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]@{}", self.id, self.index, self.lang)
    }
}
