//! Read-only merged views over layered resources.
//!
//! A [`ResourceFilter`] returns every resource that matches a `(language, id)`
//! request, ordered from lowest to highest priority. A [`Selector`] combines
//! such a list into one [`ResourceView`] according to a [`ViewStrategy`]:
//!
//! - **Compound lists** are merged block by block. Block `i` of the view comes
//!   from the highest-priority resource that holds a non-empty block `i`, so an
//!   empty block in an upper layer lets the lower layers show through.
//! - **Everything else** is taken from the highest-priority resource as a whole.

use crate::error::{Error, Result};
use crate::id::ResourceId;
use crate::info::ResourceInfoTable;
use crate::language::Language;
use crate::resource::{ContentType, Resource, ResourceMeta};
use xxhash_rust::xxh3::Xxh3;

/// Source of layered resources.
pub trait ResourceFilter {
    /// All resources matching the request, lowest priority first.
    fn filter(&self, lang: Language, id: ResourceId) -> Vec<&Resource>;
}

/// Decides how layered resources are merged into a view.
pub trait ViewStrategy {
    fn is_compound_list(&self, id: ResourceId) -> bool;
}

impl ViewStrategy for ResourceInfoTable {
    fn is_compound_list(&self, id: ResourceId) -> bool {
        self.info(id).map(|info| info.list).unwrap_or(false)
    }
}

/// Strategy without any list knowledge: the top layer always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLayerStrategy;

impl ViewStrategy for TopLayerStrategy {
    fn is_compound_list(&self, _id: ResourceId) -> bool {
        false
    }
}

/// Selects merged views of resources for one language.
pub struct Selector<'a> {
    pub lang: Language,
    pub from: &'a dyn ResourceFilter,
    pub strategy: &'a dyn ViewStrategy,
}

impl<'a> Selector<'a> {
    pub fn new(
        lang: Language,
        from: &'a dyn ResourceFilter,
        strategy: &'a dyn ViewStrategy,
    ) -> Self {
        Self {
            lang,
            from,
            strategy,
        }
    }

    /// Returns the merged view of the identified resource.
    pub fn select(&self, id: ResourceId) -> Result<ResourceView<'a>> {
        let layers = self.from.filter(self.lang, id);
        let Some(&top) = layers.last() else {
            return Err(Error::ResourceNotFound(id));
        };
        let meta = top.meta();

        if self.strategy.is_compound_list(id) {
            let block_count = layers.iter().map(|res| res.block_count()).max().unwrap_or(0);
            let blocks = (0..block_count)
                .map(|index| {
                    layers
                        .iter()
                        .rev()
                        .copied()
                        .filter_map(|res: &'a Resource| res.block(index).ok())
                        .find(|block| !block.is_empty())
                        .unwrap_or(&[])
                })
                .collect();
            Ok(ResourceView { meta, blocks })
        } else {
            Ok(ResourceView {
                meta,
                blocks: top.blocks().iter().map(Vec::as_slice).collect(),
            })
        }
    }
}

/// A resolved, read-only view of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceView<'a> {
    meta: ResourceMeta,
    blocks: Vec<&'a [u8]>,
}

impl<'a> ResourceView<'a> {
    pub fn meta(&self) -> ResourceMeta {
        self.meta
    }

    pub fn compound(&self) -> bool {
        self.meta.compound
    }

    pub fn content_type(&self) -> ContentType {
        self.meta.content_type
    }

    pub fn compressed(&self) -> bool {
        self.meta.compressed
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, index: usize) -> Result<&'a [u8]> {
        self.blocks
            .get(index)
            .copied()
            .ok_or(Error::BlockIndexOutOfRange {
                index,
                count: self.blocks.len(),
            })
    }

    pub fn blocks(&self) -> &[&'a [u8]] {
        &self.blocks
    }

    /// xxh3 hash over meta information and all blocks.
    ///
    /// Two views with equal fingerprints are treated as equal content when
    /// deciding which resources a modification actually changed.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&[
            self.meta.compound as u8,
            self.meta.content_type.code(),
            self.meta.compressed as u8,
        ]);
        hasher.update(&(self.blocks.len() as u64).to_le_bytes());
        for block in &self.blocks {
            hasher.update(&(block.len() as u64).to_le_bytes());
            hasher.update(block);
        }
        hasher.digest()
    }
}
