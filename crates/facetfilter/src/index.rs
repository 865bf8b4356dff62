//! # Item Index
//!
//! A read-only view over the items currently listed on the page, in listing
//! order. The index is rebuilt from the port on every application; nothing in
//! the engine keeps it across operations.

use crate::model::{Item, ItemId};

#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    items: Vec<Item>,
}

impl ItemIndex {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for ItemIndex {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
