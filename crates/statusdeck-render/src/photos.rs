//! Name to photo asset mapping

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use statusdeck_core::{normalize_name, AssetRef, PhotoLookup};

/// A configured table of member photos.
///
/// Names are matched trimmed and case-insensitively, like roster names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, AssetRef>", into = "HashMap<String, AssetRef>")]
pub struct PhotoDirectory {
    entries: HashMap<String, AssetRef>,
}

impl PhotoDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a photo for a person
    pub fn insert(&mut self, name: &str, asset: impl Into<AssetRef>) {
        self.entries.insert(normalize_name(name), asset.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, asset: impl Into<AssetRef>) -> Self {
        self.insert(name, asset);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, AssetRef>> for PhotoDirectory {
    fn from(map: HashMap<String, AssetRef>) -> Self {
        map.into_iter()
            .fold(Self::new(), |dir, (name, asset)| dir.with(&name, asset))
    }
}

impl From<PhotoDirectory> for HashMap<String, AssetRef> {
    fn from(dir: PhotoDirectory) -> Self {
        dir.entries
    }
}

impl PhotoLookup for PhotoDirectory {
    fn lookup_photo(&self, name: &str) -> Option<AssetRef> {
        self.entries.get(&normalize_name(name)).cloned()
    }
}
