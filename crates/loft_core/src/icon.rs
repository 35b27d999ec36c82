//! Icon catalog
//!
//! The set of drawable variants a flying sprite can display. Icons are opaque
//! references with intrinsic dimensions; resolving an `ImageId` to actual
//! pixels is the host's concern. The catalog is read-only to the engine and
//! may be swapped wholesale at runtime, taking effect on the next spawn.

use crate::geometry::Size;

/// Opaque reference to a drawable resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(pub u64);

impl ImageId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One drawable variant with its intrinsic dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icon {
    pub image: ImageId,
    pub intrinsic: Size,
}

impl Icon {
    pub const fn new(image: ImageId, intrinsic: Size) -> Self {
        Self { image, intrinsic }
    }
}

/// An ordered, possibly empty set of icons.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    icons: Vec<Icon>,
}

impl IconCatalog {
    pub fn new(icons: Vec<Icon>) -> Self {
        Self { icons }
    }

    /// A catalog with no icons. Spawning against it is a benign no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from `(image, intrinsic size)` pairs.
    pub fn from_intrinsic_sizes<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ImageId, Size)>,
    {
        Self {
            icons: entries
                .into_iter()
                .map(|(image, intrinsic)| Icon::new(image, intrinsic))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Icon> {
        self.icons.get(index)
    }

    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }
}
