use crate::bucket::{STYLE_BUCKET_ORDERING, StyleBucket};
use std::collections::HashMap;

/// Bucket → style container cache for one document session.
///
/// Filled only by the resolver; entries are never removed or replaced.
#[derive(Debug, Clone)]
pub struct RendererState<E> {
    style_elements: HashMap<StyleBucket, E>,
}

impl<E> Default for RendererState<E> {
    fn default() -> Self {
        Self {
            style_elements: HashMap::new(),
        }
    }
}

impl<E: Copy> RendererState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: StyleBucket) -> Option<E> {
        self.style_elements.get(&bucket).copied()
    }

    pub fn contains(&self, bucket: StyleBucket) -> bool {
        self.style_elements.contains_key(&bucket)
    }

    pub fn len(&self) -> usize {
        self.style_elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.style_elements.is_empty()
    }

    /// Cached containers in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleBucket, E)> + '_ {
        STYLE_BUCKET_ORDERING
            .iter()
            .filter_map(|bucket| Some((*bucket, self.get(*bucket)?)))
    }

    /// Record a container for a bucket that has none yet.
    pub(crate) fn insert(&mut self, bucket: StyleBucket, element: E) {
        self.style_elements.entry(bucket).or_insert(element);
    }
}
