use crate::feature::{FeatureId, FeatureSignature, LlahFeature};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug)]
struct Bucket {
    head: FeatureId,
    tail: FeatureId,
    len: u32,
}

/// Chaining hash index from hash code to the features sharing it.
///
/// Records are kept contiguously in an arena; each bucket stores the first
/// and last record of its chain so appends are O(1). Long chains only cost
/// lookup time, matching still requires exact invariant equality.
#[derive(Clone, Debug, Default)]
pub struct LlahHashTable {
    features: Vec<LlahFeature>,
    buckets: HashMap<u32, Bucket>,
}

impl LlahHashTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `feature` to the end of its bucket's chain.
    pub fn add(&mut self, mut feature: LlahFeature) -> FeatureId {
        let id = FeatureId(self.features.len() as u32);
        feature.next = None;
        let hash_code = feature.hash_code;
        self.features.push(feature);
        match self.buckets.get_mut(&hash_code) {
            Some(bucket) => {
                self.features[bucket.tail.index()].next = Some(id);
                bucket.tail = id;
                bucket.len += 1;
            }
            None => {
                self.buckets.insert(
                    hash_code,
                    Bucket {
                        head: id,
                        tail: id,
                        len: 1,
                    },
                );
            }
        }
        id
    }

    /// First record of the chain for `hash_code`.
    pub fn lookup(&self, hash_code: u32) -> Option<&LlahFeature> {
        self.buckets
            .get(&hash_code)
            .map(|bucket| &self.features[bucket.head.index()])
    }

    /// Walks every record sharing `hash_code`, in insertion order.
    pub fn chain(&self, hash_code: u32) -> Chain<'_> {
        Chain {
            table: self,
            cursor: self.buckets.get(&hash_code).map(|b| b.head),
        }
    }

    /// Records whose hash code and invariants both equal `signature`.
    pub fn matching<'a>(
        &'a self,
        signature: &'a FeatureSignature,
    ) -> impl Iterator<Item = &'a LlahFeature> + 'a {
        self.chain(signature.hash_code)
            .filter(move |f| signature.invariants_match(&f.invariants))
    }

    pub fn get(&self, id: FeatureId) -> Option<&LlahFeature> {
        self.features.get(id.index())
    }

    pub fn chain_len(&self, hash_code: u32) -> usize {
        self.buckets
            .get(&hash_code)
            .map(|b| b.len as usize)
            .unwrap_or(0)
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of distinct hash codes in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Forgets every record. Only used when all documents are cleared.
    pub fn reset(&mut self) {
        self.features.clear();
        self.buckets.clear();
    }
}

/// Iterator over one collision chain.
pub struct Chain<'a> {
    table: &'a LlahHashTable,
    cursor: Option<FeatureId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a LlahFeature;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let feature = &self.table.features[id.index()];
        self.cursor = feature.next;
        Some(feature)
    }
}
