//! Grow-only spatial index over absolute bounding boxes.
//!
//! Uses a static geo-index R-tree for the first bulk-loaded batch and a
//! dynamic rstar R-tree for every later batch. Items are stored in
//! insertion order and ids are stable (id == seq index). Placements are
//! never removed or updated within a tile pass, so there is no deletion
//! path.

use geo_index::rtree::sort::HilbertSort;
use geo_index::rtree::{RTree as GeoRTree, RTreeBuilder, RTreeIndex};
use rstar::{AABB, RTree, RTreeObject};

use crate::geom::{Aabb, Bounded};

/// Dynamic-tree node: id plus the indexed box.
#[derive(Clone, Debug)]
struct IndexNode {
    id: usize,
    bounds: Aabb,
}

impl RTreeObject for IndexNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x1, self.bounds.y1],
            [self.bounds.x2, self.bounds.y2],
        )
    }
}

pub struct SpatialIndex<T> {
    /// Items in insertion order (id == index)
    seq: Vec<T>,
    /// Static spatial index for the first bulk-loaded batch
    static_tree: Option<GeoRTree<f64>>,
    /// Count of items in the static tree (ids 0..static_count)
    static_count: usize,
    /// Dynamic spatial index for everything loaded afterwards
    dynamic_tree: RTree<IndexNode>,
}

impl<T: Bounded> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            seq: Vec::new(),
            static_tree: None,
            static_count: 0,
            dynamic_tree: RTree::new(),
        }
    }

    /// Adds a batch of objects to the index.
    ///
    /// The first non-empty batch is bulk-loaded into a Hilbert-sorted
    /// static tree; later batches go to the dynamic tree.
    pub fn extend(&mut self, objs: impl IntoIterator<Item = T>) {
        let items: Vec<T> = objs.into_iter().collect();
        if items.is_empty() {
            return;
        }

        let start_idx = self.seq.len();
        self.seq.reserve(items.len());

        let mut nodes = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let id = start_idx + i;
            let bounds = item.bounds();
            self.seq.push(item);
            nodes.push(IndexNode { id, bounds });
        }

        if start_idx == 0 && self.static_tree.is_none() {
            let mut builder: RTreeBuilder<f64> = RTreeBuilder::new(nodes.len() as u32);
            for node in &nodes {
                builder.add(node.bounds.x1, node.bounds.y1, node.bounds.x2, node.bounds.y2);
            }
            self.static_tree = Some(builder.finish::<HilbertSort>());
            self.static_count = nodes.len();
        } else {
            for node in nodes {
                self.dynamic_tree.insert(node);
            }
        }
    }

    /// Finds objects whose box intersects the query box, returning
    /// (id, object) pairs with static-tree hits first. Touching edges
    /// count as intersections.
    pub fn search(&self, query: &Aabb) -> Vec<(usize, &T)> {
        let mut result = Vec::with_capacity(16);

        if let Some(tree) = &self.static_tree {
            for id in tree.search(query.x1, query.y1, query.x2, query.y2) {
                result.push((id as usize, &self.seq[id as usize]));
            }
        }

        let env = AABB::from_corners([query.x1, query.y1], [query.x2, query.y2]);
        for node in self.dynamic_tree.locate_in_envelope_intersecting(&env) {
            result.push((node.id, &self.seq[node.id]));
        }

        result
    }

    /// Returns the number of objects in the index.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Returns an iterator over all objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.seq.iter()
    }
}

impl<T: Bounded> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
