//! Disjoint-set forest over provisional labels.
//!
//! Slot 0 stands for background and is never merged. Union by rank keeps the
//! trees shallow; `find` compresses every visited path onto its root.
use crate::error::SegmentationError;

#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self {
            parent: vec![0],
            rank: vec![0],
        }
    }

    /// Number of provisional labels allocated so far.
    pub fn len(&self) -> u32 {
        (self.parent.len() - 1) as u32
    }

    /// Allocate a fresh singleton label, refusing to go past `limit`.
    pub fn make_set(&mut self, limit: u32) -> Result<u32, SegmentationError> {
        let next = self.parent.len();
        if next > limit as usize {
            return Err(SegmentationError::LabelOverflow { limit });
        }
        self.parent.push(next as u32);
        self.rank.push(0);
        Ok(next as u32)
    }

    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`; returns the surviving root.
    pub fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (rank_a, rank_b) = (self.rank[ra as usize], self.rank[rb as usize]);
        if rank_a < rank_b {
            self.parent[ra as usize] = rb;
            rb
        } else {
            self.parent[rb as usize] = ra;
            if rank_a == rank_b {
                self.rank[ra as usize] += 1;
            }
            ra
        }
    }

    /// Append the labels of `other` after ours, shifting them by the returned
    /// offset. Equivalences inside `other` are carried over.
    pub fn append(&mut self, other: &UnionFind) -> u32 {
        let offset = self.len();
        self.parent
            .extend(other.parent[1..].iter().map(|&p| p + offset));
        self.rank.extend_from_slice(&other.rank[1..]);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_find_track_equivalence() {
        let mut uf = UnionFind::new();
        let labels: Vec<u32> = (0..5).map(|_| uf.make_set(u32::MAX).unwrap()).collect();
        assert_eq!(labels, vec![1, 2, 3, 4, 5]);
        uf.union(1, 3);
        uf.union(3, 5);
        assert_eq!(uf.find(5), uf.find(1));
        assert_ne!(uf.find(2), uf.find(1));
        assert_ne!(uf.find(4), uf.find(2));
    }

    #[test]
    fn make_set_respects_limit() {
        let mut uf = UnionFind::new();
        uf.make_set(2).unwrap();
        uf.make_set(2).unwrap();
        assert_eq!(
            uf.make_set(2),
            Err(SegmentationError::LabelOverflow { limit: 2 })
        );
    }

    #[test]
    fn append_offsets_labels_and_keeps_sets() {
        let mut a = UnionFind::new();
        a.make_set(10).unwrap();
        let mut b = UnionFind::new();
        b.make_set(10).unwrap();
        b.make_set(10).unwrap();
        b.union(1, 2);
        let offset = a.append(&b);
        assert_eq!(offset, 1);
        assert_eq!(a.len(), 3);
        assert_eq!(a.find(2), a.find(3));
        assert_ne!(a.find(1), a.find(2));
    }
}
