use std::collections::HashMap;

use crate::model::{Cluster, DuplicateCandidate};

/// Disjoint-set forest over input indices.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Connected components of the candidate graph over `n` records.
///
/// Only records touched by at least one candidate belong to a cluster.
/// Clusters are numbered in order of their lowest member index, which is
/// also the order in which `i < j` pair enumeration first reaches them.
pub fn build_clusters(n: usize, candidates: &[DuplicateCandidate]) -> Vec<Cluster> {
    let mut uf = UnionFind::new(n);
    let mut linked = vec![false; n];
    for c in candidates {
        uf.union(c.a, c.b);
        linked[c.a] = true;
        linked[c.b] = true;
    }

    let mut by_root: HashMap<usize, usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();
    for index in (0..n).filter(|&i| linked[i]) {
        let root = uf.find(index);
        let id = *by_root.entry(root).or_insert_with(|| {
            clusters.push(Cluster {
                id: clusters.len(),
                members: Vec::new(),
            });
            clusters.len() - 1
        });
        clusters[id].members.push(index);
    }
    clusters
}
