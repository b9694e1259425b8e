use itertools::Itertools;

use crate::{
    error::InvalidInputError,
    matrix::DistanceMatrix,
    node::{Node, NodeSet},
    tour::Tour,
    Cost,
};

/// Largest instance `held_karp` accepts. The memo table holds `2^(n-1) * (n-1)` entries.
pub const MAX_NODES: usize = 22;

/// Bytes of memo table `held_karp` allocates for `n` nodes.
pub fn memo_size_in_bytes(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let stride = n - 1;
    (1usize << stride) * stride * (std::mem::size_of::<Cost>() + std::mem::size_of::<u8>())
}

/// Flat memo table with one slot per `(visited set, last node)` pair.
///
/// Each slot holds the cheapest way found to start at the start node, visit the set and end at
/// its last node, together with the node visited just before. The start node is never part of a
/// visited set, so bit 0 of every key is dropped and the remaining `n - 1` bits are combined with
/// the last node into a single index.
struct MemoTable {
    stride: usize,
    costs: Vec<Cost>,
    predecessors: Vec<u8>,
}

impl MemoTable {
    fn new(n: usize) -> Self {
        debug_assert!(n <= MAX_NODES);
        let stride = n - 1;
        let len = (1usize << stride) * stride;
        MemoTable {
            stride,
            costs: vec![Cost::zero(); len],
            predecessors: vec![0; len],
        }
    }

    fn index(&self, visited: NodeSet, last: Node) -> usize {
        debug_assert!(visited.contains(&last));
        debug_assert!(!visited.contains(&Node::start()));
        (visited.bits() >> 1) as usize * self.stride + (last.id() - 1)
    }

    fn cost(&self, visited: NodeSet, last: Node) -> Cost {
        self.costs[self.index(visited, last)]
    }

    fn predecessor(&self, visited: NodeSet, last: Node) -> Node {
        Node::new(self.predecessors[self.index(visited, last)] as usize)
    }

    fn set(&mut self, visited: NodeSet, last: Node, cost: Cost, predecessor: Node) {
        let idx = self.index(visited, last);
        self.costs[idx] = cost;
        self.predecessors[idx] = predecessor.id() as u8;
    }
}

/// Computes an optimal tour starting and ending at node 0 with the Held-Karp algorithm.
///
/// Ties between equally expensive partial tours are broken towards the predecessor with the
/// lowest id, and ties between closing nodes towards the closing node with the lowest id, so the
/// result only depends on `dists`.
///
/// Runs in `O(n^2 * 2^n)` time and `O(n * 2^n)` space. Instances with a single node yield the
/// trivial tour of cost zero.
pub fn held_karp(dists: &DistanceMatrix) -> Result<Tour, InvalidInputError> {
    let n = dists.n();
    if n > MAX_NODES {
        return Err(InvalidInputError::TooManyNodes { n, max: MAX_NODES });
    }
    if n < 2 {
        return Ok(Tour::trivial());
    }

    log::info!("Start computing optimal tour on {} nodes by Held-Karp.", n);
    log::debug!("Memo table takes {} bytes.", memo_size_in_bytes(n));

    let start = Node::start();
    let mut memo = MemoTable::new(n);

    for k in (1..n).map(Node::new) {
        memo.set(NodeSet::singleton(k), k, dists.distance(start, k), start);
    }

    for subset_size in 2..n {
        log::debug!("Expanding subsets of size {}/{}.", subset_size, n - 1);

        for subset in (1..n).map(Node::new).combinations(subset_size) {
            let visited: NodeSet = subset.iter().copied().collect();
            for &k in &subset {
                let prev = visited.without(k);
                let best = prev
                    .iter()
                    .map(|m| (memo.cost(prev, m) + dists.distance(m, k), m))
                    .min();
                if let Some((cost, predecessor)) = best {
                    memo.set(visited, k, cost, predecessor);
                }
            }
        }
    }

    let full = NodeSet::range(1, n);
    let best = full
        .iter()
        .map(|k| (memo.cost(full, k) + dists.distance(k, start), k))
        .min();
    let (cost, last) = match best {
        Some(best) => best,
        None => return Ok(Tour::trivial()),
    };

    let mut path: Vec<Node> = Vec::with_capacity(n);
    let mut visited = full;
    let mut current = last;
    for _ in 1..n {
        path.push(current);
        let predecessor = memo.predecessor(visited, current);
        visited.remove(current);
        current = predecessor;
    }
    debug_assert_eq!(current, start);
    path.push(start);
    path.reverse();

    log::info!("Finished computing optimal tour. Cost: {}", cost);

    Ok(Tour::new(path, cost))
}
