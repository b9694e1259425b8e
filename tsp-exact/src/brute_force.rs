use itertools::Itertools;

use crate::{error::InvalidInputError, matrix::DistanceMatrix, node::Node, tour::Tour};

/// Largest instance `brute_force` accepts.
pub const MAX_BRUTE_FORCE_NODES: usize = 10;

/// Computes an optimal tour by trying all `(n-1)!` orders of the nodes other than the start node.
///
/// Orders are tried in lexicographic order and the first cheapest one wins.
pub fn brute_force(dists: &DistanceMatrix) -> Result<Tour, InvalidInputError> {
    let n = dists.n();
    if n > MAX_BRUTE_FORCE_NODES {
        return Err(InvalidInputError::TooManyNodes {
            n,
            max: MAX_BRUTE_FORCE_NODES,
        });
    }
    if n < 2 {
        return Ok(Tour::trivial());
    }

    log::debug!("Enumerating all tours on {} nodes.", n);

    let mut best: Option<Tour> = None;
    for order in (1..n).map(Node::new).permutations(n - 1) {
        let mut nodes = Vec::with_capacity(n);
        nodes.push(Node::start());
        nodes.extend(order);
        let tour = Tour::with_cost_from(nodes, dists);
        if best.as_ref().map_or(true, |b| tour.cost() < b.cost()) {
            best = Some(tour);
        }
    }

    Ok(best.unwrap_or_else(Tour::trivial))
}
