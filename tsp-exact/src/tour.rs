use std::fmt;

use crate::{matrix::DistanceMatrix, node::Node, node::NodeSet, Cost};

/// A closed tour through a complete graph.
///
/// `nodes` lists the visiting order starting at the start node. The closing edge from the last node back to
/// the first is part of `cost`, but the first node is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<Node>,
    cost: Cost,
}

impl From<(Vec<usize>, Cost)> for Tour {
    fn from(input: (Vec<usize>, Cost)) -> Self {
        Tour::new(input.0.into_iter().map(|n| n.into()).collect(), input.1)
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Tour {
    pub fn new(nodes: Vec<Node>, cost: Cost) -> Self {
        debug_assert_eq!(
            nodes.iter().copied().collect::<NodeSet>().len(),
            nodes.len()
        );
        Self { nodes, cost }
    }

    /// The tour consisting of the start node only.
    pub fn trivial() -> Self {
        Self::new(vec![Node::start()], Cost::zero())
    }

    /// Builds a tour over `nodes` and sums its edges, including the closing edge.
    pub fn with_cost_from(nodes: Vec<Node>, dists: &DistanceMatrix) -> Self {
        let cost = cycle_cost(&nodes, dists);
        Self { nodes, cost }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    pub fn first(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this tour starts at the start node and visits each of the `n` nodes exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        if self.len() != n
            || self.first() != Some(Node::start())
            || self
                .nodes
                .iter()
                .any(|node| node.id() >= n.min(NodeSet::CAPACITY))
        {
            return false;
        }
        self.nodes.iter().copied().collect::<NodeSet>().len() == n
    }

    /// Whether `cost` matches the sum of the tour's edges in `dists`.
    pub fn is_consistent_with(&self, dists: &DistanceMatrix) -> bool {
        self.nodes.iter().all(|node| node.id() < dists.n())
            && cycle_cost(&self.nodes, dists) == self.cost
    }
}

fn cycle_cost(nodes: &[Node], dists: &DistanceMatrix) -> Cost {
    let closing = match (nodes.last(), nodes.first()) {
        (Some(&last), Some(&first)) => dists.distance(last, first),
        _ => Cost::zero(),
    };
    nodes
        .windows(2)
        .map(|e| dists.distance(e[0], e[1]))
        .sum::<Cost>()
        + closing
}

/// Prints `(cost, [0, a, b, ...])`.
impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, [{}])",
            self.cost,
            self.nodes
                .iter()
                .map(|n| n.id().to_string())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod test_tour {
    use super::*;

    fn get_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0usize, 2, 9, 10],
            vec![1, 0, 6, 4],
            vec![15, 7, 0, 8],
            vec![6, 3, 12, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_with_cost_from() {
        let dists = get_matrix();
        let tour = Tour::with_cost_from(
            vec![0, 2, 3, 1].into_iter().map(Node::new).collect(),
            &dists,
        );
        assert_eq!(tour.cost(), 21.into());
        assert!(tour.is_hamiltonian(4));
        assert!(tour.is_consistent_with(&dists));
        assert_eq!(tour.to_string(), "(21, [0, 2, 3, 1])");
    }

    #[test]
    fn test_closing_edge_of_single_node() {
        let dists = DistanceMatrix::from_rows(&[vec![0usize]]).unwrap();
        let tour = Tour::with_cost_from(vec![Node::start()], &dists);
        assert_eq!(tour, Tour::trivial());
        assert!(tour.is_hamiltonian(1));
    }

    #[test]
    fn test_not_hamiltonian() {
        let tour: Tour = Tour::from((vec![1, 0, 2], Cost::new(0)));
        assert!(!tour.is_hamiltonian(3));
        let tour: Tour = Tour::from((vec![0, 2], Cost::new(0)));
        assert!(!tour.is_hamiltonian(3));
        let tour: Tour = Tour::from((vec![0, 1, 5], Cost::new(0)));
        assert!(!tour.is_hamiltonian(3));
    }

    #[test]
    fn test_inconsistent_cost() {
        let dists = get_matrix();
        let tour: Tour = Tour::from((vec![0, 2, 3, 1], Cost::new(20)));
        assert!(!tour.is_consistent_with(&dists));
    }
}
