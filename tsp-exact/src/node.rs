use std::iter::FromIterator;

/// A node of the complete graph. It is identified by its row index in the distance matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(usize);

impl Node {
    pub fn new(id: usize) -> Self {
        Node(id)
    }

    /// The node every tour starts and ends at.
    pub fn start() -> Self {
        Node(0)
    }

    pub fn id(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Node {
    fn from(id: usize) -> Self {
        Node::new(id)
    }
}

/// A set of nodes, stored as a bitmask where bit `k` stands for node `k`.
///
/// Only nodes with an id below [`NodeSet::CAPACITY`] can be members.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeSet(u32);

impl NodeSet {
    pub const CAPACITY: usize = u32::BITS as usize;

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn singleton(node: Node) -> Self {
        let mut set = Self::empty();
        set.insert(node);
        set
    }

    /// All nodes with `from <= id < to`.
    pub fn range(from: usize, to: usize) -> Self {
        (from..to).map(Node::new).collect()
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, n: Node) -> bool {
        debug_assert!(n.id() < Self::CAPACITY);
        let inserted = !self.contains(&n);
        self.0 |= 1 << n.id();
        inserted
    }

    pub fn remove(&mut self, n: Node) {
        self.0 &= !(1 << n.id());
    }

    /// A copy of this set without `n`.
    pub fn without(&self, n: Node) -> Self {
        let mut set = *self;
        set.remove(n);
        set
    }

    pub fn contains(&self, n: &Node) -> bool {
        n.id() < Self::CAPACITY && self.0 & (1 << n.id()) != 0
    }

    /// Iterates the members in ascending order of their id.
    pub fn iter(&self) -> Iter {
        Iter(self.0)
    }

    pub fn to_vec(&self) -> Vec<Node> {
        self.iter().collect()
    }
}

pub struct Iter(u32);

impl Iterator for Iter {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Node::new(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = Node;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut set = NodeSet::empty();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

impl std::fmt::Display for NodeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.iter()
                .map(|n| n.to_string())
                .collect::<Vec<String>>()
                .join(",")
        )
    }
}

#[cfg(test)]
mod test_node_set {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut set = NodeSet::empty();
        assert!(set.insert(3.into()));
        assert!(!set.insert(3.into()));
        assert!(set.insert(1.into()));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&3.into()));

        set.remove(3.into());
        assert!(!set.contains(&3.into()));
        assert_eq!(set, NodeSet::singleton(1.into()));
    }

    #[test]
    fn test_iter_is_sorted() {
        let set: NodeSet = vec![5, 1, 9, 2].into_iter().map(Node::new).collect();
        assert_eq!(
            set.to_vec(),
            vec![1, 2, 5, 9].into_iter().map(Node::new).collect::<Vec<Node>>()
        );
        assert_eq!(set.to_string(), "[v1,v2,v5,v9]");
    }

    #[test]
    fn test_range_and_without() {
        let full = NodeSet::range(1, 4);
        assert_eq!(full.bits(), 0b1110);
        assert_eq!(full.without(2.into()).bits(), 0b1010);
        assert!(!full.contains(&0.into()));
        assert!(NodeSet::range(1, 1).is_empty());
    }
}
