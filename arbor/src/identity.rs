//! Node identity.

/// Stable identity of a render node.
///
/// Assigned once by an [`IdAllocator`] and never reused within the session
/// that allocator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Hands out monotonically increasing [`NodeId`]s for one render session.
///
/// The first id is 1.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        self.last += 1;
        NodeId(self.last)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a.get(), 1);
        assert!(b > a);
        assert_eq!(ids.allocated(), 2);
        assert_eq!(a.to_string(), "node-1");
    }
}
