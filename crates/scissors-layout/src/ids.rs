//! Depth-scoped node identifiers.
//!
//! Every element gets a tag such as `(B-3)`: the letter is its depth below the
//! root and the number counts elements seen at that depth so far, across the
//! whole document. Allocators derived with [`IdAllocator::descend`] share one
//! counter table, so cousins continue each other's numbering.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Depth level, displayed as `A`, `B`, ... `Z`, `AA`, `AB`, ...
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepthMarker(pub u32);

impl DepthMarker {
    pub const ROOT: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DepthMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bijective base-26, like spreadsheet columns.
        let mut letters = Vec::new();
        let mut n = self.0 + 1;
        while n > 0 {
            n -= 1;
            letters.push(char::from(b'A' + (n % 26) as u8));
            n /= 26;
        }
        letters.iter().rev().try_for_each(|c| write!(f, "{c}"))
    }
}

/// An issued identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub depth: DepthMarker,
    pub sequence: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{})", self.depth, self.sequence)
    }
}

/// Hands out [`NodeId`]s for one depth, sharing counters with every
/// allocator derived from the same root.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    depth: DepthMarker,
    counters: Rc<RefCell<IndexMap<DepthMarker, u32>>>,
}

impl IdAllocator {
    /// A fresh allocator at the root depth with an empty counter table.
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator one level deeper sharing this one's counters.
    pub fn descend(&self) -> Self {
        Self {
            depth: self.depth.next(),
            counters: Rc::clone(&self.counters),
        }
    }

    pub fn depth(&self) -> DepthMarker {
        self.depth
    }

    /// Issue the next identifier at this depth.
    pub fn next_id(&self) -> NodeId {
        let mut counters = self.counters.borrow_mut();
        let sequence = counters.entry(self.depth).or_insert(0);
        *sequence += 1;
        NodeId {
            depth: self.depth,
            sequence: *sequence,
        }
    }

    /// Last sequence number issued at this depth, 0 if none.
    pub fn last_id(&self) -> u32 {
        self.counters
            .borrow()
            .get(&self.depth)
            .copied()
            .unwrap_or(0)
    }

    /// Counter table in the order depths were first reached.
    pub fn counters(&self) -> Vec<(DepthMarker, u32)> {
        self.counters
            .borrow()
            .iter()
            .map(|(depth, count)| (*depth, *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_marker_letters() {
        assert_eq!(DepthMarker(0).to_string(), "A");
        assert_eq!(DepthMarker(1).to_string(), "B");
        assert_eq!(DepthMarker(25).to_string(), "Z");
        assert_eq!(DepthMarker(26).to_string(), "AA");
        assert_eq!(DepthMarker(27).to_string(), "AB");
        assert_eq!(DepthMarker(26 + 26 * 26).to_string(), "AAA");
    }

    #[test]
    fn test_first_id_is_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.last_id(), 0);
        assert_eq!(ids.next_id().to_string(), "(A-1)");
        assert_eq!(ids.last_id(), 1);
    }

    #[test]
    fn test_descend_does_not_touch_parent() {
        let root = IdAllocator::new();
        let child = root.descend();
        assert_eq!(root.depth(), DepthMarker::ROOT);
        assert_eq!(child.depth(), DepthMarker(1));
        assert_eq!(child.descend().depth(), DepthMarker(2));
        assert!(root.counters().is_empty());
    }

    #[test]
    fn test_cousins_share_counters() {
        // <r><a><x/></a><b><y/></b></r>, visited depth first.
        let r = IdAllocator::new();
        let mut issued = vec![r.next_id()];
        let a = r.descend();
        issued.push(a.next_id());
        issued.push(a.descend().next_id());
        let b = r.descend();
        issued.push(b.next_id());
        issued.push(b.descend().next_id());

        let tags: Vec<String> = issued.iter().map(ToString::to_string).collect();
        insta::assert_snapshot!(tags.join(" "), @"(A-1) (B-1) (C-1) (B-2) (C-2)");
        assert_eq!(
            r.counters(),
            vec![(DepthMarker(0), 1), (DepthMarker(1), 2), (DepthMarker(2), 2)]
        );
    }

    proptest! {
        #[test]
        fn test_next_id_strictly_increases(depth in 0u32..40, n in 1usize..64) {
            let ids = IdAllocator { depth: DepthMarker(depth), ..IdAllocator::new() };
            let issued: Vec<u32> = (0..n).map(|_| ids.next_id().sequence).collect();
            prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(issued[0], 1);
            prop_assert_eq!(ids.last_id(), n as u32);
        }
    }
}
