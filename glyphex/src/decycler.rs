//! Cycle and depth checks for walking composite glyph references.

use std::ops::{Deref, DerefMut};

/// Composite glyphs nested deeper than this are rejected.
pub(crate) const MAX_COMPOSITE_DEPTH: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DecyclerError {
    DepthLimitExceeded,
    CycleDetected,
}

/// Tracks the chain of nodes from the root of a depth first traversal to
/// the node currently being visited.
///
/// A node may be visited any number of times through different parents;
/// only a node that appears twice on the current chain is a cycle.
pub(crate) struct Decycler<T> {
    path: Vec<T>,
    max_depth: usize,
}

impl<T> Decycler<T>
where
    T: Copy + PartialEq,
{
    pub fn new(max_depth: usize) -> Self {
        Self {
            path: Vec::new(),
            max_depth,
        }
    }

    /// Push `node` onto the current chain.
    ///
    /// The returned guard pops it again when dropped, and derefs to the
    /// decycler so it can be handed down to the traversal of children.
    pub fn enter(&mut self, node: T) -> Result<DecyclerGuard<'_, T>, DecyclerError> {
        if self.path.contains(&node) {
            return Err(DecyclerError::CycleDetected);
        }
        if self.path.len() >= self.max_depth {
            return Err(DecyclerError::DepthLimitExceeded);
        }
        self.path.push(node);
        Ok(DecyclerGuard { decycler: self })
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

pub(crate) struct DecyclerGuard<'a, T> {
    decycler: &'a mut Decycler<T>,
}

impl<T> Deref for DecyclerGuard<'_, T> {
    type Target = Decycler<T>;

    fn deref(&self) -> &Self::Target {
        self.decycler
    }
}

impl<T> DerefMut for DecyclerGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.decycler
    }
}

impl<T> Drop for DecyclerGuard<'_, T> {
    fn drop(&mut self) {
        self.decycler.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adjacency lists, indexed by node.
    struct Graph(Vec<Vec<usize>>);

    impl Graph {
        fn walk(&self, decycler: &mut Decycler<usize>, node: usize) -> Result<(), DecyclerError> {
            let mut guard = decycler.enter(node)?;
            for child in &self.0[node] {
                self.walk(&mut guard, *child)?;
            }
            Ok(())
        }
    }

    #[test]
    fn shared_children_are_not_cycles() {
        // 0 -> 1 -> 3, 0 -> 2 -> 3
        let graph = Graph(vec![vec![1, 2], vec![3], vec![3], vec![]]);
        let mut decycler = Decycler::new(MAX_COMPOSITE_DEPTH);
        assert_eq!(graph.walk(&mut decycler, 0), Ok(()));
        assert_eq!(decycler.depth(), 0);
    }

    #[test]
    fn self_reference() {
        let graph = Graph(vec![vec![0]]);
        let mut decycler = Decycler::new(MAX_COMPOSITE_DEPTH);
        assert_eq!(
            graph.walk(&mut decycler, 0),
            Err(DecyclerError::CycleDetected)
        );
    }

    #[test]
    fn mutual_reference() {
        let graph = Graph(vec![vec![1], vec![2], vec![1]]);
        let mut decycler = Decycler::new(MAX_COMPOSITE_DEPTH);
        assert_eq!(
            graph.walk(&mut decycler, 0),
            Err(DecyclerError::CycleDetected)
        );
        // guards are released on the error path too
        assert_eq!(decycler.depth(), 0);
    }

    #[test]
    fn depth_limit() {
        let chain = |len: usize| {
            let mut nodes: Vec<_> = (0..len - 1).map(|ix| vec![ix + 1]).collect();
            nodes.push(vec![]);
            Graph(nodes)
        };
        let mut decycler = Decycler::new(MAX_COMPOSITE_DEPTH);
        assert_eq!(chain(MAX_COMPOSITE_DEPTH).walk(&mut decycler, 0), Ok(()));
        assert_eq!(
            chain(MAX_COMPOSITE_DEPTH + 1).walk(&mut decycler, 0),
            Err(DecyclerError::DepthLimitExceeded)
        );
    }
}
