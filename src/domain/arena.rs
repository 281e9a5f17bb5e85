use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Tagged payload of a tree node.
///
/// A character is a terminal answer, a feature a yes/no question. The text is
/// non-empty and newline-free; the base-file grammar additionally forbids a
/// sigil character immediately followed by whitespace inside a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// Terminal answer ("Cat")
    Character(String),
    /// Yes/no question ("Is it alive?")
    Feature(String),
}

impl NodeValue {
    pub fn text(&self) -> &str {
        match self {
            NodeValue::Character(text) | NodeValue::Feature(text) => text,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(self, NodeValue::Character(_))
    }

    pub fn is_feature(&self) -> bool {
        matches!(self, NodeValue::Feature(_))
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Which child slot of a feature node an edge occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    No,
    Yes,
}

/// Tree node in the arena-based binary structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Tagged value for this node
    pub value: NodeValue,
    /// Index of the "no" child, None for leaves
    pub left: Option<Index>,
    /// Index of the "yes" child, None for leaves
    pub right: Option<Index>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// 0 for a childless node, otherwise 1 + max(child depths)
    pub depth: usize,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn child_count(&self) -> usize {
        self.left.iter().count() + self.right.iter().count()
    }

    /// Which slot of this node `child` occupies, if any.
    pub fn slot_of(&self, child: Index) -> Option<Answer> {
        if self.left == Some(child) {
            Some(Answer::No)
        } else if self.right == Some(child) {
            Some(Answer::Yes)
        } else {
            None
        }
    }
}

/// Arena-based binary tree storage.
///
/// Uses a generational arena for memory-safe node handles and O(1) lookups.
/// `left`/`right` own the subtrees in the sense that the whole arena is freed
/// with the tree; `parent` is a plain back-reference used to locate a node's
/// slot during mutation and to reconstruct root-first paths.
#[derive(Debug, Default)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for an empty tree
    root: Option<Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node. With `parent` None the node becomes the root,
    /// otherwise it is attached to the given slot of the parent.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, value: NodeValue, parent: Option<(Index, Answer)>) -> Index {
        let node = TreeNode {
            value,
            left: None,
            right: None,
            parent: parent.map(|(idx, _)| idx),
            depth: 0,
        };
        let node_idx = self.arena.insert(node);

        match parent {
            Some((parent_idx, slot)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    match slot {
                        Answer::No => parent.left = Some(node_idx),
                        Answer::Yes => parent.right = Some(node_idx),
                    }
                }
            }
            None => self.root = Some(node_idx),
        }

        node_idx
    }

    /// Insert a node without attaching it anywhere. The mutator wires such
    /// nodes in by hand when splicing.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_detached(&mut self, value: NodeValue) -> Index {
        self.arena.insert(TreeNode {
            value,
            left: None,
            right: None,
            parent: None,
            depth: 0,
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<Index>) {
        self.root = root;
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Preorder iteration, left subtree before right.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Postorder iteration, children before their parent.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Height of the tree: the stored depth of the root, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root
            .and_then(|root| self.get_node(root))
            .map(|node| node.depth)
            .unwrap_or(0)
    }

    /// Recompute every stored depth bottom-up. Used after bulk construction.
    #[instrument(level = "debug", skip(self))]
    pub fn recompute_depths(&mut self) {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let depth = self.depth_from_children(idx);
            if let Some(node) = self.arena.get_mut(idx) {
                node.depth = depth;
            }
        }
    }

    /// Recompute the depth of `from` and of every ancestor up to the root.
    #[instrument(level = "trace", skip(self))]
    pub fn propagate_depth(&mut self, from: Index) {
        let mut cursor = Some(from);
        while let Some(idx) = cursor {
            let depth = self.depth_from_children(idx);
            match self.arena.get_mut(idx) {
                Some(node) => {
                    node.depth = depth;
                    cursor = node.parent;
                }
                None => break,
            }
        }
    }

    fn depth_from_children(&self, idx: Index) -> usize {
        let Some(node) = self.arena.get(idx) else {
            return 0;
        };
        let child_depth = |child: Option<Index>| {
            child
                .and_then(|c| self.arena.get(c))
                .map(|n| n.depth + 1)
                .unwrap_or(0)
        };
        child_depth(node.left).max(child_depth(node.right))
    }

    /// Root-first index path from the root to `idx`, built through parent
    /// links.
    #[instrument(level = "trace", skip(self))]
    pub fn path_from_root(&self, idx: Index) -> Vec<Index> {
        let mut path = Vec::new();
        let mut cursor = Some(idx);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.arena.get(current).and_then(|node| node.parent);
        }
        path.reverse();
        path
    }

    /// Values of all character leaves, in left-to-right preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn characters(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.value.text().to_string())
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.arena.get_node(current_idx)?;
        // Right pushed first so the left subtree is visited first
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some((current_idx, node))
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    if let Some(right) = node.right {
                        self.stack.push((right, false));
                    }
                    if let Some(left) = node.left {
                        self.stack.push((left, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_arena() -> (TreeArena, Index, Index, Index) {
        let mut arena = TreeArena::new();
        let root = arena.insert_node(NodeValue::Feature("Is it alive?".into()), None);
        let no = arena.insert_node(NodeValue::Character("Rock".into()), Some((root, Answer::No)));
        let yes = arena.insert_node(NodeValue::Character("Cat".into()), Some((root, Answer::Yes)));
        arena.recompute_depths();
        (arena, root, no, yes)
    }

    #[test]
    fn given_attached_children_when_reading_parent_then_slots_are_wired() {
        let (arena, root, no, yes) = two_level_arena();
        let root_node = arena.get_node(root).unwrap();
        assert_eq!(root_node.left, Some(no));
        assert_eq!(root_node.right, Some(yes));
        assert_eq!(root_node.slot_of(no), Some(Answer::No));
        assert_eq!(root_node.slot_of(yes), Some(Answer::Yes));
        assert_eq!(arena.get_node(no).unwrap().parent, Some(root));
        assert_eq!(arena.get_node(yes).unwrap().parent, Some(root));
    }

    #[test]
    fn given_two_level_tree_when_recomputing_depths_then_root_is_one() {
        let (arena, root, no, _) = two_level_arena();
        assert_eq!(arena.get_node(root).unwrap().depth, 1);
        assert_eq!(arena.get_node(no).unwrap().depth, 0);
        assert_eq!(arena.depth(), 1);
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_left_subtree_comes_first() {
        let (arena, _, _, _) = two_level_arena();
        let values: Vec<&str> = arena.iter().map(|(_, n)| n.value.text()).collect();
        assert_eq!(values, vec!["Is it alive?", "Rock", "Cat"]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_root_comes_last() {
        let (arena, _, _, _) = two_level_arena();
        let values: Vec<&str> = arena.iter_postorder().map(|(_, n)| n.value.text()).collect();
        assert_eq!(values, vec!["Rock", "Cat", "Is it alive?"]);
    }

    #[test]
    fn given_leaf_when_building_path_from_root_then_path_is_root_first() {
        let (arena, root, _, yes) = two_level_arena();
        assert_eq!(arena.path_from_root(yes), vec![root, yes]);
    }
}
