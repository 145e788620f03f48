// Call-path tree structures for Yukon.
// A selected notification's path is displayed as a chain of nested nodes.

/// A node in a call-path tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraphNode {
    pub label: String,
    pub children: Vec<CallGraphNode>,
}

impl CallGraphNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Labels in pre-order (for a chain: root to leaf).
    pub fn labels(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.label);
        for child in &self.children {
            child.collect_labels(out);
        }
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(CallGraphNode::depth).max().unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Build a linear tree from frames ordered root first.
///
/// Each frame becomes the single child of the one before it. The result
/// is freshly allocated on every call; nothing is shared between paths.
/// Returns `None` when there are no frames.
pub fn build_tree<S: AsRef<str>>(frames: &[S]) -> Option<CallGraphNode> {
    frames.iter().rev().fold(None, |child, frame| {
        let mut node = CallGraphNode::new(frame.as_ref());
        node.children.extend(child);
        Some(node)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chain() {
        let root = build_tree(&["A", "B", "C"]).unwrap();
        assert_eq!(root.label, "A");
        assert_eq!(root.children.len(), 1);

        let b = &root.children[0];
        assert_eq!(b.label, "B");
        assert_eq!(b.children.len(), 1);

        let c = &b.children[0];
        assert_eq!(c.label, "C");
        assert!(c.is_leaf());

        assert_eq!(root.labels(), vec!["A", "B", "C"]);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_empty_path_has_no_root() {
        let frames: Vec<String> = Vec::new();
        assert!(build_tree(&frames).is_none());
    }

    #[test]
    fn test_repeated_frames_are_not_merged() {
        let root = build_tree(&["A", "A"]).unwrap();
        assert_eq!(root.labels(), vec!["A", "A"]);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_builds_are_independent() {
        let first = build_tree(&["A", "B"]).unwrap();
        let mut second = build_tree(&["A", "B"]).unwrap();
        assert_eq!(first, second);

        second.children[0].label = "X".to_string();
        assert_eq!(first.labels(), vec!["A", "B"]);
    }
}
