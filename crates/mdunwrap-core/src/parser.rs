//! CommonMark parsing boundary
//!
//! Wraps comrak behind the two operations the renderer needs: parse a
//! document into an arena-backed AST, and walk that tree as a flat
//! stream of (entering, node) events in depth-first order.

use comrak::arena_tree::NodeEdge;
use comrak::nodes::AstNode;
use comrak::{Arena, ComrakOptions, parse_document};

/// Parse CommonMark source into an AST owned by `arena`.
///
/// Uses default comrak options: plain CommonMark, no extensions. Parsing
/// is total; any byte sequence produces a tree.
pub fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, source: &str) -> &'a AstNode<'a> {
    parse_document(arena, source, &ComrakOptions::default())
}

/// One step of a depth-first walk over the AST.
///
/// Every node yields exactly one entering and one exiting event, in
/// pre/post order. Leaf kinds (text, breaks, code spans) key off the
/// entering event and ignore the exit.
pub struct WalkEvent<'a> {
    pub entering: bool,
    pub node: &'a AstNode<'a>,
}

/// Walk `root` depth-first, yielding enter/exit events for every node.
pub fn walk<'a>(root: &'a AstNode<'a>) -> impl Iterator<Item = WalkEvent<'a>> {
    root.traverse().map(|edge| match edge {
        NodeEdge::Start(node) => WalkEvent {
            entering: true,
            node,
        },
        NodeEdge::End(node) => WalkEvent {
            entering: false,
            node,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use comrak::nodes::NodeValue;

    #[test]
    fn test_events_are_balanced() {
        let arena = Arena::new();
        let root = parse_markdown(&arena, "# h\n\n- a\n- *b*\n");

        let mut depth = 0usize;
        let mut max_depth = 0usize;
        for event in walk(root) {
            if event.entering {
                depth += 1;
                max_depth = max_depth.max(depth);
            } else {
                depth -= 1;
            }
        }
        assert_eq!(depth, 0);
        // document > list > item > paragraph > emph > text
        assert_eq!(max_depth, 6);
    }

    #[test]
    fn test_walk_is_preorder() {
        let arena = Arena::new();
        let root = parse_markdown(&arena, "para with *emphasis*\n");

        let entered: Vec<bool> = walk(root)
            .filter(|e| e.entering)
            .map(|e| matches!(e.node.data.borrow().value, NodeValue::Document))
            .collect();
        // The document node is entered first and exactly once.
        assert!(entered[0]);
        assert_eq!(entered.iter().filter(|&&d| d).count(), 1);
    }
}
