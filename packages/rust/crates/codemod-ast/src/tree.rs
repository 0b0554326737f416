//! Parsed Python source backed by a tree-sitter concrete syntax tree.
//!
//! A `SourceTree` always holds the exact text it was parsed from, so
//! re-serializing a tree is just reading its source back.

use std::fmt;

use tree_sitter::{Language, Node, Parser, Tree, TreeCursor};

use crate::error::AstError;

/// A parsed Python module: source text plus its concrete syntax tree.
#[derive(Clone)]
pub struct SourceTree {
    source: String,
    tree: Tree,
}

impl SourceTree {
    /// Parse Python source into a tree.
    ///
    /// # Errors
    ///
    /// Returns `AstError::Syntax` with the position of the first error or
    /// missing node when the source does not parse cleanly.
    pub fn parse(source: impl Into<String>) -> Result<Self, AstError> {
        let source = source.into();
        let language: Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| AstError::Grammar(e.to_string()))?;

        let tree = parser.parse(&source, None).ok_or(AstError::NoTree)?;
        let parsed = Self { source, tree };

        if parsed.root().has_error() {
            let (line, column) = parsed
                .preorder()
                .find(|n| n.is_error() || n.is_missing())
                .map_or((1, 1), |n| {
                    let pos = n.start_position();
                    (pos.row + 1, pos.column + 1)
                });
            return Err(AstError::Syntax { line, column });
        }

        Ok(parsed)
    }

    /// The exact source text of this tree.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Consume the tree, returning its source text.
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }

    /// Root (`module`) node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Every node of the tree in source order (preorder, parents first).
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self.tree.walk())
    }

    /// Source text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// 1-indexed line on which `node` starts.
    #[must_use]
    pub fn line_of(node: Node<'_>) -> usize {
        node.start_position().row + 1
    }
}

impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTree")
            .field("bytes", &self.source.len())
            .field("root", &self.root().kind())
            .finish()
    }
}

/// Preorder traversal over a tree-sitter cursor.
pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Preorder<'tree> {
    fn new(cursor: TreeCursor<'tree>) -> Self {
        Self {
            cursor,
            done: false,
        }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_source() {
        let tree = SourceTree::parse("x = 1\n").unwrap();
        assert_eq!(tree.source(), "x = 1\n");
        assert_eq!(tree.root().kind(), "module");
    }

    #[test]
    fn test_preorder_visits_parents_first() {
        let tree = SourceTree::parse("a = 1\nb = 2\n").unwrap();
        let kinds: Vec<&str> = tree.preorder().map(|n| n.kind()).collect();
        assert_eq!(kinds.first(), Some(&"module"));
        assert_eq!(kinds.iter().filter(|k| **k == "assignment").count(), 2);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = SourceTree::parse("x = 1\ndef broken(:\n").unwrap_err();
        assert!(matches!(err, AstError::Syntax { line: 2, .. }));
    }
}
