//! Python-specific node helpers shared by codemods.

use tree_sitter::Node;

use crate::tree::SourceTree;

/// Split a plain `target = value` assignment into its target and value.
///
/// Returns `None` for chained assignments (`a = b = c`), annotated
/// assignments (`a: int = 1`) and assignments without a value, so callers
/// only ever see single-target statements.
#[must_use]
pub fn assignment_parts(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
    if node.kind() != "assignment" {
        return None;
    }
    if node.parent().is_some_and(|p| p.kind() == "assignment") {
        return None;
    }
    if node.child_by_field_name("type").is_some() {
        return None;
    }
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    if right.kind() == "assignment" {
        return None;
    }
    Some((left, right))
}

/// The `string_start` token of a string node and its prefix letters.
///
/// For `rf"x"` this yields the `string_start` node and `"rf"`.
#[must_use]
pub fn string_prefix<'t>(tree: &'t SourceTree, node: Node<'t>) -> Option<(Node<'t>, &'t str)> {
    if node.kind() != "string" {
        return None;
    }
    let mut cursor = node.walk();
    let start = node
        .children(&mut cursor)
        .find(|child| child.kind() == "string_start")?;
    let token = tree.text(start);
    let quote_at = token.find(['"', '\''])?;
    Some((start, &token[..quote_at]))
}

/// Whether a string node contains any `{...}` substitution or escaped brace.
#[must_use]
pub fn string_has_interpolation(tree: &SourceTree, node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let has_child = node
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), "interpolation" | "escape_interpolation"));
    has_child || {
        let text = tree.text(node);
        text.contains("{{") || text.contains("}}")
    }
}
