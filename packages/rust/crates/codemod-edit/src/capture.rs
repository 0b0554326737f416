//! Placeholder substitution from an ast-grep match environment.

use std::cmp::Reverse;

use codemod_ast::{Doc, MetaVarEnv, MetaVariable};

/// Render `template` for one match.
///
/// `$NAME` becomes the text of its single capture; `$$$NAME` becomes the
/// slice of `content` spanned by its multi-capture, separators included.
/// Unbound placeholders are left as written.
pub fn substitute_captures<D: Doc>(template: &str, env: &MetaVarEnv<D>, content: &str) -> String {
    let mut bindings: Vec<(String, String)> = env
        .get_matched_variables()
        .filter_map(|var| match var {
            MetaVariable::Capture(name, _) => {
                let node = env.get_match(&name)?;
                Some((format!("${name}"), node.text().to_string()))
            }
            MetaVariable::MultiCapture(name) => {
                let nodes = env.get_multiple_matches(&name);
                let span = match (nodes.first(), nodes.last()) {
                    (Some(first), Some(last)) => content
                        .get(first.range().start..last.range().end)
                        .unwrap_or_default(),
                    _ => "",
                };
                Some((format!("$$${name}"), span.to_string()))
            }
            _ => None,
        })
        .collect();

    // `$$$ARGS` before `$ARGS`, `$FOO` before `$F`.
    bindings.sort_by_key(|(placeholder, _)| Reverse(placeholder.len()));
    bindings
        .iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(placeholder, value)
        })
}

#[cfg(test)]
mod tests {
    use crate::StructuralEditor;

    #[test]
    fn test_multi_capture_keeps_separators() {
        let result =
            StructuralEditor::replace("x = a.b(1,  2)", "$OBJ.b($$$ARGS)", "$OBJ.c($$$ARGS)")
                .unwrap();
        assert_eq!(result.modified, "x = a.c(1,  2)");
    }

    #[test]
    fn test_single_capture() {
        let result =
            StructuralEditor::replace("fh.readline()", "$F.readline()", "$F.readline(10)").unwrap();
        assert_eq!(result.modified, "fh.readline(10)");
    }
}
