//! Static fallbacks for browsers without custom property support.
//!
//! Every declaration that uses a tracked variable is re-emitted with the
//! variable replaced by its computed value, inside the same rule and
//! at-rule blocks it came from. Everything else is dropped.

use super::blocks::{Block, Declaration, Node, Stylesheet, read_stylesheet};
use super::reference::find_var_references;
use crate::generator::ResolvedVariable;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FallbackOptions {
    /// Emit the original declaration right after its fallback.
    pub keep_original: bool,
}

/// Builds the fallback stylesheet for `css` with default options.
///
/// ```
/// use cssvars::generator::ResolvedVariable;
/// use cssvars::parser::get_css_fallbacks;
///
/// let vars = [ResolvedVariable::new("--black", "#000")];
/// let css = get_css_fallbacks("a { color: var(--black); margin: 0 }", &vars);
/// assert_eq!(css, "a {\n  color: #000;\n}");
/// ```
pub fn get_css_fallbacks(css: &str, vars: &[ResolvedVariable]) -> String {
    get_css_fallbacks_with(css, vars, &FallbackOptions::default())
}

pub fn get_css_fallbacks_with(
    css: &str,
    vars: &[ResolvedVariable],
    options: &FallbackOptions,
) -> String {
    let table: HashMap<&str, &str> = vars
        .iter()
        .map(|v| (v.name.as_str(), v.value.as_str()))
        .collect();
    let sheet = read_stylesheet(css);
    let nodes = rewrite(sheet.nodes, &table, options);
    Stylesheet { nodes }.to_string()
}

fn rewrite(nodes: Vec<Node>, table: &HashMap<&str, &str>, options: &FallbackOptions) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Block(block) => {
                let children = rewrite(block.children, table, options);
                if children.is_empty() {
                    log::trace!("dropping block without fallbacks: {}", block.prelude);
                    continue;
                }
                out.push(Node::Block(Block {
                    prelude: block.prelude,
                    children,
                }));
            }
            Node::Declaration(decl) => {
                let substituted = substitute(&decl.value, table);
                if !substituted.uses_tracked {
                    continue;
                }
                if substituted.unresolved {
                    log::debug!(
                        "no fallback for {}: {} references an unknown variable",
                        decl.property,
                        decl.value
                    );
                    continue;
                }
                out.push(Node::Declaration(Declaration::new(
                    decl.property.clone(),
                    substituted.text,
                )));
                if options.keep_original {
                    out.push(Node::Declaration(decl));
                }
            }
        }
    }
    out
}

struct Substitution {
    text: String,
    uses_tracked: bool,
    unresolved: bool,
}

/// Replaces tracked `var()` references with their values.
///
/// An untracked reference resolves through its own fallback argument when it
/// has one; otherwise the value is marked unresolved.
fn substitute(value: &str, table: &HashMap<&str, &str>) -> Substitution {
    let mut result = Substitution {
        text: String::with_capacity(value.len()),
        uses_tracked: false,
        unresolved: false,
    };
    let mut last = 0;

    for reference in find_var_references(value) {
        result.text.push_str(&value[last..reference.range.start]);
        last = reference.range.end;

        if let Some(literal) = table.get(reference.name) {
            result.text.push_str(literal);
            result.uses_tracked = true;
            continue;
        }
        match reference.fallback {
            Some(fallback) => {
                let inner = substitute(fallback, table);
                result.text.push_str(&inner.text);
                result.uses_tracked |= inner.uses_tracked;
                result.unresolved |= inner.unresolved;
            }
            None => {
                result.text.push_str(&value[reference.range.clone()]);
                result.unresolved = true;
            }
        }
    }
    result.text.push_str(&value[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Vec<ResolvedVariable> {
        vec![
            ResolvedVariable::new("--black", "#000"),
            ResolvedVariable::new("--white", "#fff"),
        ]
    }

    #[test]
    fn test_substitutes_every_tracked_reference() {
        let css = "a { border: 1px solid var(--black); box-shadow: 0 0 var(--black), 0 1px var(--white) }";
        assert_eq!(
            get_css_fallbacks(css, &vars()),
            "a {\n  border: 1px solid #000;\n  box-shadow: 0 0 #000, 0 1px #fff;\n}"
        );
    }

    #[test]
    fn test_untracked_references() {
        let css = "a { color: var(--other); background: var(--other, var(--white)); border-color: var(--black) var(--other) }";
        assert_eq!(get_css_fallbacks(css, &vars()), "a {\n  background: #fff;\n}");
    }

    #[test]
    fn test_tracked_reference_with_fallback() {
        let css = "a { color: var(--black, red) }";
        assert_eq!(get_css_fallbacks(css, &vars()), "a {\n  color: #000;\n}");
    }

    #[test]
    fn test_keep_original() {
        let options = FallbackOptions {
            keep_original: true,
        };
        let css = "a { color: var(--black); margin: 0 }";
        assert_eq!(
            get_css_fallbacks_with(css, &vars(), &options),
            "a {\n  color: #000;\n  color: var(--black);\n}"
        );
    }

    #[test]
    fn test_nothing_to_do() {
        assert_eq!(get_css_fallbacks("", &vars()), "");
        assert_eq!(get_css_fallbacks("a { color: var(--black) }", &[]), "");
        assert_eq!(
            get_css_fallbacks("@media print { a { margin: 0 } }", &vars()),
            ""
        );
    }
}
