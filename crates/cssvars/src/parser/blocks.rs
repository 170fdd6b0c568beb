//! A lightweight reader for compiled CSS.
//!
//! This is not a CSS parser. It only knows enough to split a stylesheet into
//! nested blocks (rules and at-rule wrappers such as `@media`) and the
//! declarations inside them:
//!
//! - string literals and parentheses are opaque, so `;`, `{` and `}` inside
//!   `url(...)` or `"..."` do not end anything
//! - block comments are dropped
//! - statement at-rules (`@import ...;`, `@charset ...;`) are dropped
//! - unbalanced closing braces at the top level are skipped
//!
//! ```
//! use cssvars::parser::blocks::{read_stylesheet, Node};
//!
//! let sheet = read_stylesheet("@media print { a { color: red } }");
//! let Node::Block(media) = &sheet.nodes[0] else { panic!() };
//! assert_eq!(media.prelude, "@media print");
//! ```

use std::fmt;

/// A stylesheet as a tree of blocks and declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Block(Block),
    Declaration(Declaration),
}

/// A `prelude { ... }` block: a style rule or an at-rule wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub prelude: String,
    pub children: Vec<Node>,
}

/// A `property: value` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl Stylesheet {
    /// Visits every declaration in document order.
    pub fn declarations(&self) -> Vec<&Declaration> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Declaration>) {
            for node in nodes {
                match node {
                    Node::Declaration(decl) => out.push(decl),
                    Node::Block(block) => walk(&block.children, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }
}

/// Serializes with two-space indentation and a blank line between top-level
/// nodes. No trailing newline.
impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        Node::Declaration(decl) => write!(f, "{}{}: {};", indent, decl.property, decl.value),
        Node::Block(block) => {
            writeln!(f, "{}{} {{", indent, block.prelude)?;
            for child in &block.children {
                write_node(f, child, depth + 1)?;
                f.write_str("\n")?;
            }
            write!(f, "{}}}", indent)
        }
    }
}

/// Reads `source` into a [`Stylesheet`]. Never fails.
pub fn read_stylesheet(source: &str) -> Stylesheet {
    let mut reader = Reader { src: source, pos: 0 };
    let mut nodes = Vec::new();
    loop {
        nodes.extend(reader.read_items());
        if reader.at_end() {
            break;
        }
        log::trace!("skipping unbalanced '}}' at {}", reader.pos);
    }
    Stylesheet { nodes }
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Reads block contents until the matching `}` (consumed) or the end.
    fn read_items(&mut self) -> Vec<Node> {
        let mut items = Vec::new();
        let mut buf = String::new();
        let mut paren_depth = 0usize;

        while let Some(c) = self.bump() {
            match c {
                '/' if self.peek() == Some('*') => {
                    self.skip_comment();
                    buf.push(' ');
                }
                '"' | '\'' => self.copy_string(c, &mut buf),
                '(' => {
                    paren_depth += 1;
                    buf.push(c);
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    buf.push(c);
                }
                '{' if paren_depth == 0 => {
                    let prelude = collapse_whitespace(&buf);
                    buf.clear();
                    let children = self.read_items();
                    items.push(Node::Block(Block { prelude, children }));
                }
                ';' if paren_depth == 0 => {
                    items.extend(statement(&buf));
                    buf.clear();
                }
                '}' if paren_depth == 0 => {
                    items.extend(statement(&buf));
                    return items;
                }
                c => buf.push(c),
            }
        }

        items.extend(statement(&buf));
        items
    }

    fn skip_comment(&mut self) {
        // Positioned on the '*' of "/*".
        self.pos += 1;
        match self.src[self.pos..].find("*/") {
            Some(end) => self.pos += end + 2,
            None => self.pos = self.src.len(),
        }
    }

    fn copy_string(&mut self, quote: char, buf: &mut String) {
        buf.push(quote);
        while let Some(c) = self.bump() {
            buf.push(c);
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    buf.push(escaped);
                }
            } else if c == quote {
                break;
            }
        }
    }
}

/// Turns the text between two statement boundaries into a declaration.
fn statement(raw: &str) -> Option<Node> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('@') {
        if !text.is_empty() {
            log::trace!("dropping at-statement: {}", text);
        }
        return None;
    }

    let colon = text.find(':')?;
    let property = text[..colon].trim();
    if property.is_empty() || property.contains(char::is_whitespace) {
        return None;
    }
    Some(Node::Declaration(Declaration::new(
        property,
        collapse_whitespace(&text[colon + 1..]),
    )))
}

/// Trims and collapses whitespace runs to a single space outside strings.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for c in text.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(property: &str, value: &str) -> Node {
        Node::Declaration(Declaration::new(property, value))
    }

    #[test]
    fn test_reads_rules_and_declarations() {
        let sheet = read_stylesheet("a { color: red; margin: 0 }");
        assert_eq!(
            sheet.nodes,
            vec![Node::Block(Block {
                prelude: "a".into(),
                children: vec![decl("color", "red"), decl("margin", "0")],
            })]
        );
    }

    #[test]
    fn test_nested_blocks() {
        let sheet = read_stylesheet(
            "@media (max-width: 600px) {\n  html {\n    color: blue\n  }\n}",
        );
        let Node::Block(media) = &sheet.nodes[0] else {
            panic!("expected block");
        };
        assert_eq!(media.prelude, "@media (max-width: 600px)");
        let Node::Block(html) = &media.children[0] else {
            panic!("expected nested block");
        };
        assert_eq!(html.children, vec![decl("color", "blue")]);
    }

    #[test]
    fn test_strings_and_parens_are_opaque() {
        let sheet = read_stylesheet(
            r#"a { content: "}; {"; background: url(data:image/png;base64,AAA=); }"#,
        );
        assert_eq!(sheet.declarations().len(), 2);
        assert_eq!(sheet.declarations()[0].value, r#""}; {""#);
        assert_eq!(
            sheet.declarations()[1].value,
            "url(data:image/png;base64,AAA=)"
        );
    }

    #[test]
    fn test_comments_and_at_statements_are_dropped() {
        let sheet = read_stylesheet(
            "@charset \"utf-8\";\n/* header { color: red; } */\na { /* x */ color: red; }",
        );
        assert_eq!(sheet.nodes.len(), 1);
        assert_eq!(sheet.declarations(), vec![&Declaration::new("color", "red")]);
    }

    #[test]
    fn test_stray_closing_brace() {
        let sheet = read_stylesheet("} a { color: red; }");
        assert_eq!(sheet.declarations().len(), 1);
    }

    #[test]
    fn test_whitespace_is_collapsed_outside_strings() {
        assert_eq!(
            collapse_whitespace("  0 0\n   1px   \"a  b\" "),
            "0 0 1px \"a  b\""
        );
    }

    #[test]
    fn test_display_format() {
        let sheet = read_stylesheet("a{color:red}@media print{b{margin:0}}");
        assert_eq!(
            sheet.to_string(),
            "a {\n  color: red;\n}\n\n@media print {\n  b {\n    margin: 0;\n  }\n}"
        );
    }
}
