use cssvars::generator::ResolvedVariable;
use cssvars::parser::{FallbackOptions, get_css_fallbacks, get_css_fallbacks_with};

const CSS: &str = r#"
      html {
        color: var(--black);
        background-color: var(--black--color-invert);
      }
      html:hover {
        color: var(--green);
      }
      @media (max-width: 600px) {
        html {
          background-color: var(--green--42deg--adjusthue)
        }
        body {
          color: blue;
        }
      }
      @document {
        #some-id {
          background: url("http://var(--black)");
        }
      }
      body {
        margin: 0;
      }
"#;

fn used_vars() -> Vec<ResolvedVariable> {
    vec![
        ResolvedVariable::new("--black", "rgba(0, 0, 0, 0)"),
        ResolvedVariable::new("--black--color-invert", "#fff"),
        ResolvedVariable::new("--green", "#00ff00ff"),
        ResolvedVariable::new("--green--42deg--adjusthue", "hsl(42, 42%, 42%)"),
    ]
}

#[test]
fn test_fallbacks_for_used_variables() {
    assert_eq!(
        get_css_fallbacks(CSS, &used_vars()),
        concat!(
            "html {\n",
            "  color: rgba(0, 0, 0, 0);\n",
            "  background-color: #fff;\n",
            "}\n",
            "\n",
            "html:hover {\n",
            "  color: #00ff00ff;\n",
            "}\n",
            "\n",
            "@media (max-width: 600px) {\n",
            "  html {\n",
            "    background-color: hsl(42, 42%, 42%);\n",
            "  }\n",
            "}"
        )
    );
}

#[test]
fn test_fallbacks_keeping_original_declarations() {
    let options = FallbackOptions {
        keep_original: true,
    };
    let out = get_css_fallbacks_with(CSS, &used_vars(), &options);
    insta::assert_snapshot!(out, @r"
    html {
      color: rgba(0, 0, 0, 0);
      color: var(--black);
      background-color: #fff;
      background-color: var(--black--color-invert);
    }

    html:hover {
      color: #00ff00ff;
      color: var(--green);
    }

    @media (max-width: 600px) {
      html {
        background-color: hsl(42, 42%, 42%);
        background-color: var(--green--42deg--adjusthue);
      }
    }
    ");
}

#[test]
fn test_no_empty_blocks() {
    let out = get_css_fallbacks(CSS, &used_vars()[2..]);
    assert!(!out.contains("{\n}"));
    assert!(!out.contains("@document"));
    assert!(!out.contains("body"));
    assert!(out.starts_with("html:hover {"));
}

#[test]
fn test_comments_are_ignored() {
    let css = "/* a { color: var(--black) } */\nb { color: var(--green); /* var(--black) */ }";
    assert_eq!(
        get_css_fallbacks(css, &used_vars()),
        "b {\n  color: #00ff00ff;\n}"
    );
}
