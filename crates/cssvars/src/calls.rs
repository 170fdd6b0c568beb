//! Color call sets: base colors plus the function chains derived from them.
//!
//! A [`ColorFnCall`] nests through `compose_arg` ("apply `lighten` to the
//! result of `darken`"). Before anything is evaluated the nesting is unwound
//! into a flat [`CallChain`], innermost call first, so evaluation and naming
//! are both a single pass over a slice.
//!
//! ```
//! use cssvars::calls::ColorFnCall;
//! use cssvars::types::ColorFn;
//!
//! let call = ColorFnCall::new(ColorFn::AdjustHue, "42deg")
//!     .compose(ColorFnCall::new(ColorFn::Lighten, "4200"));
//! let chain = call.chain();
//!
//! assert_eq!(chain.steps()[0].function, ColorFn::Lighten);
//! assert_eq!(
//!     chain.variable_name("black").unwrap(),
//!     "--black--42deg--adjusthue--4200--lighten"
//! );
//! ```

use crate::error::{CssVarsError, Result};
use crate::types::{ColorFn, ColorValue, Hsl};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single color function call, optionally applied to the result of another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorFnCall {
    #[serde(rename = "fn")]
    pub function: ColorFn,
    #[serde(default)]
    pub fn_arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compose_arg: Option<Box<ColorFnCall>>,
}

impl ColorFnCall {
    pub fn new(function: ColorFn, arg: impl Into<String>) -> Self {
        Self {
            function,
            fn_arg: Some(arg.into()),
            compose_arg: None,
        }
    }

    /// A call for functions without an argument (`color-invert`, ...).
    pub fn bare(function: ColorFn) -> Self {
        Self {
            function,
            fn_arg: None,
            compose_arg: None,
        }
    }

    /// Applies this call to the result of `inner` instead of the base color.
    ///
    /// If this call already composes another one, `inner` is attached at the
    /// bottom of the existing chain.
    pub fn compose(mut self, inner: ColorFnCall) -> Self {
        let bottom = match self.compose_arg.take() {
            Some(existing) => (*existing).compose(inner),
            None => inner,
        };
        self.compose_arg = Some(Box::new(bottom));
        self
    }

    /// Unwinds the nesting into a flat chain.
    pub fn chain(&self) -> CallChain {
        let mut steps = Vec::new();
        let mut current = Some(self);
        while let Some(call) = current {
            steps.push(ChainStep {
                function: call.function,
                arg: call.fn_arg.clone(),
            });
            current = call.compose_arg.as_deref();
        }
        steps.reverse();
        CallChain { steps }
    }
}

/// One step of a [`CallChain`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChainStep {
    pub function: ColorFn,
    pub arg: Option<String>,
}

/// A call chain ordered from the first applied (innermost) call to the last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallChain {
    steps: Vec<ChainStep>,
}

impl CallChain {
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Applies every step to `base`, innermost first.
    pub fn apply(&self, base: Hsl) -> Result<Hsl> {
        self.steps
            .iter()
            .try_fold(base, |color, step| step.function.apply(color, step.arg.as_deref()))
    }

    /// Builds the custom property name for this chain.
    ///
    /// The name is `--<color>` followed by one `--<arg>--<fn>` segment per
    /// call, outermost call first. Calls without an argument contribute just
    /// `--<fn>`.
    pub fn variable_name(&self, color_name: &str) -> Result<String> {
        let mut name = format!("--{}", color_name);
        for step in self.steps.iter().rev() {
            if step.function.takes_argument() {
                let arg = step.arg.as_deref().ok_or_else(|| CssVarsError::InvalidArgument {
                    function: step.function.name().to_string(),
                    argument: String::new(),
                    reason: "missing argument".to_string(),
                })?;
                name.push_str("--");
                name.push_str(&step.function.name_token(arg)?);
            }
            name.push_str("--");
            name.push_str(step.function.name());
        }
        Ok(name)
    }

    /// Decodes the part of a variable name that follows `--<color>`.
    ///
    /// Returns `None` when the suffix is not a sequence of known functions
    /// with valid arguments. An empty suffix decodes to an empty chain (the
    /// base variable).
    pub fn from_name_suffix(suffix: &str) -> Option<CallChain> {
        if suffix.is_empty() {
            return Some(CallChain::default());
        }

        let mut tokens = suffix.strip_prefix("--")?.split("--");
        let mut steps = Vec::new();
        while let Some(token) = tokens.next() {
            match token.parse::<ColorFn>() {
                Ok(function) if !function.takes_argument() => {
                    steps.push(ChainStep {
                        function,
                        arg: None,
                    });
                }
                _ => {
                    let function = tokens.next()?.parse::<ColorFn>().ok()?;
                    if !function.takes_argument() {
                        return None;
                    }
                    function.name_token(token).ok()?;
                    steps.push(ChainStep {
                        function,
                        arg: Some(token.to_string()),
                    });
                }
            }
        }
        steps.reverse();
        Some(CallChain { steps })
    }

    /// Rebuilds the nested call form. `None` for an empty chain.
    pub fn to_call(&self) -> Option<ColorFnCall> {
        self.steps.iter().fold(None, |inner, step| {
            Some(ColorFnCall {
                function: step.function,
                fn_arg: step.arg.clone(),
                compose_arg: inner.map(Box::new),
            })
        })
    }
}

/// The calls and optional base value recorded for one color name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorCallDef {
    #[serde(default)]
    pub calls: Vec<ColorFnCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ColorValue>,
}

impl ColorCallDef {
    pub fn new(value: impl Into<ColorValue>) -> Self {
        Self {
            calls: Vec::new(),
            value: Some(value.into()),
        }
    }

    pub fn with_call(mut self, call: ColorFnCall) -> Self {
        self.calls.push(call);
        self
    }
}

/// Color name to [`ColorCallDef`], in insertion order.
///
/// Insertion order is output order for every generated artifact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorCallSet {
    colors: IndexMap<String, ColorCallDef>,
}

impl ColorCallSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the definition for `name`, keeping its position if
    /// it was already present.
    pub fn insert(&mut self, name: impl Into<String>, def: ColorCallDef) {
        self.colors.insert(name.into(), def);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_color(mut self, name: impl Into<String>, def: ColorCallDef) -> Self {
        self.insert(name, def);
        self
    }

    /// Returns the definition for `name`, creating an empty one if needed.
    pub fn entry(&mut self, name: &str) -> &mut ColorCallDef {
        self.colors.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&ColorCallDef> {
        self.colors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorCallDef)> {
        self.colors.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, ColorCallDef)> for ColorCallSet {
    fn from_iter<I: IntoIterator<Item = (N, ColorCallDef)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(n, d)| (n.into(), d)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> ColorFnCall {
        ColorFnCall::new(ColorFn::AdjustHue, "42deg")
            .compose(ColorFnCall::new(ColorFn::Lighten, "4200"))
    }

    #[test]
    fn test_chain_is_innermost_first() {
        let chain = nested().chain();
        let functions: Vec<ColorFn> = chain.steps().iter().map(|s| s.function).collect();
        assert_eq!(functions, vec![ColorFn::Lighten, ColorFn::AdjustHue]);
    }

    #[test]
    fn test_compose_appends_at_the_bottom() {
        let call = nested().compose(ColorFnCall::bare(ColorFn::ColorInvert));
        let chain = call.chain();
        assert_eq!(chain.steps()[0].function, ColorFn::ColorInvert);
        assert_eq!(chain.steps().len(), 3);
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(
            nested().chain().variable_name("black").unwrap(),
            "--black--42deg--adjusthue--4200--lighten"
        );
        assert_eq!(
            ColorFnCall::bare(ColorFn::ColorInvert)
                .chain()
                .variable_name("black")
                .unwrap(),
            "--black--color-invert"
        );
        assert_eq!(
            ColorFnCall::new(ColorFn::Darken, "2.5%")
                .chain()
                .variable_name("primary")
                .unwrap(),
            "--primary--250--darken"
        );
    }

    #[test]
    fn test_missing_argument_fails_naming() {
        let call = ColorFnCall {
            function: ColorFn::Lighten,
            fn_arg: None,
            compose_arg: None,
        };
        assert!(matches!(
            call.chain().variable_name("black"),
            Err(CssVarsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_suffix_decodes_back_to_call() {
        let chain = CallChain::from_name_suffix("--42deg--adjusthue--4200--lighten").unwrap();
        assert_eq!(chain.to_call().unwrap(), nested());

        let invert = CallChain::from_name_suffix("--color-invert").unwrap();
        assert_eq!(
            invert.to_call().unwrap(),
            ColorFnCall::bare(ColorFn::ColorInvert)
        );

        let negative = CallChain::from_name_suffix("---10deg--adjusthue").unwrap();
        assert_eq!(negative.steps()[0].arg.as_deref(), Some("-10deg"));

        assert!(CallChain::from_name_suffix("").unwrap().is_empty());
    }

    #[test]
    fn test_suffix_rejects_garbage() {
        assert!(CallChain::from_name_suffix("-light").is_none());
        assert!(CallChain::from_name_suffix("--4200").is_none());
        assert!(CallChain::from_name_suffix("--4200--blur").is_none());
        assert!(CallChain::from_name_suffix("--shade--lighten").is_none());
        assert!(CallChain::from_name_suffix("--42--color-invert").is_none());
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let json = r#"{
            "black": {
                "value": { "h": 42, "s": 42, "l": 42 },
                "calls": [
                    { "fn": "adjusthue", "fnArg": "42deg",
                      "composeArg": { "fn": "lighten", "fnArg": "4200" } },
                    { "fn": "color-invert", "fnArg": null }
                ]
            },
            "white": {}
        }"#;
        let set: ColorCallSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["black", "white"]);
        let black = set.get("black").unwrap();
        assert_eq!(black.calls[0], nested());
        assert_eq!(black.value, Some(ColorValue::hsl(42.0, 42.0, 42.0)));
        assert!(set.get("white").unwrap().value.is_none());
    }
}
