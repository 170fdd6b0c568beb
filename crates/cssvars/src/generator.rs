//! Computing custom property values from a [`ColorCallSet`].
//!
//! - [`ColorUpdater`] resolves one color at a time and can push the result
//!   into any [`StyleTarget`] (a live document, a map, a recorder in tests).
//! - [`ColorGenerator`] resolves the whole set and renders Sass / CSS text.
//!
//! For each color the base variable comes first, followed by one variable
//! per top-level call in call order:
//!
//! ```
//! use cssvars::calls::{ColorCallDef, ColorCallSet, ColorFnCall};
//! use cssvars::generator::ColorUpdater;
//! use cssvars::types::ColorFn;
//!
//! let set = ColorCallSet::new().with_color(
//!     "primary",
//!     ColorCallDef::new("#00d1b2").with_call(ColorFnCall::bare(ColorFn::ColorInvert)),
//! );
//! let vars = ColorUpdater::new(set).get_updated_vars("primary", "#00d1b2").unwrap();
//!
//! assert_eq!(vars[0].name, "--primary");
//! assert_eq!(vars[1].name, "--primary--color-invert");
//! ```

use crate::calls::{ColorCallSet, ColorFnCall};
use crate::error::{CssVarsError, Result};
use crate::types::ColorValue;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

/// Selector used by [`ColorGenerator::create_writable_sass_file`] when none
/// is given.
pub const DEFAULT_BLOCK_WRAPPER: &str = ":root";

/// A custom property name with its computed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedVariable {
    pub name: String,
    pub value: String,
}

impl ResolvedVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Anything custom properties can be written to.
///
/// Implementations for the std maps and [`IndexMap`] insert or overwrite and
/// never fail. A `Vec<ResolvedVariable>` records every call in order.
pub trait StyleTarget {
    fn set_property(&mut self, name: &str, value: &str) -> Result<()>;
}

impl StyleTarget for HashMap<String, String> {
    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl StyleTarget for BTreeMap<String, String> {
    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl StyleTarget for IndexMap<String, String> {
    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl StyleTarget for Vec<ResolvedVariable> {
    fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.push(ResolvedVariable::new(name, value));
        Ok(())
    }
}

/// Resolves the variables of single colors.
#[derive(Clone, Debug, Default)]
pub struct ColorUpdater {
    call_set: ColorCallSet,
}

impl ColorUpdater {
    pub fn new(call_set: ColorCallSet) -> Self {
        Self { call_set }
    }

    pub fn call_set(&self) -> &ColorCallSet {
        &self.call_set
    }

    /// Computes the variables of `color_name` for the base color `value`.
    ///
    /// `value` replaces whatever base value the call set holds for the
    /// color; the calls come from the call set.
    pub fn get_updated_vars(
        &self,
        color_name: &str,
        value: impl Into<ColorValue>,
    ) -> Result<Vec<ResolvedVariable>> {
        let def = self
            .call_set
            .get(color_name)
            .ok_or_else(|| CssVarsError::UnknownColor(color_name.to_string()))?;
        resolve_color(color_name, &def.calls, &value.into())
    }

    /// Computes the variables of `color_name` and sets them on `target` in
    /// order. Stops at the first property the target rejects.
    pub fn update_vars_in_document<T: StyleTarget + ?Sized>(
        &self,
        color_name: &str,
        value: impl Into<ColorValue>,
        target: &mut T,
    ) -> Result<()> {
        for var in self.get_updated_vars(color_name, value)? {
            target.set_property(&var.name, &var.value)?;
        }
        Ok(())
    }

    /// Resolves every color that has a base value, in call set order.
    ///
    /// Colors without a value are skipped.
    pub fn resolved_variables(&self) -> Result<Vec<ResolvedVariable>> {
        let mut vars = Vec::new();
        for (name, def) in self.call_set.iter() {
            match &def.value {
                Some(value) => vars.extend(resolve_color(name, &def.calls, value)?),
                None => {
                    log::debug!(
                        "skipping {}: {}",
                        name,
                        CssVarsError::MissingBaseValue(name.to_string())
                    );
                }
            }
        }
        Ok(vars)
    }
}

fn resolve_color(
    color_name: &str,
    calls: &[ColorFnCall],
    value: &ColorValue,
) -> Result<Vec<ResolvedVariable>> {
    let base = value.to_rgb()?;
    let base_hsl = value.to_hsl()?;

    let mut vars = Vec::with_capacity(calls.len() + 1);
    vars.push(ResolvedVariable::new(format!("--{}", color_name), base.to_string()));

    let mut seen = HashSet::new();
    for call in calls {
        let chain = call.chain();
        let name = chain.variable_name(color_name)?;
        if !seen.insert(name.clone()) {
            log::debug!("skipping duplicate {}", name);
            continue;
        }
        let color = chain.apply(base_hsl)?.to_rgb();
        log::debug!("{} = {}", name, color);
        vars.push(ResolvedVariable::new(name, color.to_string()));
    }
    Ok(vars)
}

/// Renders a [`ColorCallSet`] as Sass / CSS text.
#[derive(Clone, Debug, Default)]
pub struct ColorGenerator {
    updater: ColorUpdater,
}

impl ColorGenerator {
    pub fn new(call_set: ColorCallSet) -> Self {
        Self {
            updater: ColorUpdater::new(call_set),
        }
    }

    pub fn updater(&self) -> &ColorUpdater {
        &self.updater
    }

    pub fn resolved_variables(&self) -> Result<Vec<ResolvedVariable>> {
        self.updater.resolved_variables()
    }

    /// One `$<name>: var(--<name>);` line per color name.
    ///
    /// Needs no values, so it can be written before any color is resolved.
    pub fn create_writable_sass_file_only_sass_base_variables(&self) -> String {
        self.updater
            .call_set()
            .names()
            .fold(String::new(), |mut out, name| {
                let _ = writeln!(out, "${}: var(--{});", name, name);
                out
            })
    }

    /// A rule block declaring every resolved variable.
    ///
    /// `block_wrapper` is the selector of the block, `:root` by default.
    pub fn create_writable_sass_file(&self, block_wrapper: Option<&str>) -> Result<String> {
        let wrapper = block_wrapper.unwrap_or(DEFAULT_BLOCK_WRAPPER);
        let mut out = format!("{} {{\n", wrapper);
        for var in self.resolved_variables()? {
            let _ = writeln!(out, "  {}: {};", var.name, var.value);
        }
        out.push('}');
        Ok(out)
    }
}
