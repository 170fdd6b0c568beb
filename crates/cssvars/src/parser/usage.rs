//! Recovering the call set a stylesheet actually uses.
//!
//! Compiled CSS only contains variable names such as
//! `--primary--500--darken`. Given the known base color names, each name is
//! split into a base color and a suffix, and the suffix is decoded back into
//! the call that produced it.

use super::blocks::read_stylesheet;
use super::reference::referenced_names;
use crate::calls::{CallChain, ColorCallSet};
use std::collections::HashSet;

/// Scans `css` for references to variables derived from `candidates`.
///
/// Returns a call set without values. Colors appear in order of first use;
/// each call is recorded once. A referenced base variable (`var(--primary)`)
/// registers its color with no calls. Names whose suffix does not decode
/// are ignored.
pub fn get_used_variables<S: AsRef<str>>(css: &str, candidates: &[S]) -> ColorCallSet {
    let sheet = read_stylesheet(css);
    let mut set = ColorCallSet::new();
    let mut seen: HashSet<String> = HashSet::new();

    for decl in sheet.declarations() {
        for name in referenced_names(&decl.value) {
            let Some(token) = name.strip_prefix("--") else {
                continue;
            };
            let Some(color) = match_candidate(token, candidates) else {
                continue;
            };
            let suffix = &token[color.len()..];
            let Some(chain) = CallChain::from_name_suffix(suffix) else {
                log::debug!("ignoring {}: cannot decode {:?}", name, suffix);
                continue;
            };

            let def = set.entry(color);
            let Some(call) = chain.to_call() else {
                continue;
            };
            if !seen.insert(name.to_string()) {
                continue;
            }
            log::trace!("{} uses {}", color, name);
            def.calls.push(call);
        }
    }
    set
}

/// The longest candidate that `token` is, or that `token` extends with a
/// `--` segment.
fn match_candidate<'a, S: AsRef<str>>(token: &str, candidates: &'a [S]) -> Option<&'a str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| {
            !c.is_empty()
                && token
                    .strip_prefix(*c)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with("--"))
        })
        .max_by_key(|c| c.len())
}
