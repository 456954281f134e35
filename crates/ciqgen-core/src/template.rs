//! `{name}` token substitution for XML and script templates
//!
//! Substitution is a single left-to-right pass driven by an explicit
//! key→value map. Substituted values are never re-scanned, so a value that
//! happens to contain `{other}` cannot trigger a second replacement the way
//! chained literal replaces would. Tokens with no mapping stay verbatim.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CiqgenError, Result};

/// Placeholder values for one substitution pass. BTreeMap keeps iteration
/// deterministic for debug output.
pub type Substitutions = BTreeMap<String, String>;

/// Marker embedded in generated text when a reference lookup misses.
/// Generation keeps going; the marker is grep-able in the artifact.
pub fn lookup_miss(name: &str, sheet: &str) -> String {
    format!("#ERR['{}' not found in {}]", name, sheet)
}

/// Apply the substitution map to a template in one pass.
pub fn substitute(template: &str, values: &Substitutions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        match after_open.find(['{', '}']) {
            // A well-formed token: look it up.
            Some(end) if after_open.as_bytes()[end] == b'}' => {
                let key = &after_open[..end];
                match values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after_open[end + 1..];
            }
            // Nested `{` or unterminated token: emit the brace and rescan
            // from the character after it.
            _ => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Load a named template from the template directory.
pub fn load_template(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(CiqgenError::TemplateNotFound {
            name: name.to_string(),
            dir: dir.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}
