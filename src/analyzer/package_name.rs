//! Module name classification
//!
//! All knowledge of the bundler's module naming scheme lives here: which
//! names sit inside the dependency folder, which package they belong to, and
//! which pseudo-modules are never walked.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Captures the (optionally scoped) package folder after the first `/node_modules/`
static PACKAGE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/node_modules/((?:@[^/]+?/)?[^/]+?)/").unwrap()
});

const DEPENDENCY_FOLDER: &str = "/node_modules/";
const EXTERNAL_PREFIX: &str = "external ";
const BUILTIN_PREFIX: &str = "(webpack)/";
const IGNORED_SUFFIX: &str = " (ignored)";

/// Result of extracting a package name from a module name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageName<'a> {
    /// The module lives in this package
    Matched(&'a str),
    /// The module is not under a recognizable package folder
    Unmatched,
}

impl<'a> PackageName<'a> {
    /// Extract the package a module belongs to
    pub fn parse(module_name: &'a str) -> Self {
        match PACKAGE_NAME_REGEX
            .captures(module_name)
            .and_then(|caps| caps.get(1))
        {
            Some(name) => PackageName::Matched(name.as_str()),
            None => PackageName::Unmatched,
        }
    }

    /// The package name, if matched
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            PackageName::Matched(name) => Some(name),
            PackageName::Unmatched => None,
        }
    }

    /// Whether this is the named package
    pub fn is(&self, name: &str) -> bool {
        self.as_str() == Some(name)
    }
}

/// Whether a module lives in the dependency folder
pub fn is_dependency_folder(module_name: &str) -> bool {
    module_name.contains(DEPENDENCY_FOLDER)
}

/// Whether a module is a real bundled file that package traversal may enter
///
/// External placeholders, bundler runtime modules and modules the bundler
/// replaced with an empty stub are skipped.
pub fn is_traversable(module_name: &str) -> bool {
    !module_name.starts_with(EXTERNAL_PREFIX)
        && !module_name.starts_with(BUILTIN_PREFIX)
        && !module_name.ends_with(IGNORED_SUFFIX)
}

/// Strip the `./node_modules/<package>/` prefix from a file name
pub fn package_relative<'a>(module_name: &'a str, package: &str) -> Cow<'a, str> {
    let prefix = format!("./node_modules/{}/", package);
    if module_name.contains(&prefix) {
        Cow::Owned(module_name.replacen(&prefix, "", 1))
    } else {
        Cow::Borrowed(module_name)
    }
}
