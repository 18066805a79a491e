//! Root namespace and node path resolution.
//!
//! Both functions are pure: the same descriptor or root always
//! produces the same result.

use std::fmt;

use crate::descriptor::{ConnectionDescriptor, GROUP_KEY};

pub const PATH_SEPARATOR: &str = "/";

/// Group used when the descriptor does not configure one.
pub const DEFAULT_ROOT: &str = "dubbo";

/// Normalized root of the metadata tree. Always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNamespace(String);

impl RootNamespace {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RootNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the root namespace from the descriptor's `group` parameter.
///
/// Examples:
/// - group "foo"  -> "/foo"
/// - group "/foo" -> "/foo"
/// - no group     -> "/dubbo"
pub fn resolve_root(descriptor: &ConnectionDescriptor) -> RootNamespace {
    let group = descriptor.parameter_or(GROUP_KEY, DEFAULT_ROOT);
    if group.starts_with(PATH_SEPARATOR) {
        RootNamespace(group.to_string())
    } else {
        RootNamespace(format!("{}{}", PATH_SEPARATOR, group))
    }
}

/// Joins the root and a unique key with exactly one separator.
pub fn build_path(root: &RootNamespace, unique_key: &str) -> String {
    if root.as_str() == PATH_SEPARATOR {
        format!("{}{}", root, unique_key)
    } else {
        format!("{}{}{}", root, PATH_SEPARATOR, unique_key)
    }
}
