//! Name and path normalization
//!
//! These follow the conventions the build tool uses for generated projects,
//! so names produced here line up with what its own generators would write.

use regex::Regex;
use std::sync::LazyLock;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid regex"));

/// Kebab-case file name: `myFunction` / `My Function` / `my_function` -> `my-function`
///
/// Each whitespace character and underscore becomes one `-`.
pub fn file_name(s: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(s, "$1-$2")
        .to_lowercase()
        .replace(|c: char| c.is_whitespace() || c == '_', "-")
}

/// Join path fragments with `/`, the separator used inside project configuration
///
/// Empty and `.` segments are dropped and `..` pops the previous segment.
/// Returns `.` when nothing remains.
pub fn join_path_fragments(fragments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for fragment in fragments {
        for segment in fragment.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|last| *last != "..") {
                        parts.pop();
                    } else {
                        parts.push("..");
                    }
                }
                other => parts.push(other),
            }
        }
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
