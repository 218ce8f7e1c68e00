use crate::names::join_path_fragments;
use crate::tree::Tree;

/// Find `<dir>/<base>.<ext>` for the first extension that exists
///
/// Extensions are tried in order, so earlier ones take priority. Returns the
/// workspace-relative path, or `None` when no candidate exists.
pub fn find_config_file<T: Tree + ?Sized>(
    tree: &T,
    dir: &str,
    base: &str,
    extensions: &[&str],
) -> Option<String> {
    extensions.iter().find_map(|ext| {
        let candidate = join_path_fragments(&[dir, &format!("{base}.{ext}")]);
        let found = tree.exists(&candidate);
        log::trace!("Probe {candidate}: {}", if found { "found" } else { "absent" });
        found.then_some(candidate)
    })
}
