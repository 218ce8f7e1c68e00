pub mod generate;
pub mod migrate;
pub mod projects;
pub mod run;

use colored::Colorize;
use devkit::Change;

/// Print pending changes from a dry run as line diffs
pub fn print_changes<'a>(changes: impl IntoIterator<Item = &'a Change>) {
    let mut any = false;
    for change in changes {
        any = true;
        let label = if change.is_create() { "CREATE" } else { "UPDATE" };
        println!();
        println!("{} {}", label.yellow().bold(), change.path);

        let before = change.before.as_deref().unwrap_or("");
        let diff = similar::TextDiff::from_lines(before, &change.after);
        for line in diff.iter_all_changes() {
            match line.tag() {
                similar::ChangeTag::Delete => print!("    {}", format!("- {line}").red()),
                similar::ChangeTag::Insert => print!("    {}", format!("+ {line}").green()),
                similar::ChangeTag::Equal => {}
            }
        }
    }

    if !any {
        println!("    {}", "(no changes)".dimmed());
    }
}
