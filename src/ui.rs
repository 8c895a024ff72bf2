use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Render a boolean as a coloured yes/no
pub fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

/// Print a unified line diff between two texts; returns whether they differ
pub fn diff(old: &str, new: &str) -> bool {
    let diff = similar::TextDiff::from_lines(old, new);
    let mut has_changes = false;

    for hunk in diff.unified_diff().context_radius(2).iter_hunks() {
        has_changes = true;
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = change.value().trim_end_matches('\n');
            match change.tag() {
                similar::ChangeTag::Delete => println!("{}", format!("-{line}").red()),
                similar::ChangeTag::Insert => println!("{}", format!("+{line}").green()),
                similar::ChangeTag::Equal => println!(" {}", line.dimmed()),
            }
        }
    }

    if !has_changes {
        println!("  {}", "(no changes)".dimmed());
    }
    has_changes
}
