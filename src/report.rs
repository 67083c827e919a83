use crate::model::{AuthorLines, Summary};
use console::style;
use std::fmt::Write;

const BANNER: &str = "---------------------";
pub const TOTAL_TITLE: &str = "Total";

/// A repository section, followed by a blank separator line.
pub fn render_repository(name: &str, counts: &[AuthorLines]) -> String {
    let mut out = render_section(name, counts);
    out.push('\n');
    out
}

pub fn render_total(counts: &[AuthorLines]) -> String {
    render_section(TOTAL_TITLE, counts)
}

fn render_section(title: &str, counts: &[AuthorLines]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "{} {}", style("Project:").bold(), style(title).bold());
    let _ = writeln!(out, "{BANNER}");
    for count in counts {
        let _ = writeln!(out, "{}: {} lines", count.author, count.lines);
    }
    out
}

/// Every repository in configured order, then the cross-repository total.
pub fn render(summary: &Summary) -> String {
    let mut out = String::new();
    for repository in &summary.repositories {
        out.push_str(&render_repository(
            &repository.root.display().to_string(),
            &repository.authors.sorted(),
        ));
    }
    out.push_str(&render_total(&summary.total().sorted()));
    out
}

pub fn print_report(summary: &Summary) {
    print!("{}", render(summary));
}
