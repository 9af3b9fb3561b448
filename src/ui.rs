//! Terminal UI utilities.
//!
//! Box-drawn tables sized to the terminal, and the end-of-run summary.
//!
//! ```text
//!   ┌────────────┬────────┬───────┬──────────────────────────────┐
//!   │ Module     │ Status │ Runs  │ Failure                      │
//!   ├────────────┼────────┼───────┼──────────────────────────────┤
//!   │ dxr        │ passed │ 51/51 │                              │
//!   │ dxr_client │ FAILED │ 4/195 │ clippy --all-features (e...  │
//!   └────────────┴────────┴───────┴──────────────────────────────┘
//! ```

use crate::matrix::{ModuleStatus, RunSummary};
use colored::*;
use indicatif::HumanDuration;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        print!("{}", self.render(term_width as usize));
    }

    /// Renders the table, shrinking the widest columns to fit `max_width`.
    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(console::measure_text_width(cell));
            }
        }

        // Indent, outer borders, and " x │" per column.
        let overhead = 3 + 3 * widths.len();
        while overhead + widths.iter().sum::<usize>() > max_width {
            let (idx, &widest) = widths
                .iter()
                .enumerate()
                .max_by_key(|(_, w)| **w)
                .unwrap_or((0, &0));
            if widest <= 8 {
                break;
            }
            widths[idx] -= 1;
        }

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| {
            let mut out = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let text = console::truncate_str(cell, width, "...");
                let pad = width.saturating_sub(console::measure_text_width(&text));
                let text = if bold {
                    text.bold().to_string()
                } else {
                    text.to_string()
                };
                out.push_str(&format!(" {}{} │", text, " ".repeat(pad)));
            }
            out.push('\n');
            out
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers, true));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row, false));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

pub fn status_label(status: ModuleStatus) -> String {
    match status {
        ModuleStatus::Passed => "passed".green().to_string(),
        ModuleStatus::Aborted => "FAILED".red().bold().to_string(),
        ModuleStatus::Partial => "partial".yellow().to_string(),
        ModuleStatus::Failed => "FAILED".red().bold().to_string(),
    }
}

pub fn summary_table(summary: &RunSummary, toolchain: &str) -> Table {
    let mut table = Table::new(&["Module", "Status", "Runs", "Failure"]);
    for report in &summary.modules {
        let failure = report
            .failures
            .first()
            .map(|f| {
                let more = match report.failures.len() {
                    1 => String::new(),
                    n => format!(" (+{} more)", n - 1),
                };
                format!(
                    "{} {} {} ({}){}",
                    toolchain,
                    f.descriptor.verb,
                    f.descriptor.configuration,
                    f.status_label(),
                    more
                )
            })
            .unwrap_or_default();

        table.add_row(vec![
            report.name.clone(),
            status_label(report.status),
            format!("{}/{}", report.executed, report.planned),
            failure,
        ]);
    }
    table
}

pub fn print_summary(summary: &RunSummary, toolchain: &str) {
    println!();
    summary_table(summary, toolchain).print();

    let elapsed = HumanDuration(summary.elapsed);
    if summary.success() {
        println!(
            "{} {} invocations passed across {} module(s) in {}",
            "✓".green(),
            summary.executed(),
            summary.modules.len(),
            elapsed
        );
    } else {
        let failed = summary.modules.iter().filter(|m| !m.passed()).count();
        println!(
            "{} {} of {} module(s) failed after {} of {} invocations ({})",
            "x".red(),
            failed,
            summary.modules.len(),
            summary.executed(),
            summary.planned(),
            elapsed
        );
    }
}
