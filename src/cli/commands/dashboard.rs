//! `fha dashboard` command - KPIs, severity breakdown, cross-analysis and summary

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analytics::{compute_dashboard, Breakdown, CrossTab, DashboardReport, Kpis, LegendItem};
use crate::cli::commands::write_output;
use crate::cli::{GlobalOpts, OutputFormat, Workspace};

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {
    /// Breakdown groups shown before the rest collapse into "Other"
    #[arg(long)]
    pub max_groups: Option<usize>,

    /// Write the dashboard to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Cross-tab with printable column labels
#[derive(Debug, Serialize)]
struct CrossTabView<'a> {
    rows: &'a [String],
    columns: Vec<&'static str>,
    data: &'a [Vec<usize>],
}

/// Serialized form of the dashboard
#[derive(Debug, Serialize)]
struct DashboardView<'a> {
    kpis: Kpis,
    breakdown: Breakdown,
    legend: Vec<LegendItem>,
    cross_tab: CrossTabView<'a>,
    summary: &'a str,
}

impl<'a> DashboardView<'a> {
    fn new(report: &'a DashboardReport, max_groups: usize) -> Self {
        let breakdown = report.breakdown.collapsed(max_groups);
        let legend = breakdown.legend();
        Self {
            kpis: report.kpis,
            breakdown,
            legend,
            cross_tab: CrossTabView {
                rows: &report.cross_tab.rows,
                columns: report.cross_tab.column_labels(),
                data: &report.cross_tab.data,
            },
            summary: &report.summary,
        }
    }
}

pub fn run(args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let max_groups = args.max_groups.unwrap_or_else(|| ws.config.max_groups());
    if max_groups == 0 {
        return Err(miette::miette!("--max-groups must be at least 1"));
    }

    let report = compute_dashboard(ws.table.entries());
    let view = DashboardView::new(&report, max_groups);

    let content = match ws.format(global) {
        OutputFormat::Json => serde_json::to_string_pretty(&view).into_diagnostic()? + "\n",
        OutputFormat::Yaml => serde_yml::to_string(&view).into_diagnostic()?,
        OutputFormat::Md => render_markdown(&view, &report.cross_tab),
        _ => render_text(&view, &report.cross_tab),
    };

    write_output(&content, args.output)
}

fn matrix(cross_tab: &CrossTab) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Function".to_string()];
    header.extend(cross_tab.column_labels().into_iter().map(String::from));
    builder.push_record(header);

    for (row, counts) in cross_tab.rows.iter().zip(&cross_tab.data) {
        let mut record = vec![row.clone()];
        record.extend(counts.iter().map(|c| c.to_string()));
        builder.push_record(record);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}

fn render_text(view: &DashboardView, cross_tab: &CrossTab) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", style("FHA Dashboard").bold().underlined()));
    out.push_str(&format!(
        "  {:<28} {}\n",
        "Analyzed entries",
        style(view.kpis.total).cyan()
    ));
    out.push_str(&format!(
        "  {:<28} {}\n",
        "Catastrophic",
        style(view.kpis.catastrophic).red().bold()
    ));
    out.push_str(&format!(
        "  {:<28} {}\n",
        "Hazardous",
        style(view.kpis.hazardous).yellow().bold()
    ));

    out.push_str(&format!("\n{}\n", style("Severity Breakdown").bold()));
    if view.breakdown.is_empty() {
        out.push_str(&format!("  {}\n", style("(no classified entries)").dim()));
    }
    for group in &view.breakdown.children {
        out.push_str(&format!("  {} ({})\n", style(&group.name).cyan(), group.value));
        for leaf in &group.children {
            out.push_str(&format!("    {:<24} {}\n", leaf.name, leaf.value));
        }
    }

    out.push_str(&format!("\n{}\n", style("Cross Analysis").bold()));
    if cross_tab.is_empty() {
        out.push_str(&format!("  {}\n", style("(no classified entries)").dim()));
    } else {
        out.push_str(&matrix(cross_tab));
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", style("Summary").bold()));
    out.push_str(view.summary);
    out.push('\n');
    out
}

fn render_markdown(view: &DashboardView, cross_tab: &CrossTab) -> String {
    let mut out = String::new();
    out.push_str("# FHA Dashboard\n\n");
    out.push_str(&format!("- **Analyzed entries:** {}\n", view.kpis.total));
    out.push_str(&format!("- **Catastrophic:** {}\n", view.kpis.catastrophic));
    out.push_str(&format!("- **Hazardous:** {}\n", view.kpis.hazardous));

    out.push_str("\n## Severity Breakdown\n\n");
    for item in &view.legend {
        out.push_str(&format!("- {}: {}\n", item.name, item.value));
    }

    out.push_str("\n## Cross Analysis\n\n");
    if !cross_tab.is_empty() {
        out.push_str(&matrix(cross_tab));
        out.push('\n');
    }

    out.push_str("\n## Summary\n\n");
    out.push_str(view.summary);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Entry;

    fn entry(function: &str, severity: &str) -> Entry {
        Entry {
            function_level_1: function.to_string(),
            failure_mode: "Loss".to_string(),
            severity_classification: severity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_view_collapses_groups_and_labels_columns() {
        let entries: Vec<Entry> = ["A", "B", "C"]
            .iter()
            .map(|f| entry(f, "Major"))
            .collect();
        let report = compute_dashboard(&entries);
        let view = DashboardView::new(&report, 2);

        let names: Vec<&str> = view.breakdown.children.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["A", "Other"]);
        assert_eq!(view.breakdown.children[1].value, 2);
        assert_eq!(view.cross_tab.columns, ["Major"]);
        assert_eq!(view.legend.len(), 1);
    }

    #[test]
    fn test_matrix_has_function_header() {
        let report = compute_dashboard(&[entry("Power", "Hazardous")]);
        let text = matrix(&report.cross_tab);
        assert!(text.contains("| Function | Hazardous |"));
        assert!(text.contains("| Power    | 1         |"));
    }
}
