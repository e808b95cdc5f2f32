use crate::arch::ArchSpec;
use crate::check::{CapabilityReport, ModuleStatus};
use colored::Colorize;

const LABEL_W: usize = 14;

pub fn print_host_summary(report: &CapabilityReport, arch: &ArchSpec) {
    let mut rows: Vec<(&str, String)> = vec![("Architecture", arch.arch.to_string())];

    match &report.cpu {
        Ok(cpu) => {
            rows.push(("CPU Vendor", cpu.vendor.clone()));
            rows.push(("CPU Model", cpu.model.clone()));
        }
        Err(e) => rows.push(("CPU", format!("unavailable ({})", e))),
    }

    // Box width from content
    let inner_w = rows
        .iter()
        .map(|(l, v)| l.len().max(LABEL_W) + 2 + v.len())
        .max()
        .unwrap_or(40);

    let title = "Host";
    let fill = inner_w.saturating_sub(1 + title.len());
    println!("╭─ {} {}╮", title.bold(), "─".repeat(fill));

    for (label, value) in &rows {
        let padded = format!("{:<w$}", label, w = LABEL_W);
        let pad = inner_w.saturating_sub(LABEL_W + 2 + value.len());
        println!("│ {}  {}{} │", padded.dimmed(), value, " ".repeat(pad));
    }

    println!("╰{}╯", "─".repeat(inner_w + 2));
}

pub fn print_module_statuses(statuses: &[ModuleStatus]) {
    let title = format!("Kernel modules ({})", statuses.len());
    let divider_w: usize = 48;
    let fill = divider_w.saturating_sub(2 + title.len());
    println!("── {} {}", title.bold(), "─".repeat(fill));

    for status in statuses {
        let tag = if status.loaded {
            "  OK".green().bold()
        } else if status.required {
            "MISS".red().bold()
        } else {
            " OPT".dimmed().bold()
        };

        println!("  {} {}", tag, status.name);

        if !status.loaded {
            let note = if status.required {
                format!("expected at /{}", status.path)
            } else {
                format!("optional, not loaded (/{})", status.path)
            };
            println!("       {}", note.dimmed());
        }
    }

    println!("{}", "─".repeat(divider_w));
}

pub fn print_verdict(report: &CapabilityReport) {
    if report.capable() {
        println!(
            "  {}",
            "Host can run VM-based containers".green().bold()
        );
        return;
    }

    println!("  {}", "Host cannot run VM-based containers".red().bold());

    // Name the specific failing checks, never a generic failure.
    if let Err(e) = &report.cpu {
        println!("  {} {}", "✗".red(), e);
    }
    let missing = report.missing_modules();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|s| s.name.as_str()).collect();
        println!(
            "  {} missing required kernel modules: {}",
            "✗".red(),
            names.join(", ")
        );
    }
}

pub fn print_report_json(report: &CapabilityReport, arch: &ArchSpec) {
    let cpu = match &report.cpu {
        Ok(cpu) => serde_json::json!({
            "vendor": cpu.vendor,
            "model": cpu.model,
        }),
        Err(e) => serde_json::json!({
            "error": e.to_string(),
        }),
    };

    let output = serde_json::json!({
        "arch": arch.arch,
        "cpu": cpu,
        "modules": report.modules,
        "missing_modules": report
            .missing_modules()
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>(),
        "capable": report.capable(),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
