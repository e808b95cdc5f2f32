use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use vmcap::check;
use vmcap::cli::{self, Cli, Command};
use vmcap::error::Error;
use vmcap::sysfs::SysfsRoot;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => cmd_check(cli.json)?,
        Command::Info => cmd_info(cli.json)?,
        Command::Completions { shell } => cli::print_completions(shell),
    }

    Ok(())
}

fn cmd_check(json: bool) -> Result<()> {
    if check::ci_skip_requested() {
        println!(
            "{}",
            format!(
                "{} is set; skipping host capability check",
                check::CI_NO_VIRT_ENV
            )
            .yellow()
        );
        return Ok(());
    }

    let sysfs = SysfsRoot::system();
    let arch = vmcap::arch::host_spec()?;
    let report = check::evaluate(&sysfs, &arch);

    if json {
        vmcap::output::print_report_json(&report, &arch);
    } else {
        vmcap::output::print_host_summary(&report, &arch);
        println!();
        vmcap::output::print_module_statuses(&report.modules);
        vmcap::output::print_verdict(&report);
    }

    if report.capable() {
        return Ok(());
    }

    let mut causes = Vec::new();
    if let Err(e) = &report.cpu {
        causes.push(e.to_string());
    }
    let missing: Vec<String> = report
        .missing_modules()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    if !missing.is_empty() {
        causes.push(Error::MissingModules(missing).to_string());
    }

    anyhow::bail!(
        "host cannot run VM-based containers: {}",
        causes.join("; ")
    )
}

fn cmd_info(json: bool) -> Result<()> {
    let sysfs = SysfsRoot::system();
    let arch = vmcap::arch::host_spec()?;
    let report = check::evaluate(&sysfs, &arch);

    if json {
        vmcap::output::print_report_json(&report, &arch);
    } else {
        vmcap::output::print_host_summary(&report, &arch);
        println!();
        vmcap::output::print_module_statuses(&report.modules);
    }

    Ok(())
}
