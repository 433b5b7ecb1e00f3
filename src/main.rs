// src/main.rs
mod cli;

use std::path::Path;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use log::info;
use fortscan_rs::common::{banner, logger, utils};
use fortscan_rs::output::{console, file, report};
use fortscan_rs::{ScanCoordinator, ScanResult};
use cli::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(args.verbose, args.silent, args.log_file.as_deref())?;

    if !args.silent {
        banner::show();
    }

    let (result, output) = match &args.command {
        Command::Network { scan, ports } => {
            let coordinator = ScanCoordinator::new(scan.options(false));
            info!("Starting network scan on {} with port range {}", scan.target, ports);
            (coordinator.network_scan(&scan.target, ports).await?, &scan.output)
        }
        Command::Web { scan, recursive } => {
            let coordinator = ScanCoordinator::new(scan.options(*recursive));
            info!("Starting web scan on {}", scan.target);
            (coordinator.web_scan(&scan.target).await?, &scan.output)
        }
        Command::Full { scan, ports, recursive } => {
            let coordinator = ScanCoordinator::new(scan.options(*recursive));
            (coordinator.full_scan(&scan.target, ports).await.context("full scan failed")?, &scan.output)
        }
        Command::Report { input, output, format } => {
            report::generate(input, output, *format)?;
            println!("[+] Report generated: {}", output.display());
            return Ok(());
        }
    };

    finish(&result, output.as_deref())
}

fn finish(result: &ScanResult, output: Option<&Path>) -> anyhow::Result<()> {
    console::display(result);

    let elapsed = (result.end_time - result.start_time)
        .to_std()
        .unwrap_or(Duration::ZERO);
    println!("\n[*] Scan finished in {}", utils::format_duration(elapsed));

    if let Some(path) = output {
        file::save_json(path, result)?;
        println!("[+] Results saved to {}", path.display());
    }

    Ok(())
}
