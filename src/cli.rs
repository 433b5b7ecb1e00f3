use std::path::PathBuf;
use std::time::Duration;
use clap::{Args as ClapArgs, Parser, Subcommand};
use fortscan_rs::doc::USAGE;
use fortscan_rs::output::report::ReportFormat;
use fortscan_rs::ScanOptions;

#[derive(Parser, Debug)]
#[command(
    name = "fortscan-rs",
    version,
    about = "Lightweight reconnaissance: concurrent port scanning and web header checks",
    after_help = USAGE
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Silent mode (no banner, errors only)
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan TCP ports and classify exposed services
    Network {
        #[command(flatten)]
        scan: ScanArgs,

        /// Ports to scan (e.g. 22,80,8000-8100)
        #[arg(short, long, default_value = "1-1000")]
        ports: String,
    },

    /// Check a web server's response headers
    Web {
        #[command(flatten)]
        scan: ScanArgs,

        /// Crawl linked pages (reserved)
        #[arg(short, long)]
        recursive: bool,
    },

    /// Network scan followed by a web scan
    Full {
        #[command(flatten)]
        scan: ScanArgs,

        /// Ports to scan (e.g. 22,80,8000-8100)
        #[arg(short, long, default_value = "1-1000")]
        ports: String,

        /// Crawl linked pages (reserved)
        #[arg(short, long)]
        recursive: bool,
    },

    /// Render a saved JSON result as a report
    Report {
        /// JSON file produced by a scan
        #[arg(short, long)]
        input: PathBuf,

        /// Report file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// Target host, IP or URL
    #[arg(short, long)]
    pub target: String,

    /// Connection timeout in seconds
    #[arg(long, default_value = "3")]
    pub timeout: u64,

    /// Maximum number of concurrent probes
    #[arg(short = 'T', long, default_value = "100")]
    pub threads: usize,

    /// Save results as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ScanArgs {
    pub fn options(&self, recursive: bool) -> ScanOptions {
        ScanOptions {
            timeout: Duration::from_secs(self.timeout),
            max_parallelism: self.threads,
            recursive,
            show_progress: !self.no_progress,
        }
    }
}
