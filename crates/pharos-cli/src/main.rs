use clap::Parser;
use console::style;
use pharos_core::summary::RunSummary;
use std::path::PathBuf;
use std::process;

mod pipeline;

#[derive(Parser)]
#[command(name = "pharos")]
#[command(version)]
#[command(
    about = "Batch Lighthouse audits across an environment's URL list",
    long_about = "Pharos reads the URL sheet of the given environment from an input workbook, \
                  runs a Lighthouse audit per URL and device profile (desktop, mobile, tablet), \
                  and aggregates the category scores into a color-coded xlsx report."
)]
struct Cli {
    /// Environment whose URL sheet to audit (e.g. DEV, SIT, UAT, PROD)
    #[arg(value_name = "ENVIRONMENT")]
    environment: String,

    /// Input workbook with one URL sheet per environment
    #[arg(short, long, default_value = "urls.xlsx")]
    input: PathBuf,

    /// Base directory for audit artifacts and the report workbook
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Scrape scores from the rendered HTML report in a browser session
    /// instead of reading the JSON artifact
    #[arg(long)]
    scrape_html: bool,

    /// Path to the lighthouse executable (default: lighthouse on PATH, then npx)
    #[arg(long, env = "PHAROS_LIGHTHOUSE")]
    lighthouse: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // A missing argument prints usage to stderr and exits 1;
            // --help and --version go to stdout and exit 0
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(cli.verbose);

    let options = pipeline::RunOptions {
        environment: cli.environment,
        input: cli.input,
        output_dir: cli.output_dir,
        scrape_html: cli.scrape_html,
        lighthouse: cli.lighthouse,
    };

    match pipeline::execute(options) {
        Ok(summary) => {
            print_summary(&summary);
            process::exit(summary.exit_code());
        }
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            process::exit(1);
        }
    }
}

fn print_summary(summary: &RunSummary) {
    if summary.attempted() == 0 {
        return;
    }

    if summary.failures().is_empty() {
        println!("✅ {} audits completed", summary.completed());
        return;
    }

    println!(
        "⚠️  {} of {} audits failed:",
        summary.failures().len(),
        summary.attempted()
    );
    for failure in summary.failures() {
        println!(
            "   {} {} on {} ({}): {}",
            style("✗").red(),
            failure.url,
            failure.device,
            failure.stage,
            failure.message
        );
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pharos=debug,pharos_core=debug,pharos_audit=debug,pharos_browser=debug")
    } else {
        EnvFilter::new("pharos=info,pharos_core=info,pharos_audit=info,pharos_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
