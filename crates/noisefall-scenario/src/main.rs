use anyhow::Result;
use clap::Parser;
use noisefall_scenario::cli::Cli;
use noisefall_scenario::run_scenario;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = cli.load_config()?;
    cli.apply_overrides(&mut cfg);

    let summary = run_scenario(&cfg, &cli.outdir, !cli.no_plot)?;

    println!("{}", summary.report);
    println!();
    println!("Run directory: {}", summary.outputs.output_dir.display());
    println!("CSV: {}", summary.outputs.curve_path.display());
    println!("Summary: {}", summary.outputs.summary_path.display());
    if let Some(plot) = &summary.outputs.plot_path {
        println!("Chart: {}", plot.display());
    }

    Ok(())
}
