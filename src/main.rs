use clap::Parser;
use img_slim::batch::run_batch;
use img_slim::cli::Args;
use img_slim::error::Result;
use img_slim::logger::{self, Verbosity};
use img_slim::processing::OptimizeOptions;
use img_slim::{error, info, interrupt, warn};
use rayon::ThreadPoolBuilder;
use std::process;

fn main() {
    let args = Args::parse();

    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    logger::set_verbosity(verbosity);

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // --max-size overrides both axes of the bounding box.
    let (max_width, max_height) = match args.max_size {
        Some(size) => (size, size),
        None => (args.max_width, args.max_height),
    };

    let options = OptimizeOptions::new(args.quality, max_width, max_height, !args.no_progressive)?;

    setup_thread_pool(args.threads);
    interrupt::install_handler();

    print_configuration(&args, &options);

    run_batch(
        &args.directory,
        args.recursive,
        args.backup,
        args.output.as_deref(),
        &options,
    )?;

    info!("\n✅ Optimization completed successfully");
    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                warn!("Failed to set thread pool size: {}", e);
            });
    }
}

fn print_configuration(args: &Args, options: &OptimizeOptions) {
    info!("🗜️  Optimization configuration:");
    info!("  📁 Directory: {}", args.directory.display());
    info!("  🔁 Recursive: {}", if args.recursive { "yes" } else { "no" });
    info!("  🎯 Quality: {}%", options.quality);
    info!(
        "  📐 Maximum size: {}x{}px",
        options.max_width, options.max_height
    );
    info!(
        "  📶 Progressive JPEG: {}",
        if options.progressive { "yes" } else { "no" }
    );
    info!("  💾 Backups: {}", if args.backup { "yes" } else { "no" });
    if let Some(output) = &args.output {
        info!("  📁 Output directory: {}", output.display());
    }
    info!("{}", "=".repeat(60));
}
