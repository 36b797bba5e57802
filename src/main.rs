use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use smalisift::report::{ReportOptions, TerminalReporter};
use smalisift::{
    App, Config, Decompiler, NamespaceFilter, PrefixList, PrefixMatch, ReportFormat, Reporter,
    SourceCollector,
};

/// smalisift - organize decompiled smali into classes and methods, minus library code
#[derive(Parser, Debug)]
#[command(name = "smalisift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// APK to decompile, or a directory apktool already produced
    #[arg(required_unless_present = "completions")]
    path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Decompiler executable (default: apktool)
    #[arg(long, value_name = "BIN")]
    decompiler: Option<String>,

    /// Application package to keep, instead of reading it from the manifest
    #[arg(long, value_name = "PACKAGE")]
    package: Option<String>,

    /// Third-party library prefix list (one prefix per line)
    #[arg(long, value_name = "FILE")]
    libraries: Option<PathBuf>,

    /// System library prefix list (one prefix per line)
    #[arg(long, value_name = "FILE")]
    system_libraries: Option<PathBuf>,

    /// How class names are matched against prefixes
    #[arg(long, value_enum)]
    prefix_match: Option<PrefixMatch>,

    /// Extract methods in parallel
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the smali files of the classes that survive filtering
    #[arg(long)]
    list_files: bool,

    /// List every smali file in the decompiled tree, before filtering
    #[arg(long)]
    list_all_files: bool,

    /// Print every method that survives filtering
    #[arg(long)]
    show_methods: bool,

    /// Delete the APK once it has been decompiled
    #[arg(long)]
    delete_apk: bool,

    /// Delete the decompiled directory when done
    #[arg(long)]
    cleanup: bool,

    /// Do not ask for confirmation before deleting anything
    #[arg(short, long)]
    yes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("smalisift v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(Path::new("."))?
    };

    // Override with CLI arguments
    if let Some(decompiler) = &cli.decompiler {
        config.decompiler = decompiler.clone();
    }
    if let Some(libraries) = &cli.libraries {
        config.libraries = libraries.clone();
    }
    if let Some(system) = &cli.system_libraries {
        config.system_libraries = system.clone();
    }
    if let Some(mode) = cli.prefix_match {
        config.prefix_match = mode;
    }
    if cli.parallel {
        config.parallel = true;
    }

    Ok(config)
}

fn run(config: &Config, cli: &Cli) -> Result<()> {
    use std::time::Instant;

    let start_time = Instant::now();
    let Some(path) = cli.path.as_deref() else {
        return Err(miette::miette!("no APK or decompiled directory given"));
    };

    let mut app = if path.is_dir() {
        App::from_decompiled(path)
    } else {
        App::new(path)
    }
    .with_parallel(config.parallel);

    let collector = SourceCollector::new(&config.disassembly_prefix, &config.source_extension);

    // Step 1: Decompile
    if app.apk_path().is_some() {
        decompile_with_spinner(&mut app, &Decompiler::new(&config.decompiler), cli.quiet)?;
        if cli.delete_apk && confirm(cli, "Delete the APK file?") {
            app.delete_apk();
        }
    }

    // Step 2: Collect, aggregate, extract
    info!("Extracting smali code from {}", app.output_dir().display());
    app.load(&collector);
    debug!("{}", app);

    if cli.list_all_files {
        TerminalReporter::new()
            .with_base_path(app.output_dir().to_path_buf())
            .print_file_list("All smali files", &collector.list_source_files(app.output_dir()));
    }

    // Step 3: Filter
    let package = cli
        .package
        .clone()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| app.package_name());
    let filter = if package.is_some() {
        NamespaceFilter::new()
            .with_system_libraries(PrefixList::load(&config.system_libraries))
            .with_libraries(PrefixList::load(&config.libraries))
            .with_mode(config.prefix_match)
    } else {
        NamespaceFilter::new()
    };
    let filter_report = app.filter(&filter, package.as_deref());

    // Step 4: Report
    let files = if cli.list_files || matches!(cli.format, OutputFormat::Json) {
        app.source_files(&collector)
    } else {
        Vec::new()
    };

    let options = ReportOptions {
        output_path: cli.output.clone(),
        base_path: Some(app.output_dir().to_path_buf()),
        show_files: cli.list_files,
        show_methods: cli.show_methods,
    };
    Reporter::with_options(cli.format.into(), options).report(&app, &filter_report, &files)?;

    if cli.cleanup && confirm(cli, "Delete the decompiled directory?") {
        app.delete_all();
    }

    if !cli.quiet && matches!(cli.format, OutputFormat::Terminal) {
        println!();
        println!(
            "{}",
            format!("Done in {:.2}s", start_time.elapsed().as_secs_f64()).dimmed()
        );
    }

    Ok(())
}

fn decompile_with_spinner(app: &mut App, decompiler: &Decompiler, quiet: bool) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Decompiling with {}...", decompiler.binary()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = app.decompile(decompiler);
    spinner.finish_and_clear();

    result?;
    Ok(())
}

fn confirm(cli: &Cli, prompt: &str) -> bool {
    if cli.yes {
        return true;
    }

    match dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
    {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Could not read confirmation ({}); skipping deletion", e);
            false
        }
    }
}
