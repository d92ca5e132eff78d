use clap::Parser;
use coil_quote::config::cli::{Command, OutputFormat, QuoteArgs};
use coil_quote::core::batch::quote_batch_file;
use coil_quote::utils::logger;
use coil_quote::{CliConfig, PricingConfig, PricingEngine, QuoteError, QuoteReport};

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting coil-quote");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> Result<(), QuoteError> {
    let config = load_config(cli)?;
    // Fails fast on unusable pricing before any input is looked at.
    let engine = PricingEngine::new(config)?;
    tracing::info!("✅ Pricing configuration loaded and validated");

    match &cli.command {
        Command::Quote(args) => run_quote(&engine, args),
        Command::Batch { input } => {
            let stdout = std::io::stdout();
            let summary = quote_batch_file(&engine, input, stdout.lock())?;
            if summary.rejected > 0 {
                tracing::warn!("{} row(s) rejected, see the rejection column", summary.rejected);
            }
            Ok(())
        }
        Command::Config => {
            print!("{}", engine.config().to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(cli: &CliConfig) -> Result<PricingConfig, QuoteError> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading pricing from: {}", path.display());
            PricingConfig::from_file(path)
        }
        None => {
            tracing::info!("No pricing file given, using built-in prices");
            Ok(PricingConfig::default())
        }
    }
}

fn run_quote(engine: &PricingEngine, args: &QuoteArgs) -> Result<(), QuoteError> {
    let request = args.to_request();
    let breakdown = engine.quote(&request)?;

    let issued_on = chrono::Local::now().date_naive();
    let report = QuoteReport::new(
        &request,
        &breakdown,
        &engine.config().display.currency,
        issued_on,
    );

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
