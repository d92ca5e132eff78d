use crate::domain::model::QuoteRequest;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "coil-quote")]
#[command(about = "Price quotes for protective coating of HVAC coils")]
pub struct CliConfig {
    /// Path to a TOML pricing file (built-in prices are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Quote a single coil
    Quote(QuoteArgs),
    /// Quote every row of a CSV file and write the results to stdout
    Batch {
        /// CSV with columns reference,length_m,height_m,depth_m,fpi,include_primer,is_field_work
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the effective pricing configuration
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Coil length in meters
    #[arg(long)]
    pub length: f64,

    /// Coil height in meters
    #[arg(long)]
    pub height: f64,

    /// Coil depth in meters
    #[arg(long)]
    pub depth: f64,

    /// Fin density, fins per inch
    #[arg(long, default_value = "12")]
    pub fpi: u32,

    /// Include arc/bend primer
    #[arg(long)]
    pub primer: bool,

    /// Job is performed at the customer's site
    #[arg(long)]
    pub field_work: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl QuoteArgs {
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            length_m: self.length,
            height_m: self.height,
            depth_m: self.depth,
            fpi: self.fpi,
            include_primer: self.primer,
            is_field_work: self.field_work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let cli = CliConfig::parse_from([
            "coil-quote",
            "quote",
            "--length",
            "1.0",
            "--height",
            "0.8",
            "--depth",
            "0.13",
            "--fpi",
            "10",
            "--primer",
        ]);

        match cli.command {
            Command::Quote(args) => {
                let request = args.to_request();
                assert_eq!(request.height_m, 0.8);
                assert_eq!(request.fpi, 10);
                assert!(request.include_primer);
                assert!(!request.is_field_work);
                assert_eq!(args.format, OutputFormat::Text);
            }
            other => panic!("expected quote command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::parse_from([
            "coil-quote",
            "batch",
            "--input",
            "coils.csv",
            "--config",
            "pricing.toml",
            "-v",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("pricing.toml")));
        assert!(matches!(cli.command, Command::Batch { .. }));
    }

    #[test]
    fn test_fpi_defaults_to_twelve() {
        let cli = CliConfig::parse_from([
            "coil-quote",
            "quote",
            "--length",
            "1",
            "--height",
            "1",
            "--depth",
            "0.1",
        ]);
        match cli.command {
            Command::Quote(args) => assert_eq!(args.fpi, 12),
            other => panic!("expected quote command, got {:?}", other),
        }
    }
}
