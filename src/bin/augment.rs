//! Remark Augment - CLI tool that adds Name, Transaction ID and Bank
//! columns to a bank-statement export.

use clap::Parser;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use remark_extractor::{
    csv_format::CsvRemarkTable, logging, xlsx_format::XlsxRemarkTable, BankIdentifier, Format,
    ParserConfig, RemarkParser, Result,
};

#[derive(Parser)]
#[command(name = "remark_augment")]
#[command(about = "Extract payer name, transaction ID and bank from transaction remarks", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file path (defaults to processed<timestamp>.<ext> next to the input, or stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Input format (csv, xlsx); inferred from the input extension when omitted
    #[arg(long)]
    format: Option<String>,

    /// Bank pattern table (CSV with a bank,pattern header) replacing the built-in one
    #[arg(long)]
    banks: Option<String>,

    /// BIL carrier code; repeat to accept several (default: EKW, EJF)
    #[arg(long = "bil-carrier")]
    bil_carriers: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = match (&cli.format, &cli.input) {
        (Some(format), _) => format.parse::<Format>()?,
        (None, Some(path)) => Format::from_path(Path::new(path))?,
        (None, None) => Format::Csv,
    };

    let parser = build_parser(&cli)?;

    // Read from input file or stdin
    let mut input: Box<dyn Read> = match cli.input {
        Some(ref input_path) => Box::new(File::open(input_path)?),
        None => Box::new(io::stdin()),
    };

    match format {
        Format::Csv => {
            let mut table = CsvRemarkTable::from_read(&mut input)?;
            table.augment(&parser);
            write_output(&cli, format, |out| table.write_to(out))
        }
        Format::Xlsx => {
            let mut table = XlsxRemarkTable::from_read(&mut input)?;
            table.augment(&parser);
            write_output(&cli, format, |out| table.write_to(out))
        }
    }
}

/// Write to the output file, beside the input, or stdout.
fn write_output<F>(cli: &Cli, format: Format, write: F) -> Result<()>
where
    F: FnOnce(&mut Box<dyn Write>) -> Result<()>,
{
    let path = output_path(cli, format);
    let mut output: Box<dyn Write> = match path {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    write(&mut output)?;
    output.flush()?;

    if let Some(path) = path {
        info!(path = %path.display(), format = format.extension(), "wrote augmented table");
    }
    Ok(())
}

fn build_parser(cli: &Cli) -> Result<RemarkParser> {
    let banks = match cli.banks {
        Some(ref path) => {
            let mut file = File::open(path)?;
            let banks = BankIdentifier::from_read(&mut file)?;
            info!(path = %path, banks = banks.len(), "loaded bank table");
            banks
        }
        None => BankIdentifier::default(),
    };

    let mut config = ParserConfig::default();
    if !cli.bil_carriers.is_empty() {
        config = config.with_bil_carrier_codes(
            cli.bil_carriers.iter().map(|c| c.to_uppercase()).collect(),
        );
    }

    RemarkParser::new(banks, config)
}

/// Explicit output, else `processed<unix-millis>.<ext>` beside the input
/// file, else stdout.
fn output_path(cli: &Cli, format: Format) -> Option<PathBuf> {
    if let Some(ref output) = cli.output {
        return Some(PathBuf::from(output));
    }

    let input = Path::new(cli.input.as_ref()?);
    let name = format!(
        "processed{}.{}",
        chrono::Utc::now().timestamp_millis(),
        format.extension()
    );
    Some(match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}
