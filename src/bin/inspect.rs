//! Remark Inspect - CLI tool that shows how individual remarks are parsed.

use clap::Parser;
use std::io::{self, BufRead};
use remark_extractor::{logging, Dialect, RemarkParser, Result};

#[derive(Parser)]
#[command(name = "remark_inspect")]
#[command(about = "Parse transaction remarks and print the derived fields as CSV", long_about = None)]
struct Cli {
    /// Remarks to parse (one per line from stdin if none are given)
    remarks: Vec<String>,

    /// Only print remarks of these dialects (e.g. UPI, NEFT, IMPS, UNKNOWN); repeatable
    #[arg(short, long = "dialect")]
    dialects: Vec<String>,

    /// List the recognised dialect markers and exit
    #[arg(long)]
    list_dialects: bool,

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
    if cli.list_dialects {
        for dialect in Dialect::MARKED {
            println!(
                "{}\t{}\t'{}'",
                dialect,
                dialect.marker().unwrap_or_default(),
                dialect.delimiter()
            );
        }
        return Ok(());
    }

    let only = cli
        .dialects
        .iter()
        .map(|d| d.parse::<Dialect>())
        .collect::<Result<Vec<_>>>()?;

    let parser = RemarkParser::default();
    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record(["Remark", "Dialect", "Name", "Transaction ID", "Bank"])?;

    let remarks: Box<dyn Iterator<Item = io::Result<String>>> = if cli.remarks.is_empty() {
        Box::new(io::stdin().lock().lines())
    } else {
        Box::new(cli.remarks.into_iter().map(Ok))
    };

    for remark in remarks {
        let remark = remark?;
        let (dialect, result) = if remark.is_empty() {
            (None, parser.compose(None))
        } else {
            let (dialect, result) = parser.parse_with_dialect(&remark);
            (Some(dialect), result)
        };

        if !only.is_empty() && !dialect.is_some_and(|d| only.contains(&d)) {
            continue;
        }

        let dialect = dialect.map(|d| d.to_string()).unwrap_or_default();
        let [name, id, bank] = result.columns();
        writer.write_record([remark.as_str(), dialect.as_str(), name, id, bank])?;
    }

    writer.flush()?;
    Ok(())
}
