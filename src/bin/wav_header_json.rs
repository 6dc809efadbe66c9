use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use wavinfo::HeaderReader;

#[derive(Parser, Debug)]
#[command(about = "Print the full header of a WAV file as JSON", version)]
struct Args {
    /// WAV file to inspect
    #[arg(value_name = "wavFileIn")]
    path: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut reader = HeaderReader::open(&args.path)?;
    let mut stdout = io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut stdout, reader.header())?;
    } else {
        serde_json::to_writer(&mut stdout, reader.header())?;
    }
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    reader.close();
    Ok(())
}
