use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use wavinfo::HeaderReader;

fn main() -> ExitCode {
    env_logger::init();

    let mut args: Vec<OsString> = std::env::args_os().collect();
    let program = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "print-wav-info".to_string());

    // Exactly one argument, taken verbatim as the path; no flags.
    if args.len() != 2 {
        return usage(&program);
    }
    let path = args.remove(1);

    match print_header(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn usage(program: &str) -> ExitCode {
    eprintln!("USAGE:");
    eprintln!("    {program} wavFileIn");
    ExitCode::FAILURE
}

fn print_header(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = HeaderReader::open(path)?;
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "num channels = {}", reader.num_channels())?;
    writeln!(stdout, "bit depth = {}", reader.bit_depth())?;
    writeln!(stdout, "sampling frequency = {}", reader.frame_rate())?;
    writeln!(stdout, "compression = {}", reader.compression())?;
    stdout.flush()?;

    reader.close();
    Ok(())
}
