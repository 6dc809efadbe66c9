use std::error::Error;
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    run_in(Path::new("."), args)
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_print-wav-info"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run print-wav-info")
}

fn write_fixture(dir: &Path) -> Result<String, Box<dyn Error>> {
    write_named_fixture(dir, "tone.wav")
}

fn write_named_fixture(dir: &Path, name: &str) -> Result<String, Box<dyn Error>> {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec)?;
    writer.write_sample(i16::MAX)?;
    writer.write_sample(i16::MIN)?;
    writer.finalize()?;

    Ok(path.to_string_lossy().into_owned())
}

fn assert_usage(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected stderr: {stderr}");
    assert_eq!(lines[0], "USAGE:");
    assert!(lines[1].starts_with("    "));
    assert!(lines[1].ends_with(" wavFileIn"));
}

#[test]
fn prints_four_fields() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = write_fixture(temp_dir.path())?;

    let output = run(&[path.as_str()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "num channels = 1\nbit depth = 16\nsampling frequency = 44100\ncompression = NONE\n"
    );

    Ok(())
}

#[test]
fn json_binary_carries_full_header() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = write_fixture(temp_dir.path())?;

    let output = Command::new(env!("CARGO_BIN_EXE_wav-header-json"))
        .arg(&path)
        .env_remove("RUST_LOG")
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["num_channels"], 1);
    assert_eq!(value["sample_width"], 2);
    assert_eq!(value["frame_rate"], 44_100);
    assert_eq!(value["compression"], "NONE");
    assert_eq!(value["num_frames"], 2);

    Ok(())
}

#[test]
fn flag_plus_path_is_two_arguments() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = write_fixture(temp_dir.path())?;

    assert_usage(&run(&["--json", path.as_str()]));
    assert_usage(&run(&["--json", "/nonexistent/x.wav"]));

    Ok(())
}

#[test]
fn help_and_version_are_treated_as_paths() {
    for flag in ["--help", "--version", "-h"] {
        let output = run(&[flag]);
        assert_eq!(output.status.code(), Some(1), "{flag}");
        assert!(output.stdout.is_empty(), "{flag}");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("error: cannot open"), "unexpected stderr: {stderr}");
        assert!(stderr.contains(flag));
    }
}

#[test]
fn path_starting_with_dash_is_opened() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    write_named_fixture(temp_dir.path(), "-dash.wav")?;

    let output = run_in(temp_dir.path(), &["-dash.wav"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "num channels = 1\nbit depth = 16\nsampling frequency = 44100\ncompression = NONE\n"
    );

    Ok(())
}

#[test]
fn no_arguments_prints_usage() {
    assert_usage(&run(&[]));
}

#[test]
fn two_arguments_print_usage_without_touching_files() {
    // Opening either path would fail loudly with a different message.
    let output = run(&["/nonexistent/a.wav", "/nonexistent/b.wav"]);
    assert_usage(&output);
}

#[test]
fn missing_file_exits_with_error() {
    let output = run(&["/nonexistent/missing.wav"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "unexpected stderr: {stderr}");
    assert!(stderr.contains("missing.wav"));
}

#[test]
fn malformed_file_exits_with_error() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("bogus.wav");
    std::fs::write(&path, b"not a wav file at all")?;

    let path = path.to_string_lossy().into_owned();
    let output = run(&[path.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("RIFF"));

    Ok(())
}
