//! CLI tool converting MojeBanka text statements to QIF or a tab-separated table.
//!
//! # Usage
//!
//! ```bash
//! # Convert every statement in the directory to QIF (default)
//! mojebanka *.txt
//!
//! # Tab-separated table, output next to a different directory
//! mojebanka -f csv -o exports/ statements/2011-*.txt
//!
//! # Statement already re-encoded to UTF-8, with debug logging
//! RUST_LOG=debug mojebanka --encoding utf8 vypis.txt
//! ```

use std::{
    collections::BTreeSet,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser, ValueEnum};
use mojebanka::prelude::*;
use tracing::{debug, error, info, warn};

/// Convert MojeBanka text statements to QIF or a tab-separated table.
///
/// Each input file is parsed completely before its output file is
/// created; a statement with an unknown transaction produces no output.
#[derive(Parser, Debug)]
#[command(name = "mojebanka")]
#[command(version, about)]
struct Args {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Qif)]
    format: FormatArg,

    /// Encoding of the input files.
    #[arg(short, long, value_enum, default_value_t = EncodingArg::Cp1250)]
    encoding: EncodingArg,

    /// Directory for the output files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Statement files or glob patterns.
    files: Vec<String>,
}

/// Supported output formats for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Tab-separated table with a header row (`.cvs` file).
    #[value(alias = "cvs")]
    Csv,
    /// Quicken Interchange Format, `!Type:Bank`.
    Qif,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Format::Table,
            FormatArg::Qif => Format::Qif,
        }
    }
}

/// Supported input encodings for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    /// Windows-1250, as exported by MojeBanka.
    Cp1250,
    /// UTF-8.
    Utf8,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Cp1250 => Encoding::Cp1250,
            EncodingArg::Utf8 => Encoding::Utf8,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let args = Args::parse();

    let files = expand_patterns(&args.files);
    if files.is_empty() {
        eprintln!("No input files matched.\n\n{}", Args::command().render_help());
        return Ok(2);
    }
    debug!(count = files.len(), "matched input files");

    let format = Format::from(args.format);
    let encoding = Encoding::from(args.encoding);
    let now = chrono::Local::now().naive_local();

    let mut failed = 0usize;
    for input in &files {
        match convert_file(input, &args.output_dir, format, encoding, now) {
            Ok((output, count)) => {
                info!(input = %input.display(), output = %output.display(), count, "converted");
                eprintln!(
                    "Converted {count} transaction(s) from {} to {}",
                    input.display(),
                    output.display()
                );
            }
            Err(e) => {
                failed += 1;
                error!(input = %input.display(), "conversion failed");
                eprintln!("Error: {e:#}");
            }
        }
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Expands glob patterns into a sorted list of distinct files.
///
/// An invalid pattern matches nothing and is reported with a warning.
fn expand_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        match glob::glob(pattern) {
            Ok(paths) => files.extend(paths.filter_map(|p| p.ok()).filter(|p| p.is_file())),
            Err(e) => warn!(pattern = %pattern, error = %e, "invalid file pattern skipped"),
        }
    }
    files.into_iter().collect()
}

/// Reads, parses and writes one statement.
///
/// Returns the output path and the number of converted transactions.
fn convert_file(
    input: &Path,
    output_dir: &Path,
    format: Format,
    encoding: Encoding,
    now: NaiveDateTime,
) -> Result<(PathBuf, usize)> {
    let text = read_statement(input, encoding)
        .with_context(|| format!("Failed to read statement: {}", input.display()))?;
    let txs = parse_statement(&text)
        .with_context(|| format!("Failed to parse statement: {}", input.display()))?;

    // Render in memory first: a failing record must not leave a truncated file behind
    let rendered = render(&txs, format).context("Failed to render output")?;

    let (output, mut file) = create_output(output_dir, format, now)?;
    file.write_all(&rendered)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    Ok((output, txs.len()))
}

/// Renders transactions with runtime format selection.
fn render(txs: &[Transaction], format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Table => render_typed::<Table>(txs),
        Format::Qif => render_typed::<Qif>(txs),
    }
}

fn render_typed<F: ExportFormat>(txs: &[Transaction]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = TransactionWriter::<_, F>::new(&mut buffer);
        writer.write_header().context("Failed to write output header")?;
        for (idx, tx) in txs.iter().enumerate() {
            writer.write(tx).with_context(|| format!("Failed to write transaction #{}", idx + 1))?;
        }
        writer.flush().context("Failed to flush output")?;
    }
    Ok(buffer)
}

/// Creates a new output file named after the conversion time.
///
/// Files converted within the same second get a `-<n>` suffix instead of
/// overwriting each other.
fn create_output(dir: &Path, format: Format, now: NaiveDateTime) -> Result<(PathBuf, fs::File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let base = export_file_name(format, now);
    let stem = base.strip_suffix(&format!(".{}", format.extension())).unwrap_or(&base);

    let mut n = 0u32;
    loop {
        let name = if n == 0 { base.clone() } else { format!("{stem}-{n}.{}", format.extension()) };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    const STATEMENT: &str = "Transakční historie\n\
________________________________________________________________________________\n\
94-60576642/8060     8205868823     -1500,00 CZK     08.09.2011\n\
Úhrada   0   08.09.2011\n\
000-08092011 005-005-001596020   0   08.09.2011\n\
Popis příkazce STAVEBNI SPORENI - BURINKA\n\
Popis pro příjemce NA   AC-0000940060576642\n\
Systémový popis Úhrada do jiné banky\n\
________________________________________________________________________________\n";

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2011, 9, 30).unwrap().and_hms_opt(12, 0, 1).unwrap()
    }

    #[test]
    fn test_render_qif() {
        let txs = parse_statement(STATEMENT).unwrap();
        let out = String::from_utf8(render(&txs, Format::Qif).unwrap()).unwrap();
        assert_eq!(out.lines().next(), Some("!Type:Bank"));
        assert!(out.contains("\nT-1,500.00\n"));
        assert!(out.contains("\nP94-60576642/8060 8205868823\n"));
    }

    #[test]
    fn test_render_table_empty_keeps_header() {
        let out = String::from_utf8(render(&[], Format::Table).unwrap()).unwrap();
        assert!(out.starts_with("date3\ttype\taccount\t"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_create_output_never_overwrites() {
        let dir = tempdir().unwrap();

        let (first, _) = create_output(dir.path(), Format::Qif, at()).unwrap();
        let (second, _) = create_output(dir.path(), Format::Qif, at()).unwrap();

        assert_eq!(first.file_name().unwrap(), "mojebanka_export_2011-30-09-12-00-01.qif");
        assert_eq!(second.file_name().unwrap(), "mojebanka_export_2011-30-09-12-00-01-1.qif");
    }

    #[test]
    fn test_expand_patterns_dedupes_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.log"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let txt = dir.path().join("*.txt").to_string_lossy().into_owned();
        let a = dir.path().join("a.txt").to_string_lossy().into_owned();

        let files = expand_patterns(&[txt, a]);
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_expand_patterns_skips_invalid_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let txt = dir.path().join("*.txt").to_string_lossy().into_owned();

        assert!(expand_patterns(&["[".to_string()]).is_empty());
        assert_eq!(expand_patterns(&["[".to_string(), txt]).len(), 1);
    }

    #[test]
    fn test_convert_file_malformed_creates_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.txt");
        fs::write(&input, STATEMENT.replace("Popis příkazce STAVEBNI SPORENI - BURINKA\n", ""))
            .unwrap();
        let out_dir = dir.path().join("out");

        let err = convert_file(&input, &out_dir, Format::Qif, Encoding::Utf8, at()).unwrap_err();
        assert!(format!("{err:#}").contains("Systémový popis Úhrada do jiné banky"));
        assert!(!out_dir.exists());
    }
}
