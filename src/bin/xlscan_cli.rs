//! CLI tool for xlscan - detects tables in an XLSX file and writes the page data
//!
//! Usage:
//!   xlscan_cli <input.xlsx>                   # Write outputs to ./xlscan_output
//!   xlscan_cli <input.xlsx> -o out            # Write outputs to ./out
//!   xlscan_cli <input.xlsx> --stdout          # Print the main JSON document only
//!
//! Set `RUST_LOG=info` to list written files, `RUST_LOG=debug` for per-sheet counts.

#![allow(clippy::exit)]

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use xlscan::analysis::{AnalyzeOptions, WorkbookAnalysis};
use xlscan::config::AppConfig;
use xlscan::export::{json::to_json_string, write_outputs};
use xlscan::parser::parse_file;

const USAGE: &str = "\
Usage: xlscan_cli <input.xlsx> [options]

Options:
  -o, --output DIR       output directory (default: xlscan_output)
  --config FILE          TOML config file
  --rows N               rows per page
  --cols N               columns per page
  --overlap N            rows/columns repeated between pages
  --dpi N                figure resolution
  --flat                 no pagination, write structured_data.json
  --ignore-print-area    analyse whole sheets
  --pretty               indented JSON plus one file per page
  --no-markdown          skip tables.md
  --stdout               print the JSON document instead of writing files";

struct Args {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    rows: Option<u32>,
    cols: Option<u32>,
    overlap: Option<u32>,
    dpi: Option<u32>,
    flat: bool,
    ignore_print_area: bool,
    pretty: bool,
    no_markdown: bool,
    stdout: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn number(flag: &str, value: Option<String>) -> u32 {
    match value.as_deref().map(str::parse) {
        Some(Ok(n)) => n,
        _ => fail(&format!("{flag} expects a non-negative integer\n\n{USAGE}")),
    }
}

fn parse_args() -> Args {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        input: PathBuf::new(),
        output: PathBuf::from("xlscan_output"),
        config: None,
        rows: None,
        cols: None,
        overlap: None,
        dpi: None,
        flat: false,
        ignore_print_area: false,
        pretty: false,
        no_markdown: false,
        stdout: false,
    };
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            "-o" | "--output" => match args.next() {
                Some(dir) => parsed.output = PathBuf::from(dir),
                None => fail(&format!("{arg} expects a directory\n\n{USAGE}")),
            },
            "--config" => match args.next() {
                Some(file) => parsed.config = Some(PathBuf::from(file)),
                None => fail(&format!("--config expects a file\n\n{USAGE}")),
            },
            "--rows" => parsed.rows = Some(number("--rows", args.next())),
            "--cols" => parsed.cols = Some(number("--cols", args.next())),
            "--overlap" => parsed.overlap = Some(number("--overlap", args.next())),
            "--dpi" => parsed.dpi = Some(number("--dpi", args.next())),
            "--flat" => parsed.flat = true,
            "--ignore-print-area" => parsed.ignore_print_area = true,
            "--pretty" => parsed.pretty = true,
            "--no-markdown" => parsed.no_markdown = true,
            "--stdout" => parsed.stdout = true,
            other if other.starts_with('-') => fail(&format!("Unknown option {other}\n\n{USAGE}")),
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => fail(&format!("Unexpected argument {other}\n\n{USAGE}")),
        }
    }

    match input {
        Some(path) => parsed.input = path,
        None => fail(USAGE),
    }
    parsed
}

fn build_config(args: &Args) -> AppConfig {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .unwrap_or_else(|e| fail(&format!("Error loading {}: {e}", path.display()))),
        None => AppConfig::default(),
    };

    // Flags win over the file.
    if let Some(rows) = args.rows {
        config.page.rows_per_page = rows;
    }
    if let Some(cols) = args.cols {
        config.page.cols_per_page = cols;
    }
    if let Some(overlap) = args.overlap {
        config.page.overlap = overlap;
    }
    if let Some(dpi) = args.dpi {
        config.page.dpi = dpi;
    }
    if args.flat {
        config.analysis.use_pagination = false;
    }
    if args.ignore_print_area {
        config.analysis.use_print_area = false;
    }
    if args.pretty {
        config.export.compact_json = false;
    }
    if args.no_markdown {
        config.export.write_markdown = false;
    }
    config
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();
    let config = build_config(&args);

    let workbook = parse_file(&args.input).unwrap_or_else(|e| {
        fail(&format!("Error reading {}: {e}", args.input.display()))
    });

    let analysis = WorkbookAnalysis::analyze(&workbook, &AnalyzeOptions::from(&config))
        .unwrap_or_else(|e| fail(&format!("Error analysing workbook: {e}")));

    for sheet in &analysis.sheets {
        let pages = if analysis.paginated {
            format!(", {} pages", sheet.page_count())
        } else {
            String::new()
        };
        let area = sheet
            .print_area
            .map(|r| format!(" (print area {r})"))
            .unwrap_or_default();
        eprintln!(
            "{}{area}: {} cells, {} tables, {} merges{pages}",
            sheet.name,
            sheet.cell_count(),
            sheet.tables.len(),
            sheet.merges.len(),
        );
    }

    if args.stdout {
        let json = to_json_string(&analysis, config.export.compact_json)
            .unwrap_or_else(|e| fail(&format!("Error serializing JSON: {e}")));
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{json}") {
            fail(&format!("Error writing to stdout: {e}"));
        }
        return;
    }

    match write_outputs(&args.output, &analysis, &config.export) {
        Ok(paths) => eprintln!("Written {} files to {}", paths.len(), args.output.display()),
        Err(e) => fail(&format!("Error writing {}: {e}", args.output.display())),
    }
}
