//! export-resume CLI - Markdown resume to ATS-friendly DOCX

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resume_export::{
    AtsValidator, ExportResult, JsonFormat, ResumeExporter, RuleConfig, StyleConfig,
    ValidationReport,
};

type CliResult = Result<bool, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "export-resume")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export Markdown resumes to ATS-optimized .docx files", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a Markdown resume
    Export {
        /// Input Markdown resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (default: same as input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output formats
        #[arg(short, long, value_enum, num_args = 1.., default_value = "docx")]
        formats: Vec<Format>,

        /// Validate ATS compliance after export
        #[arg(long)]
        validate: bool,

        /// YAML style file
        #[arg(long, value_name = "FILE", env = "RESUME_EXPORT_STYLE")]
        style: Option<PathBuf>,
    },

    /// Validate an existing .docx file
    Validate {
        /// DOCX file to check
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// YAML style file with `ats_rules`
        #[arg(long, value_name = "FILE", env = "RESUME_EXPORT_STYLE")]
        style: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a Markdown resume to JSON
    Parse {
        /// Input Markdown resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export every resume in a directory tree
    Batch {
        /// Directory to search for *resume*.md files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Validate each exported file
        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Word document
    Docx,
    /// Plain text
    Txt,
    /// Parsed resume as JSON
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Docx => "docx",
            Format::Txt => "txt",
            Format::Json => "json",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            formats,
            validate,
            style,
        } => cmd_export(&input, output.as_deref(), &formats, validate, style.as_deref()),
        Commands::Validate { input, style, json } => {
            cmd_validate(&input, style.as_deref(), json)
        }
        Commands::Parse {
            input,
            compact,
            output,
        } => cmd_parse(&input, compact, output.as_deref()),
        Commands::Batch { dir, validate } => cmd_batch(&dir, validate),
        Commands::Version => {
            cmd_version();
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn load_rules(style: Option<&Path>) -> resume_export::Result<RuleConfig> {
    match style {
        Some(path) => RuleConfig::from_style_file(path),
        None => Ok(RuleConfig::default()),
    }
}

fn print_errors(result: &ExportResult) {
    for error in &result.errors {
        println!("   {}", error.red());
    }
}

fn print_report(report: &ValidationReport) {
    println!("{}", report);
}

/// ATS validation reads the DOCX artifact only.
fn validates_output(formats: &[Format]) -> bool {
    formats.contains(&Format::Docx)
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    formats: &[Format],
    validate: bool,
    style: Option<&Path>,
) -> CliResult {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    if input.extension().map_or(true, |ext| ext != "md") {
        return Err("Input file must be a markdown (.md) file".into());
    }

    let output_dir = output
        .map(Path::to_path_buf)
        .or_else(|| {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let style_config = StyleConfig::load_or_default(style)?;
    log::debug!(
        "Body font {} {}pt, margins {}in",
        style_config.fonts.body.family(),
        style_config.fonts.body.size,
        style_config.margins.left
    );
    let exporter = ResumeExporter::new()
        .with_style(style_config)
        .with_rules(load_rules(style)?);

    let name = input.file_name().unwrap_or_default().to_string_lossy();
    println!("{} {}", "Exporting resume:".cyan().bold(), name);

    let extensions: Vec<&str> = formats.iter().map(|f| f.extension()).collect();
    let pb = spinner("Rendering...");
    let results = exporter.export_multi_format(input, &output_dir, &extensions);
    pb.finish_and_clear();

    let mut all_success = true;
    for (format, result) in &results {
        if result.success {
            let file = result.output_file.file_name().unwrap_or_default();
            println!(
                "{} {} created: {}",
                "✓".green(),
                format.to_uppercase(),
                file.to_string_lossy()
            );
        } else {
            all_success = false;
            println!("{} {} export failed:", "✗".red(), format.to_uppercase());
            print_errors(result);
        }
    }

    if validate && !validates_output(formats) {
        println!(
            "\n{}",
            "Validation only applies to DOCX output; skipped.".yellow()
        );
    } else if validate {
        if let Some(docx) = results.get("docx").filter(|r| r.success) {
            println!("\n{}", "Validating ATS compliance...".cyan());
            let report = AtsValidator::new(load_rules(style)?).validate_path(&docx.output_file);
            print_report(&report);
            all_success &= report.is_valid;
        }
    }

    if all_success {
        println!("\n{} {}", "Export complete:".green().bold(), output_dir.display());
    } else {
        println!(
            "\n{}",
            "Export completed with errors. Please review messages above.".yellow()
        );
    }

    Ok(all_success)
}

fn cmd_validate(input: &Path, style: Option<&Path>, json: bool) -> CliResult {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }

    let report = AtsValidator::new(load_rules(style)?).validate_path(input);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        println!("{} {}", "Validating:".cyan().bold(), name);
        print_report(&report);
    }

    Ok(report.is_valid)
}

fn cmd_parse(input: &Path, compact: bool, output: Option<&Path>) -> CliResult {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = resume_export::to_json(input, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(true)
}

fn cmd_batch(dir: &Path, validate: bool) -> CliResult {
    if !dir.is_dir() {
        return Err(format!("Directory not found: {}", dir.display()).into());
    }

    let files = resume_export::export::find_resume_files(dir)?;
    if files.is_empty() {
        return Err(format!("No resume markdown files found in {}", dir.display()).into());
    }

    println!("{}", "Batch Export".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("Found {} resume file(s)\n", files.len());

    let pb = spinner("Exporting...");
    let results = ResumeExporter::new().export_batch(dir, validate)?;
    pb.finish_and_clear();

    for result in &results {
        if result.is_ok() {
            let file = result.output_file.file_name().unwrap_or_default();
            println!("{} {}", "✓".green(), file.to_string_lossy());
        } else {
            let file = result.input_file.file_name().unwrap_or_default();
            println!("{} {}", "✗".red(), file.to_string_lossy());
            print_errors(result);
        }
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{} {}/{} successful",
        "Completed:".green().bold(),
        succeeded,
        results.len()
    );

    Ok(succeeded == results.len())
}

fn cmd_version() {
    println!(
        "{} {}",
        "export-resume".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Markdown resume to ATS-friendly DOCX exporter");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/resume-export".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_needs_docx_output() {
        assert!(validates_output(&[Format::Docx]));
        assert!(validates_output(&[Format::Txt, Format::Docx]));
        assert!(!validates_output(&[Format::Txt]));
        assert!(!validates_output(&[Format::Txt, Format::Json]));
    }

    #[test]
    fn test_format_extensions() {
        let extensions: Vec<&str> = [Format::Docx, Format::Txt, Format::Json]
            .into_iter()
            .map(Format::extension)
            .collect();
        assert_eq!(extensions, vec!["docx", "txt", "json"]);
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::try_parse_from([
            "export-resume",
            "export",
            "Resume.md",
            "-f",
            "txt",
            "json",
            "--validate",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                formats, validate, ..
            } => {
                assert!(validate);
                assert!(!validates_output(&formats));
            }
            _ => panic!("expected export"),
        }
    }
}
