//! ralign CLI - alignment review reports from drawing snapshots.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use ralign::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ralign")]
#[command(about = "InRoads-style alignment review reports", long_about = None)]
struct Cli {
    /// Preference file (default: per-user config directory)
    #[arg(long, global = true)]
    prefs_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate reports for one alignment
    Report {
        /// Drawing snapshot (.json)
        drawing: PathBuf,
        /// Alignment name; prompts when omitted
        #[arg(short, long)]
        alignment: Option<String>,
        /// Profile name (default: the alignment's first profile)
        #[arg(short, long)]
        profile: Option<String>,
        /// Output formats (default: stored preference)
        #[arg(short, long = "format", value_enum)]
        formats: Vec<ReportFormat>,
        /// Output folder
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Skip the vertical section
        #[arg(long)]
        no_vertical: bool,
        /// Remember the formats and output folder
        #[arg(long)]
        save: bool,
    },
    /// Generate reports for every alignment in a drawing
    Batch {
        drawing: PathBuf,
        /// Output folder (default: AlignmentReports next to the drawing)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List alignments and their profiles
    List { drawing: PathBuf },
    /// Print the text report to stdout
    Preview {
        drawing: PathBuf,
        #[arg(short, long)]
        alignment: String,
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Show or edit stored preferences
    Prefs {
        #[arg(long)]
        show: bool,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(short, long = "format", value_enum)]
        formats: Vec<ReportFormat>,
        #[arg(long)]
        vertical: Option<bool>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        prepared_by: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let prefs_path = match cli.prefs_file {
        Some(path) => path,
        None => Preferences::default_path()?,
    };

    match cli.command {
        Commands::Report {
            drawing,
            alignment,
            profile,
            formats,
            out,
            no_vertical,
            save,
        } => run_report(
            &prefs_path,
            &drawing,
            alignment,
            profile,
            formats,
            out,
            no_vertical,
            save,
        ),
        Commands::Batch { drawing, out } => run_batch(&prefs_path, &drawing, out),
        Commands::List { drawing } => list_alignments(&drawing),
        Commands::Preview {
            drawing,
            alignment,
            profile,
        } => {
            let preferences = Preferences::load_from_path(&prefs_path)?;
            let source = JsonDrawing::load_from_path(&drawing)?;
            let config = ReportConfig::from_preferences(&preferences, ".").with_profile(profile);
            print!("{}", preview_text(&source, &alignment, &config)?);
            Ok(())
        }
        Commands::Prefs {
            show,
            out,
            formats,
            vertical,
            project,
            prepared_by,
        } => {
            let mut preferences = Preferences::load_from_path(&prefs_path)?;
            let changed = out.is_some()
                || !formats.is_empty()
                || vertical.is_some()
                || project.is_some()
                || prepared_by.is_some();
            if let Some(out) = out {
                preferences.output_dir = Some(out);
            }
            if !formats.is_empty() {
                preferences.formats = formats;
            }
            if let Some(vertical) = vertical {
                preferences.include_vertical = vertical;
            }
            if project.is_some() {
                preferences.project_name = project;
            }
            if prepared_by.is_some() {
                preferences.prepared_by = prepared_by;
            }
            if changed {
                preferences.save_to_path(&prefs_path)?;
                println!("Saved preferences to {}", prefs_path.display());
            }
            if show || !changed {
                println!("{}", serde_json::to_string_pretty(&preferences)?);
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_report(
    prefs_path: &Path,
    drawing: &Path,
    alignment: Option<String>,
    profile: Option<String>,
    formats: Vec<ReportFormat>,
    out: Option<PathBuf>,
    no_vertical: bool,
    save: bool,
) -> Result<()> {
    let mut preferences = Preferences::load_from_path(prefs_path)?;
    let source = JsonDrawing::load_from_path(drawing)?;

    let names = source.alignment_names();
    let alignment = match alignment {
        Some(name) => name,
        None => {
            let stdin = io::stdin();
            pick_alignment(
                &names,
                preferences.last_alignment.as_deref(),
                &mut stdin.lock(),
                &mut io::stdout(),
            )?
        }
    };

    let output_dir = out
        .clone()
        .or_else(|| preferences.output_dir.clone())
        .unwrap_or_else(|| default_batch_dir(drawing));
    let mut config = ReportConfig::from_preferences(&preferences, output_dir)
        .with_profile(profile)
        .with_vertical(preferences.include_vertical && !no_vertical);
    if !formats.is_empty() {
        config = config.with_formats(formats.iter().copied());
    }
    if config.formats.is_empty() {
        bail!("no output formats selected");
    }

    let outcomes = generate_reports(&source, &alignment, &config)?;
    let failures = print_outcomes(&outcomes);

    preferences.last_alignment = Some(alignment);
    if save {
        if !formats.is_empty() {
            preferences.formats = config.formats.clone();
        }
        if out.is_some() {
            preferences.output_dir = Some(config.output_dir.clone());
        }
    }
    if let Err(err) = preferences.save_to_path(prefs_path) {
        tracing::warn!("could not store preferences: {err:#}");
    }

    if failures > 0 {
        bail!("{failures} of {} formats failed", outcomes.len());
    }
    Ok(())
}

fn run_batch(prefs_path: &Path, drawing: &Path, out: Option<PathBuf>) -> Result<()> {
    let preferences = Preferences::load_from_path(prefs_path)?;
    let source = JsonDrawing::load_from_path(drawing)?;
    let output_dir = out.unwrap_or_else(|| default_batch_dir(drawing));
    let config = ReportConfig::from_preferences(&preferences, output_dir);
    if config.formats.is_empty() {
        bail!("no output formats selected");
    }

    let outcomes = generate_batch(&source, &config);
    let mut failed = 0;
    for outcome in &outcomes {
        println!("{}:", outcome.alignment);
        if let Some(error) = &outcome.error {
            println!("  failed: {error}");
        }
        print_outcomes(&outcome.formats);
        if !outcome.is_ok() {
            failed += 1;
        }
    }
    println!(
        "{} of {} alignments written to {}",
        outcomes.len() - failed,
        outcomes.len(),
        config.output_dir.display()
    );
    if failed > 0 {
        bail!("{failed} alignments had errors");
    }
    Ok(())
}

fn list_alignments(drawing: &Path) -> Result<()> {
    let source = JsonDrawing::load_from_path(drawing)?;
    println!(
        "{} ({}, {})",
        source.drawing_name(),
        source.units().label(),
        if source.capabilities().sub_entities {
            "sub-entity data"
        } else {
            "entity data only"
        }
    );
    for alignment in &source.drawing().alignments {
        println!("  {} ({} elements)", alignment.name, alignment.elements.len());
        for profile in &alignment.profiles {
            println!("    profile {} ({} elements)", profile.name, profile.elements.len());
        }
    }
    Ok(())
}

/// Print per-format results; returns the number of failures.
fn print_outcomes(outcomes: &[FormatOutcome]) -> usize {
    let mut failures = 0;
    for outcome in outcomes {
        match &outcome.error {
            None => println!("  {:<24} {}", outcome.format.label(), outcome.path.display()),
            Some(error) => {
                failures += 1;
                println!("  {:<24} FAILED: {error}", outcome.format.label());
            }
        }
    }
    failures
}

/// Ask for an alignment on `input`.
///
/// The last used alignment is offered first when it is still in the drawing;
/// otherwise a numbered list is shown.
fn pick_alignment<R: BufRead, W: Write>(
    names: &[String],
    last: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if names.is_empty() {
        bail!("drawing has no alignments");
    }

    let mut line = String::new();
    if let Some(last) = last.filter(|last| names.iter().any(|n| n == last)) {
        write!(output, "Use last alignment '{last}'? [Y/n] ")?;
        output.flush()?;
        input.read_line(&mut line).context("read answer")?;
        let answer = line.trim().to_lowercase();
        if answer.is_empty() || answer == "y" || answer == "yes" {
            return Ok(last.to_string());
        }
    }

    for (i, name) in names.iter().enumerate() {
        writeln!(output, "{:>3}. {name}", i + 1)?;
    }
    write!(output, "Select alignment [1-{}]: ", names.len())?;
    output.flush()?;

    line.clear();
    input.read_line(&mut line).context("read selection")?;
    let choice = line.trim();
    if let Ok(number) = choice.parse::<usize>() {
        return names
            .get(number.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| anyhow!("selection {number} is out of range"));
    }
    names
        .iter()
        .find(|n| n.as_str() == choice)
        .cloned()
        .ok_or_else(|| anyhow!("unknown alignment '{choice}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["CL".to_string(), "Ramp A".to_string()]
    }

    fn pick(last: Option<&str>, answers: &str) -> Result<String> {
        let mut input = io::Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        pick_alignment(&names(), last, &mut input, &mut output)
    }

    #[test]
    fn test_last_alignment_accepted_by_default() {
        assert_eq!(pick(Some("Ramp A"), "\n").unwrap(), "Ramp A");
    }

    #[test]
    fn test_declined_last_alignment_shows_list() {
        assert_eq!(pick(Some("Ramp A"), "n\n1\n").unwrap(), "CL");
    }

    #[test]
    fn test_stale_last_alignment_is_ignored() {
        assert_eq!(pick(Some("Gone"), "2\n").unwrap(), "Ramp A");
    }

    #[test]
    fn test_selection_by_name_and_range() {
        assert_eq!(pick(None, "CL\n").unwrap(), "CL");
        assert!(pick(None, "3\n").is_err());
        assert!(pick(None, "0\n").is_err());
    }

    #[test]
    fn test_cli_parses_formats() {
        let cli = Cli::try_parse_from([
            "ralign",
            "report",
            "site.json",
            "--format",
            "txt",
            "--format",
            "geotable-xlsx",
        ])
        .expect("parse");
        match cli.command {
            Commands::Report { formats, .. } => {
                assert_eq!(formats, vec![ReportFormat::Txt, ReportFormat::GeotableXlsx]);
            }
            _ => panic!("expected report command"),
        }
    }
}
