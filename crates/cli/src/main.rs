// taxgap CLI - checklist gap reconciliation, headless

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_GAP_INVALID_CONFIG, EXIT_GAP_PARSE, EXIT_GAP_RUNTIME, EXIT_SUCCESS, EXIT_USAGE};
use taxgap_engine::model::GapInput;
use taxgap_engine::{ChecklistRegistry, GapConfig, GradeIndex, RecordIndex};
use taxgap_io::read::{read_to_string_lossy, Decoding};
use taxgap_io::report::write_report;

#[derive(Parser)]
#[command(name = "taxgap")]
#[command(about = "Reconcile a species checklist against specimen records and quality grades")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a gap analysis and write the reconciled TSV report
    #[command(after_help = "\
Examples:
  taxgap run odonata.gap.toml
  taxgap run odonata.gap.toml --output results/gap_analysis.tsv
  taxgap run --checklist species.csv --records result_output.tsv \\
             --grades assessed_BAGS.tsv --output gap_analysis.tsv
  taxgap run odonata.gap.toml --json > result.json")]
    Run {
        /// Path to a .gap.toml config file (flags below override it)
        config: Option<PathBuf>,

        /// Checklist file (`;`-separated valid name + synonyms per line)
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Specimen record extract (TSV)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Per-taxon quality grade file (TSV)
        #[arg(long)]
        grades: Option<PathBuf>,

        /// Report destination (TSV)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Dump the full result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress progress and warning output
        #[arg(long)]
        quiet: bool,
    },

    /// Validate a run config without running
    #[command(after_help = "\
Examples:
  taxgap validate odonata.gap.toml")]
    Validate {
        /// Path to the .gap.toml config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn invalid_config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_GAP_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_GAP_PARSE, message: msg.into(), hint: None }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_GAP_RUNTIME, message: msg.into(), hint: None }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, checklist, records, grades, output, json, quiet } => {
            cmd_run(config, checklist, records, grades, output, json, quiet)
        }
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Pick a path from a CLI flag or a config value. Config-sourced relative
/// paths resolve against the config file's directory; flag paths are used
/// as given. `missing_code` distinguishes an incomplete config file from
/// an incomplete flag set.
fn pick_path(
    flag: Option<PathBuf>,
    configured: &str,
    base_dir: Option<&Path>,
    what: &str,
    missing_code: u8,
) -> Result<PathBuf, CliError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if configured.is_empty() {
        return Err(CliError { code: missing_code, message: format!("no {what} given"), hint: None });
    }
    let path = PathBuf::from(configured);
    Ok(match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    })
}

fn read_input(path: &Path, quiet: bool) -> Result<String, CliError> {
    let (content, decoding) = read_to_string_lossy(path).map_err(CliError::runtime)?;
    if decoding == Decoding::Windows1252 && !quiet {
        eprintln!("note: {} decoded as Windows-1252", path.display());
    }
    Ok(content)
}

fn cmd_run(
    config_path: Option<PathBuf>,
    checklist_flag: Option<PathBuf>,
    records_flag: Option<PathBuf>,
    grades_flag: Option<PathBuf>,
    output_flag: Option<PathBuf>,
    json_output: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = match &config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .map_err(|e| CliError::invalid_config(format!("cannot read config: {e}")))?;
            GapConfig::from_toml(&config_str)
                .map_err(|e| CliError::invalid_config(e.to_string()))?
        }
        None => GapConfig::default(),
    };

    let base_dir = config_path.as_deref().and_then(Path::parent);
    let missing_code =
        if config_path.is_some() { EXIT_GAP_INVALID_CONFIG } else { EXIT_USAGE };

    let checklist_path = pick_path(
        checklist_flag,
        &config.inputs.checklist,
        base_dir,
        "checklist file",
        missing_code,
    )?;
    let records_path =
        pick_path(records_flag, &config.inputs.records, base_dir, "record extract", missing_code)?;
    let grades_path =
        pick_path(grades_flag, &config.inputs.grades, base_dir, "grade file", missing_code)?;
    let output_path = pick_path(
        output_flag,
        config.output.as_deref().unwrap_or(""),
        base_dir,
        "output path",
        missing_code,
    )?;

    if config.options.multi_name_grade.chars().count() != 1 {
        return Err(CliError::invalid_config(format!(
            "multi_name_grade must be a single letter, got \"{}\"",
            config.options.multi_name_grade
        )));
    }

    // Load everything up front; any failure aborts before output is touched.
    let checklist_content = read_input(&checklist_path, quiet)?;
    let records_content = read_input(&records_path, quiet)?;
    let grades_content = read_input(&grades_path, quiet)?;

    let checklist = ChecklistRegistry::parse(&checklist_content);
    if !quiet {
        for warning in &checklist.warnings {
            eprintln!("checklist: {warning}");
        }
    }

    let records = RecordIndex::from_tsv(&records_content, &config.columns)
        .map_err(|e| CliError::parse(e.to_string()))?;
    let grades = GradeIndex::from_tsv(&grades_content, &config.columns)
        .map_err(|e| CliError::parse(e.to_string()))?;

    if !quiet {
        eprintln!(
            "checklist: {} species, {} synonyms",
            checklist.len(),
            checklist.total_synonyms(),
        );
        eprintln!(
            "records: {} rows across {} taxon ids, {} species ({} subspecies rows, {} skipped)",
            records.total_records(),
            records.record_counts.len(),
            records.species_seen.len(),
            records.subspecies_rows,
            records.skipped_rows,
        );
        eprintln!("grades: {} taxon ids", grades.len());
    }

    let input = GapInput { checklist, records, grades };
    let result = taxgap_engine::run(&config, &input);

    write_report(&output_path, &result.rows).map_err(CliError::runtime)?;

    if json_output {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "wrote {}: {} rows — {} valid, {} synonym, {} extra species, {} extra BIN",
        output_path.display(),
        s.total_rows,
        s.valid,
        s.synonyms,
        s.extra_species,
        s.extra_bins,
    );
    if !quiet {
        eprintln!(
            "  {} graded, {} synonym-only flags, {} rows with inferred taxonomy",
            s.graded, s.synonym_only_flags, s.inferred_taxonomy,
        );
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::invalid_config(format!("cannot read config: {e}")))?;

    let config =
        GapConfig::from_toml(&config_str).map_err(|e| CliError::invalid_config(e.to_string()))?;
    config.validate().map_err(|e| CliError::invalid_config(e.to_string()))?;

    eprintln!(
        "valid: '{}' ({}, {}, {} -> {})",
        config.name,
        config.inputs.checklist,
        config.inputs.records,
        config.inputs.grades,
        config.output.as_deref().unwrap_or("-"),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const RECORDS: &str = "\
species\tsubspecies\ttaxonid\tBIN\tkingdom\tphylum\tclass\torder\tfamily\tgenus
Anax parthenope\t\tT1\tBOLD:AAA0001\tAnimalia\tArthropoda\tInsecta\tOdonata\tAeshnidae\tAnax
Anax ephippiger\t\tT2\tBOLD:AAA0001\tAnimalia\tArthropoda\tInsecta\tOdonata\tAeshnidae\tAnax
";
    const GRADES: &str = "\
taxonid\tBAGS\tBIN\tsharers
T1\tA\tBOLD:AAA0001\t
T2\tE\tBOLD:AAA0001\tAnax parthenope
";

    #[test]
    fn run_with_flags_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let checklist = write_file(dir.path(), "species.csv", "Anax parthenope\n");
        let records = write_file(dir.path(), "records.tsv", RECORDS);
        let grades = write_file(dir.path(), "grades.tsv", GRADES);
        let output = dir.path().join("out/gap_analysis.tsv");

        cmd_run(
            None,
            Some(checklist),
            Some(records),
            Some(grades),
            Some(output.clone()),
            false,
            true,
        )
        .unwrap();

        let report = std::fs::read_to_string(&output).unwrap();
        let mut lines = report.lines();
        assert!(lines.next().unwrap().starts_with("species\t"));
        assert!(lines.next().unwrap().starts_with("Anax parthenope\t"));
        assert!(lines.next().unwrap().starts_with("Anax ephippiger\t"));
    }

    #[test]
    fn run_resolves_config_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "species.csv", "Anax parthenope\n");
        write_file(dir.path(), "records.tsv", RECORDS);
        write_file(dir.path(), "grades.tsv", GRADES);
        let config = write_file(
            dir.path(),
            "run.gap.toml",
            r#"
output = "gap_analysis.tsv"

[inputs]
checklist = "species.csv"
records = "records.tsv"
grades = "grades.tsv"
"#,
        );

        cmd_run(Some(config), None, None, None, None, false, true).unwrap();
        assert!(dir.path().join("gap_analysis.tsv").exists());
    }

    #[test]
    fn run_without_output_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let checklist = write_file(dir.path(), "species.csv", "Anax parthenope\n");
        let records = write_file(dir.path(), "records.tsv", RECORDS);
        let grades = write_file(dir.path(), "grades.tsv", GRADES);

        let err = cmd_run(None, Some(checklist), Some(records), Some(grades), None, false, true)
            .unwrap_err();
        assert_eq!(err.code, EXIT_USAGE);
        assert!(err.message.contains("output path"));
    }

    #[test]
    fn run_with_missing_input_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let checklist = write_file(dir.path(), "species.csv", "Anax parthenope\n");
        let output = dir.path().join("gap_analysis.tsv");

        let err = cmd_run(
            None,
            Some(checklist),
            Some(dir.path().join("missing.tsv")),
            Some(dir.path().join("grades.tsv")),
            Some(output.clone()),
            false,
            true,
        )
        .unwrap_err();
        assert_eq!(err.code, EXIT_GAP_RUNTIME);
        assert!(!output.exists());
    }

    #[test]
    fn validate_reports_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(dir.path(), "bad.gap.toml", "[inputs]\nchecklist = \"a\"\n");
        let err = cmd_validate(config).unwrap_err();
        assert_eq!(err.code, EXIT_GAP_INVALID_CONFIG);
        assert!(err.message.contains("record extract"));
    }
}
