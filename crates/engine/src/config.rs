use serde::Deserialize;

use crate::error::GapError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every field has a default so a config file is optional;
/// the CLI overlays its flags and then calls [`GapConfig::validate`].
#[derive(Debug, Clone, Deserialize)]
pub struct GapConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub inputs: InputPaths,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            inputs: InputPaths::default(),
            output: None,
            columns: ColumnNames::default(),
            options: AnalysisOptions::default(),
        }
    }
}

fn default_name() -> String {
    "gap-analysis".into()
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Paths to the three source files, resolved relative to the config file's
/// directory when loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputPaths {
    #[serde(default)]
    pub checklist: String,
    #[serde(default)]
    pub records: String,
    #[serde(default)]
    pub grades: String,
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names for the columns whose labels vary between extract producers.
/// Rank columns (kingdom…genus) and species/subspecies are fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_taxonid_column")]
    pub taxonid: String,
    #[serde(default = "default_cluster_column")]
    pub cluster: String,
    #[serde(default = "default_grade_column")]
    pub grade: String,
    #[serde(default = "default_sharers_column")]
    pub sharers: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            taxonid: default_taxonid_column(),
            cluster: default_cluster_column(),
            grade: default_grade_column(),
            sharers: default_sharers_column(),
        }
    }
}

fn default_taxonid_column() -> String {
    "taxonid".into()
}

fn default_cluster_column() -> String {
    "BIN".into()
}

fn default_grade_column() -> String {
    "BAGS".into()
}

fn default_sharers_column() -> String {
    "sharers".into()
}

// ---------------------------------------------------------------------------
// Analysis options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisOptions {
    /// Quality grade that marks a cluster claimed by more than one species
    /// name; only taxa with this grade get co-occurrence analysis.
    #[serde(default = "default_multi_name_grade")]
    pub multi_name_grade: String,
    /// Cap on congener species reported as the basis of genus inference.
    #[serde(default = "default_max_congener_examples")]
    pub max_congener_examples: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            multi_name_grade: default_multi_name_grade(),
            max_congener_examples: default_max_congener_examples(),
        }
    }
}

fn default_multi_name_grade() -> String {
    "E".into()
}

fn default_max_congener_examples() -> usize {
    5
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl GapConfig {
    /// Parse a TOML config. Path completeness is not checked here; the CLI
    /// overlays its flags first, then calls [`validate`](Self::validate).
    pub fn from_toml(input: &str) -> Result<Self, GapError> {
        toml::from_str(input).map_err(|e| GapError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GapError> {
        if self.inputs.checklist.is_empty() {
            return Err(GapError::ConfigValidation("no checklist file given".into()));
        }
        if self.inputs.records.is_empty() {
            return Err(GapError::ConfigValidation("no record extract given".into()));
        }
        if self.inputs.grades.is_empty() {
            return Err(GapError::ConfigValidation("no grade file given".into()));
        }
        if self.options.multi_name_grade.is_empty() {
            return Err(GapError::ConfigValidation(
                "multi_name_grade must be a grade code, not empty".into(),
            ));
        }
        if self.options.multi_name_grade.chars().count() != 1 {
            return Err(GapError::ConfigValidation(format!(
                "multi_name_grade must be a single letter, got \"{}\"",
                self.options.multi_name_grade
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
