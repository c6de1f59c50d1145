use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hrsim_core::{EventType, OutputFormat, UpdateType};
use hrsim_generate::{LocaleKey, MutationPolicy, PolicyPreset};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Run configuration. Every field has a default; a TOML file may set any
/// subset and command-line flags override both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Records to generate (or pool size when no input dataset is given).
    pub count: usize,
    pub output_format: OutputFormat,
    /// Output path without extension.
    pub output_path: PathBuf,
    pub type_of_update: Option<UpdateType>,
    pub update_count: usize,
    /// Records an event is applied to; the whole pool when unset.
    pub sample_size: Option<usize>,
    /// Force the simulated event kind instead of drawing one.
    pub event: Option<EventType>,
    /// Prior dataset to use as the pool.
    pub input: Option<PathBuf>,
    pub seed: Option<u64>,
    pub locale: LocaleKey,
    /// Catalog file (`.json` or `.toml`); the builtin catalog otherwise.
    pub catalog: Option<PathBuf>,
    pub policy: PolicyPreset,
    /// Explicit mutation rules; unset fields take the in-place defaults.
    pub policy_overrides: Option<MutationPolicy>,
    pub run_dir: PathBuf,
    /// Reference date for event stamps; the local date otherwise.
    pub today: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: 1000,
            output_format: OutputFormat::Dict,
            output_path: PathBuf::from("hr_data"),
            type_of_update: None,
            update_count: 1,
            sample_size: None,
            event: None,
            input: None,
            seed: None,
            locale: LocaleKey::EnUs,
            catalog: None,
            policy: PolicyPreset::InPlace,
            policy_overrides: None,
            run_dir: PathBuf::from("runs"),
            today: None,
        }
    }
}

impl Settings {
    pub fn mutation_policy(&self) -> MutationPolicy {
        self.policy_overrides
            .unwrap_or_else(|| self.policy.policy())
    }
}

pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrsim_generate::TransferSalary;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            "count = 250\noutput_format = \"parquet\"\ntype_of_update = \"promotion\"\n",
        )
        .expect("parse settings");
        assert_eq!(settings.count, 250);
        assert_eq!(settings.output_format, OutputFormat::Parquet);
        assert_eq!(settings.type_of_update, Some(UpdateType::Promotion));
        assert_eq!(settings.update_count, 1);
        assert_eq!(settings.output_path, PathBuf::from("hr_data"));
        assert_eq!(settings.sample_size, None);
        assert_eq!(settings.mutation_policy(), MutationPolicy::in_place());
    }

    #[test]
    fn preset_and_overrides() {
        let settings: Settings = toml::from_str(
            r#"
policy = "batch"
locale = "pt_BR"
"#,
        )
        .expect("parse settings");
        assert_eq!(settings.mutation_policy(), MutationPolicy::batch());
        assert_eq!(settings.locale, LocaleKey::PtBr);

        let settings: Settings = toml::from_str(
            r#"
[policy_overrides]
promotion_multiplier = 1.15

[policy_overrides.department_change]
exclude_current = false
salary = "reroll"
"#,
        )
        .expect("parse settings");
        let policy = settings.mutation_policy();
        assert_eq!(policy.promotion_multiplier, 1.15);
        assert_eq!(policy.salary_increase_multiplier, 1.05);
        assert_eq!(policy.department_change.salary, TransferSalary::Reroll);
        assert!(!policy.department_change.exclude_current);
    }

    #[test]
    fn unknown_update_type_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("type_of_update = \"layoff\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn negative_count_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("count = -5\n");
        assert!(result.is_err());
    }
}
