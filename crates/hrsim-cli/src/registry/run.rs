use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use hrsim_generate::RunReport;

use crate::settings::Settings;

use super::RegistryResult;

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub command: String,
    pub seed: u64,
    pub settings: Settings,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub command: &'a str,
    /// Seed actually used, drawn from entropy when settings left it unset.
    pub seed: u64,
    pub settings: &'a Settings,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
    pub report_path: PathBuf,
}

/// Create `<run_dir>/<timestamp>__run_<id>/` with `config.json` and an empty
/// `logs.ndjson`.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .settings
        .run_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let paths = RunPaths {
        config_path: root.join("config.json"),
        logs_path: root.join("logs.ndjson"),
        report_path: root.join("report.json"),
        root,
    };

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        command: &ctx.command,
        seed: ctx.seed,
        settings: &ctx.settings,
        git: collect_git_info(),
    };
    write_json(&paths.config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs_path)?;

    Ok(paths)
}

pub fn write_report(paths: &RunPaths, report: &RunReport) -> RegistryResult<()> {
    write_json(&paths.report_path, report)
}

/// Commit and dirty flag of the working tree; `None` outside a git checkout.
pub fn collect_git_info() -> GitInfo {
    let commit = git_stdout(&["rev-parse", "HEAD"]).filter(|hash| !hash.is_empty());
    let dirty = git_stdout(&["status", "--porcelain"]).map(|status| !status.is_empty());
    GitInfo { commit, dirty }
}

fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_run_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hrsim-{label}-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn start_run_writes_config_and_log_file() {
        let run_dir = temp_run_dir("registry");
        let settings = Settings {
            run_dir: run_dir.clone(),
            seed: Some(7),
            ..Settings::default()
        };
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at: Utc::now(),
            command: "generate".to_string(),
            seed: 7,
            settings,
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.starts_with(&run_dir));
        assert!(
            paths
                .root
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("__run_abc"))
        );
        assert!(paths.logs_path.exists());

        let config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&paths.config_path).expect("read config"),
        )
        .expect("parse config");
        assert_eq!(config["command"], "generate");
        assert_eq!(config["seed"], 7);
        assert_eq!(config["settings"]["count"], 1000);
        assert_eq!(config["settings"]["output_format"], "dict");

        let report = RunReport::new(
            ctx.run_id.clone(),
            "generate",
            7,
            "en_US",
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"),
        );
        write_report(&paths, &report).expect("write report");
        assert!(paths.report_path.exists());

        let _ = std::fs::remove_dir_all(&run_dir);
    }
}
