use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vwm_analysis::{AnalysisConfig, Analyzer};
use vwm_core::{RawTrialRow, SessionId};

const USAGE: &str = "usage: vwm-app <data-dir> <subject> <run> <round> [config.json]";

pub struct App {
    data_dir: PathBuf,
    session: SessionId,
    config: AnalysisConfig,
}

impl App {
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let (data_dir, subject, run, round) = match args.as_slice() {
            [data_dir, subject, run, round] | [data_dir, subject, run, round, _] => {
                (data_dir, subject, run, round)
            }
            _ => bail!(USAGE),
        };

        let config = match args.get(4) {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading analysis config {path}"))?;
                AnalysisConfig::from_json(&json)
                    .with_context(|| format!("parsing analysis config {path}"))?
            }
            None => AnalysisConfig::default(),
        };

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            session: SessionId::new(subject.as_str(), run.as_str(), round.as_str()),
            config,
        })
    }

    pub fn run(self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let run_dir = run_directory(&self.data_dir, &self.session);
        let path = locate_run_file(&run_dir, &self.session.run)?;
        info!(session = %self.session, path = %path.display(), "loading run file");

        let rows = load_rows(&path)?;
        debug!(rows = rows.len(), "trial table read");

        let result = Analyzer::new(self.config).analyze_rows(&self.session, rows)?;
        let json = serde_json::to_string_pretty(&result.metric_table())?;
        println!("{json}");

        Ok(())
    }
}

/// `<data-dir>/<round>/s<subject>/runData`
pub fn run_directory(data_dir: &Path, session: &SessionId) -> PathBuf {
    data_dir
        .join(&session.round)
        .join(format!("s{}", session.subject))
        .join("runData")
}

/// Picks the file whose name starts with `run<run>` (case-insensitive). When
/// several match, the last one in directory order wins.
pub fn locate_run_file(dir: &Path, run: &str) -> Result<PathBuf> {
    let prefix = format!("run{run}").to_lowercase();
    let mut found = None;
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.starts_with(&prefix) {
            found = Some(entry.path());
        }
    }
    found.with_context(|| format!("no file for run {run} in {}", dir.display()))
}

pub fn load_rows(path: &Path) -> Result<Vec<RawTrialRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vwm-app-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn builds_run_directory() {
        let session = SessionId::new("4", "2", "post");
        assert_eq!(
            PathBuf::from("/data/post/s4/runData"),
            run_directory(Path::new("/data"), &session)
        );
    }

    #[test]
    fn locates_run_file_by_prefix() {
        let dir = scratch_dir("locate");
        fs::write(dir.join("run1_2024.json"), "[]").unwrap();
        fs::write(dir.join("RUN2_2024.json"), "[]").unwrap();

        let found = locate_run_file(&dir, "2").unwrap();
        assert_eq!(Some("RUN2_2024.json"), found.file_name().and_then(|n| n.to_str()));
        assert!(locate_run_file(&dir, "3").is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loads_rows_from_json() {
        let dir = scratch_dir("load");
        let path = dir.join("run1.json");
        fs::write(
            &path,
            r#"[{"Response": 1, "ChangeTrial": 1, "ChangeCond": 2, "Cond": 6, "RT": 0.72}]"#,
        )
        .unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(1, rows.len());
        assert_eq!(Some(6), rows[0].cond.code());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_wrong_argument_count() {
        let err = App::from_args(["data".to_string()]).err().unwrap();
        assert_eq!(USAGE, err.to_string());
    }

    #[test]
    fn default_config_without_config_argument() {
        let app = App::from_args(
            ["data", "4", "2", "pre"].iter().map(|s| s.to_string()),
        )
        .unwrap();
        assert_eq!(SessionId::new("4", "2", "pre"), app.session);
        assert_eq!(AnalysisConfig::default(), app.config);
    }
}
