use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

mod fetch;
pub mod logging;
pub mod schedule;
pub mod settings;
#[cfg(test)]
mod test_util;

pub use schedule::{
    extract_schedule, lookup_period, Fragment, PageDump, PageSource, Schedule, ScheduleEntry,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub data: Option<String>,
    pub fetch: bool,
    pub output: String,
    pub classe: Option<String>,
    pub giorno: Option<String>,
    pub ora: Option<String>,
    pub settings_path: Option<String>,
    pub verbose: bool,
}

pub async fn run(config: Config) -> Result<String> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;

    if config.fetch {
        let destination = PathBuf::from(&config.output);
        let url = fetch::download_weekly_document(&settings, &destination).await?;
        return Ok(format!("saved {} to {}", url, destination.display()));
    }

    let Some(data) = config.data.as_deref() else {
        return Err(anyhow!("nothing to do: pass --data <pages.json> or --fetch"));
    };
    let pages = schedule::PageDump::load(Path::new(data))?;
    let extracted = schedule::extract_schedule(&pages)?;

    match (&config.classe, &config.giorno, &config.ora) {
        (None, None, None) => serde_json::to_string_pretty(&extracted)
            .with_context(|| "failed to serialize schedule"),
        (Some(classe), Some(giorno), Some(ora)) => lookup_output(&extracted, classe, giorno, ora),
        _ => Err(anyhow!("--classe, --giorno and --ora must be given together")),
    }
}

fn lookup_output(extracted: &Schedule, classe: &str, giorno: &str, ora: &str) -> Result<String> {
    let classe = classe.trim();
    if !schedule::is_class_name(classe) {
        return Err(anyhow!(
            "invalid class name '{}' (expected a digit 1-5 followed by 2-4 uppercase letters)",
            classe
        ));
    }
    let giorno = giorno.trim().to_lowercase();
    if !schedule::WEEKDAYS.contains(&giorno.as_str()) {
        return Err(anyhow!(
            "unknown weekday '{}' (expected one of: {})",
            giorno,
            schedule::WEEKDAYS.join(", ")
        ));
    }
    let ora = ora.trim();
    if !schedule::is_hour_label(ora) {
        return Err(anyhow!("invalid hour '{}' (expected e.g. 8h00)", ora));
    }

    match schedule::lookup_period(extracted, classe, &giorno, ora) {
        Some(entry) => {
            serde_json::to_string_pretty(entry).with_context(|| "failed to serialize entry")
        }
        None => Ok(format!(
            "no lesson scheduled for {} on {} at {}",
            classe, giorno, ora
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DaySchedule;

    fn sample_schedule() -> Schedule {
        let mut periods = DaySchedule::new();
        periods.insert(
            "8h00".to_string(),
            ScheduleEntry {
                subject: "Matematica".to_string(),
                room: None,
            },
        );
        let mut schedule = Schedule::new();
        schedule
            .entry("3BC".to_string())
            .or_default()
            .insert("lunedì".to_string(), periods);
        schedule
    }

    #[test]
    fn lookup_rejects_malformed_class_name() {
        let err = lookup_output(&sample_schedule(), "33B", "lunedì", "8h00").unwrap_err();
        assert!(err.to_string().contains("invalid class name"));
    }

    #[test]
    fn lookup_rejects_unknown_weekday() {
        let err = lookup_output(&sample_schedule(), "3BC", "domenica", "8h00").unwrap_err();
        assert!(err.to_string().contains("unknown weekday"));
    }

    #[test]
    fn missing_cell_is_reported_not_an_error() {
        let output = lookup_output(&sample_schedule(), "3BC", "venerdì", "8h00").unwrap();
        assert!(output.starts_with("no lesson scheduled"));
    }
}
