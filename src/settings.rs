use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone)]
pub struct Settings {
    pub index_url: String,
    pub document_pattern: String,
    pub document_index: usize,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_url: "https://isisfacchinetti.edu.it/documento/orario-delle-lezioni/"
                .to_string(),
            document_pattern:
                r"https://isisfacchinetti\.edu\.it/wp-content/uploads/2023/10/Orario-CLASSI-.+?\.pdf"
                    .to_string(),
            document_index: 1,
            http_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    source: Option<SourceSettings>,
    http: Option<HttpSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct SourceSettings {
    index_url: Option<String>,
    document_pattern: Option<String>,
    document_index: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct HttpSettings {
    timeout_secs: Option<u64>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    ensure_home_settings_file()?;

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(source) = incoming.source {
            if let Some(url) = source.index_url {
                if !url.trim().is_empty() {
                    self.index_url = url;
                }
            }
            if let Some(pattern) = source.document_pattern {
                if !pattern.trim().is_empty() {
                    self.document_pattern = pattern;
                }
            }
            if let Some(index) = source.document_index {
                self.document_index = index;
            }
        }
        if let Some(http) = incoming.http {
            if let Some(timeout) = http.timeout_secs {
                if timeout > 0 {
                    self.http_timeout_secs = timeout;
                }
            }
        }
    }
}

fn ensure_home_settings_file() -> Result<()> {
    let Some(home) = home_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("failed to create settings directory: {}", home.display()))?;
    let path = home.join("settings.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_SETTINGS_TOML)
            .with_context(|| format!("failed to write settings: {}", path.display()))?;
    }
    Ok(())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".timetable-parser-rust"))
        }
    })
}
