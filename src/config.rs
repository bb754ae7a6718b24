use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::{BaseDirs, ProjectDirs};
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub mantine: MantineConfig,
    #[serde(default)]
    pub vscode: VscodeConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
}

impl GeneralConfig {
    /// Directory holding the plugin icons (`mantine.svg`, `vscode.svg`).
    pub fn icon_dir(&self) -> PathBuf {
        if let Some(dir) = &self.icon_dir {
            return dir.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join("icons"),
            None => PathBuf::from("icons"),
        }
    }

    pub fn icon_url(&self, file_name: &str) -> String {
        format!("file:{}", self.icon_dir().join(file_name).display())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MantineConfig {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default = "default_browser")]
    pub exec: String,
    #[serde(default)]
    pub data: Option<PathBuf>,
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_browser() -> String { "xdg-open".to_string() }
fn default_category() -> String { "Inputs".to_string() }

impl Default for MantineConfig {
    fn default() -> Self {
        Self {
            trigger: None,
            exec: default_browser(),
            data: None,
            default_category: default_category(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct VscodeConfig {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default = "default_editor")]
    pub exec: String,
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_editor() -> String { "/usr/bin/code".to_string() }

impl Default for VscodeConfig {
    fn default() -> Self {
        Self {
            trigger: None,
            exec: default_editor(),
            storage_dir: None,
        }
    }
}

impl VscodeConfig {
    /// `~/.config/Code/User/workspaceStorage` unless overridden.
    pub fn storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return dir.clone();
        }
        let home = BaseDirs::new()
            .map(|b| b.home_dir().to_path_buf())
            .unwrap_or_default();
        home.join(".config").join("Code").join("User").join("workspaceStorage")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "runner", "runner-plugins")
}

pub fn default_config_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}
