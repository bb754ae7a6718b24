//! Search for workspaces from Visual Studio Code and open them in Visual Studio Code.

use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};
use serde_json::Value;
use walkdir::WalkDir;
use crate::config::{GeneralConfig, VscodeConfig};
use crate::error::{PluginError, Result};
use crate::executor;
use crate::matcher::Keywords;
use crate::model::{Action, ResultItem};
use crate::plugins::{PluginInstance, Query, TriggerQueryHandler};

pub const ID: &str = "vscode";
pub const DEFAULT_TRIGGER: &str = "code";

const WORKSPACE_FILE: &str = "workspace.json";
const FILE_SCHEME: &str = "file://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub path: String,
}

impl Project {
    /// Builds a project from a workspace URI such as `file:///home/u/proj`.
    pub fn from_uri(uri: &str) -> Self {
        let path = uri.strip_prefix(FILE_SCHEME).unwrap_or(uri);
        let name = path.rsplit('/').next().unwrap_or(path);
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    /// Path handed to the editor. Always carries a leading `/`, even when
    /// `path` is already absolute.
    pub fn open_path(&self) -> String {
        format!("/{}", self.path)
    }
}

fn read_workspace(path: &Path) -> Result<Project> {
    let content = fs::read_to_string(path).map_err(|source| PluginError::WorkspaceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| PluginError::WorkspaceFormat {
            path: path.to_path_buf(),
            source,
        })?;
    let Value::Object(map) = value else {
        return Err(PluginError::WorkspaceNotObject(path.to_path_buf()));
    };
    // `workspace` is read only when `folder` is absent; a null `folder` is invalid.
    let uri = map
        .get("folder")
        .or_else(|| map.get("workspace"))
        .ok_or_else(|| PluginError::MissingWorkspacePath(path.to_path_buf()))?
        .as_str()
        .ok_or_else(|| PluginError::WorkspacePathType(path.to_path_buf()))?;
    Ok(Project::from_uri(uri))
}

#[derive(Debug, Default)]
pub struct Discovery {
    pub projects: Vec<Project>,
    pub skipped: usize,
}

/// Collects a project from every `workspace.json` below `root`.
/// Unreadable or malformed files are skipped and counted.
pub fn discover(root: &Path) -> Discovery {
    let mut discovery = Discovery::default();

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() == WORKSPACE_FILE && entry.path().is_file());

    for entry in files {
        match read_workspace(entry.path()) {
            Ok(project) => discovery.projects.push(project),
            Err(e) => {
                debug!("Skipping workspace: {}", e);
                discovery.skipped += 1;
            }
        }
    }

    info!(
        "VscodePlugin: found {} projects, skipped {} files",
        discovery.projects.len(),
        discovery.skipped
    );
    discovery
}

pub struct VscodePlugin {
    exec: String,
    storage_dir: PathBuf,
    icon_urls: Vec<String>,
}

impl VscodePlugin {
    pub fn new(config: &VscodeConfig, icon_urls: Vec<String>) -> Self {
        if executor::resolve(&config.exec).is_none() {
            info!("VSCode not found");
        }

        Self {
            exec: config.exec.clone(),
            storage_dir: config.storage_dir(),
            icon_urls,
        }
    }

    pub fn from_config(config: &VscodeConfig, general: &GeneralConfig) -> Self {
        Self::new(config, vec![general.icon_url("vscode.svg")])
    }

    pub fn projects(&self) -> Vec<Project> {
        discover(&self.storage_dir).projects
    }
}

impl PluginInstance for VscodePlugin {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "VSCode Projects"
    }

    fn description(&self) -> &str {
        "Search for workspaces from Visual Studio Code and open it in Visual Studio Code."
    }
}

impl TriggerQueryHandler for VscodePlugin {
    fn default_trigger(&self) -> &str {
        DEFAULT_TRIGGER
    }

    fn handle_trigger_query(&self, query: &mut Query) {
        let mut projects = self.projects();

        let keywords = Keywords::parse(query.string());
        if !keywords.is_empty() {
            projects.retain(|p| keywords.all_in(&p.name));
        }

        if projects.is_empty() {
            query.add(ResultItem::new(
                ID,
                "No results".to_string(),
                "No projects found".to_string(),
                &self.icon_urls,
            ));
            return;
        }

        for project in projects {
            let project_path = project.open_path();
            let cmd = vec![self.exec.clone(), project_path.clone()];
            query.add(
                ResultItem::new(
                    ID,
                    project.name,
                    format!("Open project located at {}", project_path),
                    &self.icon_urls,
                )
                .with_action(Action::new("open-project", "Open project", cmd)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn write_workspace(root: &Path, hash: &str, body: &str) {
        let dir = root.join(hash);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(WORKSPACE_FILE), body).unwrap();
    }

    fn plugin(root: &TempDir) -> VscodePlugin {
        let config = VscodeConfig {
            trigger: None,
            exec: "/usr/bin/code".to_string(),
            storage_dir: Some(root.path().to_path_buf()),
        };
        VscodePlugin::new(&config, vec![])
    }

    fn run(plugin: &VscodePlugin, s: &str) -> Vec<ResultItem> {
        let mut query = Query::new(s);
        plugin.handle_trigger_query(&mut query);
        query.into_items()
    }

    #[test]
    fn file_uri_keeps_double_slash() {
        let project = Project::from_uri("file:///home/u/proj");
        assert_eq!(project.name, "proj");
        assert_eq!(project.path, "/home/u/proj");
        assert_eq!(project.open_path(), "//home/u/proj");
    }

    #[test]
    fn uri_without_scheme_is_kept() {
        let project = Project::from_uri("home/u/other");
        assert_eq!(project.name, "other");
        assert_eq!(project.open_path(), "/home/u/other");
    }

    #[test]
    fn folder_preferred_over_workspace() {
        let dir = tempdir().unwrap();
        write_workspace(
            dir.path(),
            "a1",
            r#"{"folder":"file:///src/alpha","workspace":"file:///src/beta.code-workspace"}"#,
        );
        write_workspace(dir.path(), "b2", r#"{"workspace":"file:///src/gamma.code-workspace"}"#);
        let names: Vec<_> = discover(dir.path()).projects.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["alpha", "gamma.code-workspace"]);
    }

    #[test]
    fn bad_files_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "a", "{not json");
        write_workspace(dir.path(), "b", r#"{"configuration":"x"}"#);
        write_workspace(dir.path(), "c", r#"{"folder":"file:///home/u/keep"}"#);
        write_workspace(dir.path(), "d", r#"{"folder":42}"#);
        fs::write(dir.path().join("a").join("state.vscdb"), "ignored").unwrap();

        let discovery = discover(dir.path());
        assert_eq!(discovery.projects, vec![Project::from_uri("file:///home/u/keep")]);
        assert_eq!(discovery.skipped, 3);
    }

    #[test]
    fn array_workspace_file_is_skipped() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "a", r#"["file:///home/u/bogus", null]"#);
        write_workspace(dir.path(), "b", r#""file:///home/u/string""#);

        let discovery = discover(dir.path());
        assert!(discovery.projects.is_empty());
        assert_eq!(discovery.skipped, 2);
    }

    #[test]
    fn null_folder_does_not_fall_back() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "a", r#"{"folder":null,"workspace":"file:///w/other.code-workspace"}"#);
        let err = read_workspace(&dir.path().join("a").join(WORKSPACE_FILE)).unwrap_err();
        assert!(matches!(err, PluginError::WorkspacePathType(_)));
        assert_eq!(discover(dir.path()).skipped, 1);
    }

    #[test]
    fn symlinked_workspace_file_is_found() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.json");
        fs::write(&target, r#"{"folder":"file:///home/u/linked"}"#).unwrap();
        let hash = dir.path().join("h1");
        fs::create_dir_all(&hash).unwrap();
        std::os::unix::fs::symlink(&target, hash.join(WORKSPACE_FILE)).unwrap();

        let discovery = discover(dir.path());
        assert_eq!(discovery.projects, vec![Project::from_uri("file:///home/u/linked")]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempdir().unwrap();
        let discovery = discover(&dir.path().join("workspaceStorage"));
        assert!(discovery.projects.is_empty());
        assert_eq!(discovery.skipped, 0);
    }

    #[test]
    fn nested_workspace_files_are_found() {
        let dir = tempdir().unwrap();
        write_workspace(&dir.path().join("deep").join("er"), "x", r#"{"folder":"file:///p/nested"}"#);
        assert_eq!(discover(dir.path()).projects.len(), 1);
    }

    #[test]
    fn empty_query_lists_everything() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "1", r#"{"folder":"file:///home/u/runner"}"#);
        write_workspace(dir.path(), "2", r#"{"folder":"file:///home/u/website"}"#);
        let items = run(&plugin(&dir), "  ");
        let names: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(names, vec!["runner", "website"]);
        assert_eq!(items[0].subtext, "Open project located at //home/u/runner");
        assert_eq!(items[0].actions[0].command, vec!["/usr/bin/code", "//home/u/runner"]);
    }

    #[test]
    fn all_keywords_must_match() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "1", r#"{"folder":"file:///home/u/rust-runner"}"#);
        write_workspace(dir.path(), "2", r#"{"folder":"file:///home/u/rust-book"}"#);
        write_workspace(dir.path(), "3", r#"{"folder":"file:///home/u/go-runner"}"#);
        let items = run(&plugin(&dir), "RUST run");
        let names: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(names, vec!["rust-runner"]);
    }

    #[test]
    fn no_match_reports_no_results() {
        let dir = tempdir().unwrap();
        write_workspace(dir.path(), "1", r#"{"folder":"file:///home/u/runner"}"#);
        let items = run(&plugin(&dir), "zzz");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "No results");
        assert_eq!(items[0].subtext, "No projects found");
        assert!(items[0].actions.is_empty());
    }

    #[test]
    fn rescans_on_every_query() {
        let dir = tempdir().unwrap();
        let p = plugin(&dir);
        assert_eq!(run(&p, "")[0].text, "No results");
        write_workspace(dir.path(), "1", r#"{"folder":"file:///home/u/late"}"#);
        assert_eq!(run(&p, "")[0].text, "late");
    }
}
