use anyhow::{Context, Result};
use log::{debug, info};
use crate::config::Config;
use crate::error::PluginError;
use crate::executor;
use crate::model::ResultItem;
use crate::plugins::{Plugin, PluginInstance, Query, TriggerQueryHandler};
use crate::plugins::{mantine::MantinePlugin, vscode::VscodePlugin};

struct Registration {
    trigger: String,
    plugin: Box<dyn Plugin>,
}

/// Minimal launcher host: owns the plugins and routes input by trigger.
pub struct Host {
    registrations: Vec<Registration>,
}

impl Host {
    pub fn new(config: &Config) -> Result<Self> {
        let mantine = MantinePlugin::from_config(&config.mantine, &config.general)
            .context("loading Mantine catalog")?;
        let vscode = VscodePlugin::from_config(&config.vscode, &config.general);

        let mut host = Self::empty();
        host.register(Box::new(mantine), config.mantine.trigger.clone());
        host.register(Box::new(vscode), config.vscode.trigger.clone());
        Ok(host)
    }

    pub fn empty() -> Self {
        Self { registrations: Vec::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>, trigger: Option<String>) {
        let trigger = trigger.unwrap_or_else(|| plugin.default_trigger().to_string());
        debug!("Registered plugin '{}' on trigger '{}'", plugin.id(), trigger);
        self.registrations.push(Registration { trigger, plugin });
    }

    /// `(id, name, trigger)` for each registered plugin.
    pub fn plugins(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.registrations
            .iter()
            .map(|r| (r.plugin.id(), r.plugin.name(), r.trigger.as_str()))
    }

    pub fn plugin(&self, id: &str) -> Option<&dyn Plugin> {
        self.registrations
            .iter()
            .find(|r| r.plugin.id() == id)
            .map(|r| r.plugin.as_ref())
    }

    /// Finds the plugin whose trigger starts `input`, followed by the end of
    /// input or whitespace. The longest trigger wins.
    pub fn route<'a>(&self, input: &'a str) -> Option<(&dyn Plugin, &'a str)> {
        self.registrations
            .iter()
            .filter_map(|r| {
                let rest = input.strip_prefix(r.trigger.as_str())?;
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    Some((r, rest))
                } else {
                    None
                }
            })
            .max_by_key(|(r, _)| r.trigger.len())
            .map(|(r, rest)| (r.plugin.as_ref(), rest))
    }

    pub fn query(&self, input: &str) -> Option<Vec<ResultItem>> {
        let (plugin, rest) = self.route(input)?;
        let mut query = Query::new(rest);
        plugin.handle_trigger_query(&mut query);
        info!("Host: plugin='{}', query='{}', items={}", plugin.id(), rest.trim(), query.items().len());
        Some(query.into_items())
    }

    /// Runs the first action of `item`.
    pub fn activate(&self, item: &ResultItem) -> Result<(), PluginError> {
        let action = item
            .actions
            .first()
            .ok_or_else(|| PluginError::NoAction(item.text.clone()))?;
        info!("Host: running '{}' for '{}'", action.text, item.text);
        executor::run_detached(&action.command)
    }
}
