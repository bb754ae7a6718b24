//! Search for components from Mantine and open their URLs via browser.

use std::fs;
use std::path::Path;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};
use crate::config::{GeneralConfig, MantineConfig};
use crate::error::{PluginError, Result};
use crate::executor;
use crate::matcher::Keywords;
use crate::model::{Action, ResultItem};
use crate::plugins::{PluginInstance, Query, TriggerQueryHandler};

pub const ID: &str = "mantine";
pub const DEFAULT_TRIGGER: &str = "mantine";

const BUNDLED_CATALOG: &str = include_str!("../../data/mantine.json");

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
}

impl LinkEntry {
    /// Rejects anything but a JSON object, including positional `[name, url]` arrays.
    fn from_value(category: &str, value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PluginError::MalformedLink(category.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Component links grouped by category, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<(String, Vec<LinkEntry>)>,
}

impl Catalog {
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(content)?;
        let mut categories = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let values: Vec<Value> = serde_json::from_value(value)?;
            let links = values
                .into_iter()
                .map(|v| LinkEntry::from_value(&name, v))
                .collect::<Result<Vec<_>>>()?;
            categories.push((name, links));
        }
        Ok(Self { categories })
    }

    /// Reads `path`, or the catalog compiled into the binary when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| PluginError::CatalogRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json(&content)
            }
            None => Self::from_json(BUNDLED_CATALOG),
        }
    }

    pub fn category(&self, name: &str) -> Option<&[LinkEntry]> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, links)| links.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LinkEntry])> {
        self.categories.iter().map(|(c, links)| (c.as_str(), links.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, links)| links.len()).sum()
    }
}

pub struct MantinePlugin {
    catalog: Catalog,
    exec: String,
    default_category: String,
    icon_urls: Vec<String>,
}

impl MantinePlugin {
    pub fn new(catalog: Catalog, config: &MantineConfig, icon_urls: Vec<String>) -> Result<Self> {
        if catalog.category(&config.default_category).is_none() {
            return Err(PluginError::MissingCategory(config.default_category.clone()));
        }

        if executor::resolve(&config.exec).is_none() {
            info!("No browser found");
        }

        Ok(Self {
            catalog,
            exec: config.exec.clone(),
            default_category: config.default_category.clone(),
            icon_urls,
        })
    }

    pub fn from_config(config: &MantineConfig, general: &GeneralConfig) -> Result<Self> {
        let catalog = Catalog::load(config.data.as_deref())?;
        debug!("Loaded {} Mantine links", catalog.len());
        Self::new(catalog, config, vec![general.icon_url("mantine.svg")])
    }

    fn item(&self, text: String, link: &LinkEntry) -> ResultItem {
        let cmd = vec![self.exec.clone(), link.url.clone()];
        ResultItem::new(ID, text, link.url.clone(), &self.icon_urls)
            .with_action(Action::new("Open in browser", "Open in browser", cmd))
    }
}

impl PluginInstance for MantinePlugin {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Mantine Components"
    }

    fn description(&self) -> &str {
        "Search for components from Mantine and open their URLs via browser."
    }
}

impl TriggerQueryHandler for MantinePlugin {
    fn default_trigger(&self) -> &str {
        DEFAULT_TRIGGER
    }

    fn handle_trigger_query(&self, query: &mut Query) {
        let keywords = Keywords::parse(query.string());

        if keywords.is_empty() {
            if let Some(links) = self.catalog.category(&self.default_category) {
                for link in links {
                    query.add(self.item(format!("Mantine {}", link.name), link));
                }
            }
            return;
        }

        for (category, links) in self.catalog.iter() {
            for link in links.iter().filter(|l| keywords.any_in(&l.name)) {
                query.add(self.item(format!("{} {}", category, link.name), link));
            }
        }
    }
}
