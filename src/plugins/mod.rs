use crate::model::{ConfigWidget, ResultItem};

pub mod mantine;
pub mod vscode;

/// Identity and settings of a loaded plugin.
pub trait PluginInstance {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn config_widget(&self) -> Vec<ConfigWidget> {
        vec![ConfigWidget::Label { text: self.description().to_string() }]
    }
}

/// Answers queries typed after the plugin's trigger keyword.
pub trait TriggerQueryHandler {
    fn default_trigger(&self) -> &str;
    fn handle_trigger_query(&self, query: &mut Query);
}

pub trait Plugin: PluginInstance + TriggerQueryHandler {}

impl<T: PluginInstance + TriggerQueryHandler> Plugin for T {}

/// A single query: the text after the trigger plus the items produced for it.
#[derive(Debug, Default)]
pub struct Query {
    string: String,
    items: Vec<ResultItem>,
}

impl Query {
    pub fn new(string: &str) -> Self {
        Self {
            string: string.to_string(),
            items: Vec::new(),
        }
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn add(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ResultItem> {
        self.items
    }
}
