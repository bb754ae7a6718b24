use serde::Serialize;

/// Something the host can run when the user picks an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: String,
    pub text: String,
    pub command: Vec<String>, // Program followed by its arguments
}

impl Action {
    pub fn new(id: &str, text: &str, command: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub id: String,             // Id of the plugin that produced the item
    pub text: String,           // Display label
    pub subtext: String,        // Secondary line
    pub icon_urls: Vec<String>,
    pub actions: Vec<Action>,
}

impl ResultItem {
    pub fn new(id: &str, text: String, subtext: String, icon_urls: &[String]) -> Self {
        Self {
            id: id.to_string(),
            text,
            subtext,
            icon_urls: icon_urls.to_vec(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Settings descriptor shown by the host for a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConfigWidget {
    Label { text: String },
}
