/// Lowercased, whitespace-separated words of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    words: Vec<String>,
}

impl Keywords {
    pub fn parse(query: &str) -> Self {
        let normalized = query.trim().to_lowercase();
        Self {
            words: normalized.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if at least one keyword is a substring of the lowercased name.
    pub fn any_in(&self, name: &str) -> bool {
        let haystack = name.to_lowercase();
        self.words.iter().any(|k| haystack.contains(k.as_str()))
    }

    /// True if every keyword is a substring of the lowercased name.
    pub fn all_in(&self, name: &str) -> bool {
        let haystack = name.to_lowercase();
        self.words.iter().all(|k| haystack.contains(k.as_str()))
    }
}
