//! URL helpers handed to handlers through the action context.
//!
//! Every segment after the root path is percent-encoded.

/// Builds admin URLs under the configured root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHelpers {
    root_path: String,
}

impl ViewHelpers {
    pub fn new(root_path: impl Into<String>) -> Self {
        let root_path = root_path.into();
        let trimmed = root_path.trim_end_matches('/');
        Self {
            root_path: trimmed.to_string(),
        }
    }

    pub fn root_path(&self) -> &str {
        if self.root_path.is_empty() {
            "/"
        } else {
            &self.root_path
        }
    }

    pub fn dashboard_url(&self) -> String {
        self.url(&[])
    }

    pub fn resource_url(&self, resource_id: &str) -> String {
        self.url(&["resources", resource_id])
    }

    pub fn resource_action_url(&self, resource_id: &str, action_name: &str) -> String {
        self.url(&["resources", resource_id, "actions", action_name])
    }

    pub fn record_action_url(&self, resource_id: &str, record_id: &str, action_name: &str) -> String {
        self.url(&["resources", resource_id, "records", record_id, action_name])
    }

    pub fn search_url(&self, resource_id: &str, query: &str) -> String {
        self.url(&["resources", resource_id, "search", query])
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.root_path.clone();
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        if url.is_empty() {
            url.push('/');
        }
        url
    }
}
