//! Client-side search over already-fetched lists

use crate::types::{Chatbot, Company};

pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Company {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Chatbot {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Items whose name contains `query`, ignoring case. An empty query keeps everything.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .collect()
}
