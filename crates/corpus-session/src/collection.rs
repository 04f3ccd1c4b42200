//! One dataset's header collection.

use serde::{Deserialize, Serialize};

use corpus_model::Header;

/// Ordered header collection for one dataset, plus its link designation.
///
/// Header order is source-column order and never changes after load. Names
/// are unique: the constructor drops later duplicates so every lookup by
/// name is unambiguous.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderCollection {
    headers: Vec<Header>,
    link: Option<String>,
}

impl HeaderCollection {
    pub(crate) fn new(headers: Vec<Header>) -> Self {
        let mut unique: Vec<Header> = Vec::with_capacity(headers.len());
        for header in headers {
            if unique.iter().all(|h| h.name != header.name) {
                unique.push(header);
            }
        }
        Self {
            headers: unique,
            link: None,
        }
    }

    /// Headers in source order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Looks up a header by name.
    pub fn get(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Header> {
        self.headers.iter_mut().find(|h| h.name == name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Name of the designated link header, if any.
    pub fn link_name(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub(crate) fn set_link(&mut self, name: Option<String>) {
        self.link = name;
    }

    pub(crate) fn is_link(&self, name: &str) -> bool {
        self.link.as_deref() == Some(name)
    }
}
