//! Outbound chat-site links carrying the composed prompt as a query parameter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid base URL for {name}: {source}")]
    BaseUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unknown destination: {0}")]
    UnknownDestination(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_query_param")]
    pub query_param: String,
}

fn default_query_param() -> String {
    "q".to_string()
}

impl Destination {
    pub fn new(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            query_param: default_query_param(),
        }
    }

    /// `base_url` with the prompt appended as an encoded query parameter.
    pub fn url_for(&self, prompt: &str) -> Result<Url, LinkError> {
        let mut url = Url::parse(&self.base_url).map_err(|source| LinkError::BaseUrl {
            name: self.name.clone(),
            source,
        })?;
        url.query_pairs_mut().append_pair(&self.query_param, prompt);
        Ok(url)
    }

    pub fn defaults() -> Vec<Destination> {
        vec![
            Destination::new("chatgpt", "https://chatgpt.com/"),
            Destination::new("claude", "https://claude.ai/new"),
            Destination::new("perplexity", "https://www.perplexity.ai/search"),
            Destination::new("grok", "https://grok.com/"),
        ]
    }
}

/// Case-insensitive lookup by name.
pub fn find<'a>(destinations: &'a [Destination], name: &str) -> Result<&'a Destination, LinkError> {
    destinations
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| LinkError::UnknownDestination(name.to_string()))
}
