//! HAL root document parsing and link resolution
//!
//! The API root returns a HAL document whose `_links` map names every
//! entity endpoint. Only `_links` is interpreted; everything else in HAL
//! payloads is treated as plain JSON.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use stockpile_core::prelude::*;

/// A single link target. `templated` links are resolved like plain ones;
/// the server's templates only append optional query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct HalLink {
    pub href: String,
    #[serde(default)]
    pub templated: bool,
}

/// HAL allows a relation to map to one link or a list of links.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    One(HalLink),
    Many(Vec<HalLink>),
}

impl LinkEntry {
    fn first(&self) -> Option<&HalLink> {
        match self {
            LinkEntry::One(link) => Some(link),
            LinkEntry::Many(links) => links.first(),
        }
    }
}

/// Parsed API root document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HalDocument {
    #[serde(rename = "_links", default)]
    links: HashMap<String, LinkEntry>,
}

impl HalDocument {
    /// Look up the first href registered for a link relation.
    pub fn link(&self, key: &str) -> Result<&str> {
        self.links
            .get(key)
            .and_then(|entry| entry.first())
            .map(|link| link.href.as_str())
            .ok_or_else(|| Error::link_not_found(key))
    }

    /// Resolve a link relation against the API base URL.
    ///
    /// Absolute hrefs are taken as-is; relative hrefs (with or without a
    /// leading slash) are appended to the base, keeping the base's path.
    pub fn resolve(&self, base: &Url, key: &str) -> Result<Url> {
        let href = self.link(key)?;
        // Template expressions only describe optional query parameters.
        let href = href.split('{').next().unwrap_or(href);

        if let Ok(absolute) = Url::parse(href) {
            return Ok(absolute);
        }

        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            href.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| Error::api(format!("invalid link href '{href}': {e}")))
    }

    /// Link relations present in the document, for startup logging.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }
}
