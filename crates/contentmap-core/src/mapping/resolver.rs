//! Custom value resolvers for configured members
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::node::{Source, UrlMode};
use crate::value::Value;
use std::fmt;

/// Produces a member value directly from the source node
///
/// Returning `None` hands the member back to the regular resolution order.
pub trait ValueResolver: Send + Sync {
    fn resolve(&self, source: &Source<'_>) -> Option<Value>;
}

impl<F> ValueResolver for F
where
    F: Fn(&Source<'_>) -> Option<Value> + Send + Sync,
{
    fn resolve(&self, source: &Source<'_>) -> Option<Value> {
        self(source)
    }
}

impl fmt::Debug for dyn ValueResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueResolver")
    }
}

/// Resolves the content's URL in the given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlResolver(pub UrlMode);

impl ValueResolver for UrlResolver {
    fn resolve(&self, source: &Source<'_>) -> Option<Value> {
        source
            .as_content()
            .map(|content| Value::String(content.url(self.0)))
    }
}

/// Resolves the URL of a media item stored in a content property
///
/// Media pickers deliver either the URL itself or an object carrying a
/// `url` (or `src`) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrlResolver {
    property_alias: String,
}

impl MediaUrlResolver {
    pub fn new(property_alias: impl Into<String>) -> Self {
        Self {
            property_alias: property_alias.into(),
        }
    }

    pub fn property_alias(&self) -> &str {
        &self.property_alias
    }
}

impl Default for MediaUrlResolver {
    fn default() -> Self {
        Self::new("image")
    }
}

impl ValueResolver for MediaUrlResolver {
    fn resolve(&self, source: &Source<'_>) -> Option<Value> {
        if !source.has_property(&self.property_alias) {
            return None;
        }

        match source.property_value(&self.property_alias)? {
            Value::String(url) => Some(Value::String(url)),
            Value::Json(media) => ["url", "src"]
                .iter()
                .find_map(|key| media.get(*key).and_then(|v| v.as_str()))
                .map(Value::from),
            Value::List(items) => items.into_iter().find_map(|item| match item {
                Value::String(url) => Some(Value::String(url)),
                Value::Json(media) => media.get("url").and_then(|v| v.as_str()).map(Value::from),
                _ => None,
            }),
            _ => None,
        }
    }
}
