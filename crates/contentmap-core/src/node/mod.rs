//! Source nodes consumed from the content management platform
//!
//! The host platform owns its published content; this crate only reads it
//! through [`PublishedElement`] and [`PublishedContent`]. A mapping call
//! receives a [`Source`], which is either one of those node kinds or an
//! object the mapper does not support.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

pub mod memory;

use crate::value::Value;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use memory::{MemoryContent, MemoryElement};

/// How URLs are generated for published content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UrlMode {
    #[default]
    Default,
    Relative,
    Absolute,
}

/// A published element: a content-typed bag of properties
pub trait PublishedElement: Send + Sync {
    /// Alias of the element's content type
    fn content_type_alias(&self) -> &str;

    fn key(&self) -> Uuid;

    fn has_property(&self, alias: &str) -> bool;

    /// Value of the property, `None` when absent or empty
    fn property_value(&self, alias: &str) -> Option<Value>;

    /// Runtime type of the node, compared against declared source types
    fn node_type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Routable published content with the platform's built-in fields
pub trait PublishedContent: PublishedElement {
    fn id(&self) -> i32;

    fn name(&self) -> &str;

    fn url(&self, mode: UrlMode) -> String;

    fn create_date(&self) -> NaiveDateTime;

    fn update_date(&self) -> NaiveDateTime;

    fn level(&self) -> i32;

    fn sort_order(&self) -> i32;

    fn template_id(&self) -> Option<i32>;

    fn is_visible(&self) -> bool;
}

/// An object handed to a mapper
#[derive(Clone, Copy)]
pub enum Source<'a> {
    Content(&'a dyn PublishedContent),
    Element(&'a dyn PublishedElement),
    /// Anything else; only its type name is known
    Unsupported(&'static str),
}

impl<'a> Source<'a> {
    pub fn content(node: &'a dyn PublishedContent) -> Self {
        Source::Content(node)
    }

    pub fn element(node: &'a dyn PublishedElement) -> Self {
        Source::Element(node)
    }

    /// Wrap an arbitrary object that is not a published node
    pub fn other<T: ?Sized>(_value: &'a T) -> Self {
        Source::Unsupported(short_type_name(std::any::type_name::<T>()))
    }

    /// Whether the object is a published node kind the mapper understands
    pub fn is_supported(&self) -> bool {
        !matches!(self, Source::Unsupported(_))
    }

    pub fn as_content(&self) -> Option<&'a dyn PublishedContent> {
        match *self {
            Source::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Content-type alias, empty for unsupported objects
    pub fn content_type_alias(&self) -> &'a str {
        match *self {
            Source::Content(content) => content.content_type_alias(),
            Source::Element(element) => element.content_type_alias(),
            Source::Unsupported(_) => "",
        }
    }

    pub fn key(&self) -> Option<Uuid> {
        match *self {
            Source::Content(content) => Some(content.key()),
            Source::Element(element) => Some(element.key()),
            Source::Unsupported(_) => None,
        }
    }

    pub fn has_property(&self, alias: &str) -> bool {
        match *self {
            Source::Content(content) => content.has_property(alias),
            Source::Element(element) => element.has_property(alias),
            Source::Unsupported(_) => false,
        }
    }

    pub fn property_value(&self, alias: &str) -> Option<Value> {
        match *self {
            Source::Content(content) => content.property_value(alias),
            Source::Element(element) => element.property_value(alias),
            Source::Unsupported(_) => None,
        }
    }

    /// Runtime type name used in diagnostics and eligibility checks
    pub fn type_name(&self) -> &'static str {
        match *self {
            Source::Content(content) => content.node_type_name(),
            Source::Element(element) => element.node_type_name(),
            Source::Unsupported(name) => name,
        }
    }
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Source::Content(_) => "Content",
            Source::Element(_) => "Element",
            Source::Unsupported(_) => "Unsupported",
        };
        f.debug_struct("Source")
            .field("kind", &kind)
            .field("type", &self.type_name())
            .field("content_type_alias", &self.content_type_alias())
            .finish()
    }
}

impl<'a, T: PublishedContent> From<&'a T> for Source<'a> {
    fn from(node: &'a T) -> Self {
        Source::Content(node)
    }
}

/// Last path segment of a type name, ignoring generic arguments
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
