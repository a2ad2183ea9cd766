//! In-memory published nodes
//!
//! [`MemoryContent`] and [`MemoryElement`] hold their fields and properties
//! directly. Hosts that receive content as JSON (headless delivery APIs,
//! cached snapshots) deserialize into these and map from them like any
//! other node.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::{PublishedContent, PublishedElement, UrlMode};
use crate::value::{min_date_time, Value};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Published content held in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryContent {
    pub id: i32,
    #[serde(default)]
    pub key: Uuid,
    #[serde(default)]
    pub name: String,
    pub content_type_alias: String,
    #[serde(default)]
    pub url: String,
    /// Absolute URL; derived from `url` when empty
    #[serde(default)]
    pub absolute_url: String,
    #[serde(default = "min_date_time")]
    pub create_date: NaiveDateTime,
    #[serde(default = "min_date_time")]
    pub update_date: NaiveDateTime,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub template_id: Option<i32>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    /// Property values keyed by alias
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    /// Values that cannot be expressed as JSON (rich text, dates)
    #[serde(skip)]
    pub typed_properties: HashMap<String, Value>,
}

fn visible_by_default() -> bool {
    true
}

impl MemoryContent {
    pub fn builder(content_type_alias: impl Into<String>) -> MemoryContentBuilder {
        MemoryContentBuilder::new(content_type_alias)
    }

    /// Parse a node from its JSON representation
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn lookup(
    typed: &HashMap<String, Value>,
    json: &HashMap<String, serde_json::Value>,
    alias: &str,
) -> Option<Value> {
    let value = match typed.get(alias) {
        Some(value) => value.clone(),
        None => Value::from(json.get(alias)?.clone()),
    };
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

impl PublishedElement for MemoryContent {
    fn content_type_alias(&self) -> &str {
        &self.content_type_alias
    }

    fn key(&self) -> Uuid {
        self.key
    }

    fn has_property(&self, alias: &str) -> bool {
        self.typed_properties.contains_key(alias) || self.properties.contains_key(alias)
    }

    fn property_value(&self, alias: &str) -> Option<Value> {
        lookup(&self.typed_properties, &self.properties, alias)
    }
}

impl PublishedContent for MemoryContent {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self, mode: UrlMode) -> String {
        match mode {
            UrlMode::Absolute if !self.absolute_url.is_empty() => self.absolute_url.clone(),
            _ => self.url.clone(),
        }
    }

    fn create_date(&self) -> NaiveDateTime {
        self.create_date
    }

    fn update_date(&self) -> NaiveDateTime {
        self.update_date
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn template_id(&self) -> Option<i32> {
        self.template_id
    }

    fn is_visible(&self) -> bool {
        self.is_visible
    }
}

/// Builder for [`MemoryContent`]
pub struct MemoryContentBuilder {
    content: MemoryContent,
}

impl MemoryContentBuilder {
    pub fn new(content_type_alias: impl Into<String>) -> Self {
        Self {
            content: MemoryContent {
                id: 0,
                key: Uuid::nil(),
                name: String::new(),
                content_type_alias: content_type_alias.into(),
                url: String::new(),
                absolute_url: String::new(),
                create_date: min_date_time(),
                update_date: min_date_time(),
                level: 0,
                sort_order: 0,
                template_id: None,
                is_visible: true,
                properties: HashMap::new(),
                typed_properties: HashMap::new(),
            },
        }
    }

    pub fn id(mut self, id: i32) -> Self {
        self.content.id = id;
        self
    }

    pub fn key(mut self, key: Uuid) -> Self {
        self.content.key = key;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.content.name = name.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.content.url = url.into();
        self
    }

    pub fn absolute_url(mut self, url: impl Into<String>) -> Self {
        self.content.absolute_url = url.into();
        self
    }

    pub fn create_date(mut self, date: NaiveDateTime) -> Self {
        self.content.create_date = date;
        self
    }

    pub fn update_date(mut self, date: NaiveDateTime) -> Self {
        self.content.update_date = date;
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.content.level = level;
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.content.sort_order = sort_order;
        self
    }

    pub fn template_id(mut self, template_id: Option<i32>) -> Self {
        self.content.template_id = template_id;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.content.is_visible = visible;
        self
    }

    /// Add a property value under `alias`
    pub fn property(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.typed_properties.insert(alias.into(), value.into());
        self
    }

    pub fn build(self) -> MemoryContent {
        self.content
    }
}

/// A published element (composition, block) held in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryElement {
    #[serde(default)]
    pub key: Uuid,
    pub content_type_alias: String,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(skip)]
    pub typed_properties: HashMap<String, Value>,
}

impl MemoryElement {
    pub fn new(content_type_alias: impl Into<String>, key: Uuid) -> Self {
        Self {
            key,
            content_type_alias: content_type_alias.into(),
            properties: HashMap::new(),
            typed_properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.typed_properties.insert(alias.into(), value.into());
        self
    }
}

impl PublishedElement for MemoryElement {
    fn content_type_alias(&self) -> &str {
        &self.content_type_alias
    }

    fn key(&self) -> Uuid {
        self.key
    }

    fn has_property(&self, alias: &str) -> bool {
        self.typed_properties.contains_key(alias) || self.properties.contains_key(alias)
    }

    fn property_value(&self, alias: &str) -> Option<Value> {
        lookup(&self.typed_properties, &self.properties, alias)
    }
}
