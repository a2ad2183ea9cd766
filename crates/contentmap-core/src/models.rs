//! Ready-made base models for common content shapes
//!
//! These cover the platform's built-in fields and the usual SEO and media
//! properties. [`BaseMappingProfile`](crate::profile::BaseMappingProfile)
//! registers the member mappings they rely on.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::error::ModelError;
use crate::model::{unknown_member, ContentModel, MapperConfiguration, PropertyInfo};
use crate::value::{min_date_time, Value, ValueType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published content with every built-in field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseContentModel {
    pub id: i32,
    pub key: Uuid,
    pub name: String,
    pub content_type_alias: String,
    pub url: String,
    pub absolute_url: String,
    pub create_date: NaiveDateTime,
    pub update_date: NaiveDateTime,
    pub level: i32,
    pub sort_order: i32,
    pub is_visible: bool,
    pub template_id: Option<i32>,
}

impl Default for BaseContentModel {
    fn default() -> Self {
        Self {
            id: 0,
            key: Uuid::nil(),
            name: String::new(),
            content_type_alias: String::new(),
            url: String::new(),
            absolute_url: String::new(),
            create_date: min_date_time(),
            update_date: min_date_time(),
            level: 0,
            sort_order: 0,
            is_visible: false,
            template_id: None,
        }
    }
}

impl ContentModel for BaseContentModel {
    fn create() -> Result<Self, ModelError> {
        Ok(Self::default())
    }

    fn mapper_configuration() -> Option<MapperConfiguration> {
        Some(MapperConfiguration::content("*"))
    }

    crate::model_members! {
        "Id" => id: i32,
        "Key" => key: Uuid,
        "Name" => name: String,
        "ContentTypeAlias" => content_type_alias: String,
        "Url" => url: String,
        "AbsoluteUrl" => absolute_url: String,
        "CreateDate" => create_date: NaiveDateTime,
        "UpdateDate" => update_date: NaiveDateTime,
        "Level" => level: i32,
        "SortOrder" => sort_order: i32,
        "IsVisible" => is_visible: bool,
        "TemplateId" => template_id: Option<i32>,
    }
}

/// Element (composition, block) identity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseElementModel {
    pub key: Uuid,
    pub content_type_alias: String,
}

impl ContentModel for BaseElementModel {
    fn create() -> Result<Self, ModelError> {
        Ok(Self::default())
    }

    fn mapper_configuration() -> Option<MapperConfiguration> {
        Some(MapperConfiguration::element("*"))
    }

    crate::model_members! {
        "Key" => key: Uuid,
        "ContentTypeAlias" => content_type_alias: String,
    }
}

/// Content with search and social metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSeoModel {
    #[serde(flatten)]
    pub content: BaseContentModel,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    /// URL of the social sharing image
    pub og_image: Option<String>,
    pub no_index: bool,
}

impl ContentModel for BaseSeoModel {
    fn create() -> Result<Self, ModelError> {
        Ok(Self::default())
    }

    fn mapper_configuration() -> Option<MapperConfiguration> {
        Some(MapperConfiguration::content("*"))
    }

    fn properties() -> Vec<PropertyInfo> {
        let mut properties = BaseContentModel::properties();
        properties.extend([
            PropertyInfo::writable("MetaTitle", ValueType::String),
            PropertyInfo::writable("MetaDescription", ValueType::String),
            PropertyInfo::writable("MetaKeywords", ValueType::String),
            PropertyInfo::writable("OgTitle", ValueType::String),
            PropertyInfo::writable("OgDescription", ValueType::String),
            PropertyInfo::writable("OgImage", ValueType::String),
            PropertyInfo::writable("NoIndex", ValueType::Bool),
        ]);
        properties
    }

    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "MetaTitle" => self.meta_title = value.extract(name)?,
            "MetaDescription" => self.meta_description = value.extract(name)?,
            "MetaKeywords" => self.meta_keywords = value.extract(name)?,
            "OgTitle" => self.og_title = value.extract(name)?,
            "OgDescription" => self.og_description = value.extract(name)?,
            "OgImage" => self.og_image = value.extract(name)?,
            "NoIndex" => self.no_index = value.extract(name)?,
            _ => {
                return self.content.set_value(name, value).map_err(|err| match err {
                    ModelError::UnknownMember { .. } => unknown_member::<Self>(name),
                    other => other,
                })
            }
        }
        Ok(())
    }
}

/// A media item (image, document) and its file metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMediaModel {
    pub id: i32,
    pub key: Uuid,
    pub name: String,
    pub url: String,
    pub extension: String,
    pub bytes: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl ContentModel for BaseMediaModel {
    fn create() -> Result<Self, ModelError> {
        Ok(Self::default())
    }

    crate::model_members! {
        "Id" => id: i32,
        "Key" => key: Uuid,
        "Name" => name: String,
        "Url" => url: String,
        "Extension" => extension: String,
        "Bytes" => bytes: i32,
        "Width" => width: Option<i32>,
        "Height" => height: Option<i32>,
    }
}

/// An image reference ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageModel {
    pub src: String,
    pub alt: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl ContentModel for ImageModel {
    fn create() -> Result<Self, ModelError> {
        Ok(Self::default())
    }

    crate::model_members! {
        "Src" => src: String,
        "Alt" => alt: String,
        "Width" => width: Option<i32>,
        "Height" => height: Option<i32>,
    }
}
