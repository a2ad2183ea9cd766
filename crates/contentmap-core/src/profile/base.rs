//! Member mappings for the bundled base models
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::{MappingConfiguration, MappingProfile};
use crate::mapping::resolver::{MediaUrlResolver, UrlResolver};
use crate::model::SourceType;
use crate::models::{BaseMediaModel, BaseSeoModel, ImageModel};
use crate::node::{Source, UrlMode};
use crate::value::Value;

/// Property aliases of the SEO members, as (member, alias)
pub const SEO_PROPERTY_ALIASES: [(&str, &str); 6] = [
    ("MetaTitle", "metaTitle"),
    ("MetaDescription", "metaDescription"),
    ("MetaKeywords", "metaKeywords"),
    ("OgTitle", "ogTitle"),
    ("OgDescription", "ogDescription"),
    ("NoIndex", "noIndex"),
];

/// Property aliases of media file metadata, as (member, alias)
pub const MEDIA_PROPERTY_ALIASES: [(&str, &str); 4] = [
    ("Extension", "umbracoExtension"),
    ("Bytes", "umbracoBytes"),
    ("Width", "umbracoWidth"),
    ("Height", "umbracoHeight"),
];

/// Maps published content onto the bundled SEO, media and image models
///
/// The base content and element models need no entries: all of their
/// members are built-in fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseMappingProfile;

impl MappingProfile for BaseMappingProfile {
    fn configure(&self, configuration: &mut MappingConfiguration) {
        let mut seo = configuration.create_map::<BaseSeoModel>(SourceType::PublishedContent);
        for (member, alias) in SEO_PROPERTY_ALIASES {
            seo = seo.for_member(member, |m| m.map_from_property(alias));
        }
        seo.for_member("OgImage", |m| m.resolve_using(MediaUrlResolver::new("ogImage")));

        let mut media = configuration
            .create_map::<BaseMediaModel>(SourceType::PublishedContent)
            .for_member("Url", |m| m.resolve_using(UrlResolver(UrlMode::Default)));
        for (member, alias) in MEDIA_PROPERTY_ALIASES {
            media = media.for_member(member, |m| m.map_from_property(alias));
        }

        configuration
            .create_map::<ImageModel>(SourceType::PublishedContent)
            .for_member("Src", |m| m.resolve_using(UrlResolver(UrlMode::Default)))
            .for_member("Alt", |m| m.resolve_with(media_name))
            .for_member("Width", |m| m.map_from_property("umbracoWidth"))
            .for_member("Height", |m| m.map_from_property("umbracoHeight"));
    }
}

fn media_name(source: &Source<'_>) -> Option<Value> {
    source
        .as_content()
        .map(|content| Value::String(content.name().to_string()))
}
