//! Content-type eligibility checks
//!
//! Decides whether a source node may be mapped to a model, given the model's
//! eligibility descriptor. Eligibility is a pure function of the descriptor,
//! the source's content-type alias and the source's runtime type.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::model::{ContentModel, MapperConfiguration, SourceType};
use crate::node::Source;

/// Eligibility gate for one destination model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentTypeMatcher {
    configuration: Option<MapperConfiguration>,
}

impl ContentTypeMatcher {
    pub fn new(configuration: Option<MapperConfiguration>) -> Self {
        Self { configuration }
    }

    /// Matcher using the descriptor declared by `T`
    pub fn for_model<T: ContentModel>() -> Self {
        Self::new(T::mapper_configuration())
    }

    pub fn configuration(&self) -> Option<&MapperConfiguration> {
        self.configuration.as_ref()
    }

    pub fn can_map(&self, source: &Source<'_>) -> bool {
        can_map(self.configuration.as_ref(), source)
    }
}

/// Whether `source` is eligible under `configuration`
///
/// Without a descriptor every supported node is eligible; no alias filtering
/// happens at all in that case.
pub fn can_map(configuration: Option<&MapperConfiguration>, source: &Source<'_>) -> bool {
    if !source.is_supported() {
        return false;
    }

    let alias = source.content_type_alias();
    if alias.is_empty() {
        return false;
    }

    let Some(configuration) = configuration else {
        return true;
    };

    if !source_type_matches(&configuration.source_type, source) {
        return false;
    }

    if configuration.constrains_alias() && configuration.content_type_alias != alias {
        return false;
    }

    true
}

fn source_type_matches(declared: &SourceType, source: &Source<'_>) -> bool {
    match (declared, source) {
        (SourceType::PublishedContent, Source::Content(_)) => true,
        (SourceType::PublishedElement, Source::Element(_)) => true,
        (SourceType::Named(name), source) => name == source.type_name(),
        _ => false,
    }
}
