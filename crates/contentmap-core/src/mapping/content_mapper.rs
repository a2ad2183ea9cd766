//! Public entry point: eligibility gate, construction and property mapping
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::matcher::ContentTypeMatcher;
use super::property_mapper::PropertyMapper;
use crate::error::{Error, Result};
use crate::model::{ContentModel, MapperConfiguration};
use crate::node::Source;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Maps eligible source nodes to `T`
///
/// The eligibility descriptor is resolved once, when the mapper is built.
pub struct ContentMapper<T: ContentModel> {
    matcher: ContentTypeMatcher,
    property_mapper: Arc<PropertyMapper>,
    _model: PhantomData<fn() -> T>,
}

impl<T: ContentModel> fmt::Debug for ContentMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentMapper")
            .field("model", &T::model_name())
            .field("configuration", &self.matcher.configuration())
            .finish()
    }
}

impl<T: ContentModel> Clone for ContentMapper<T> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            property_mapper: Arc::clone(&self.property_mapper),
            _model: PhantomData,
        }
    }
}

impl<T: ContentModel> Default for ContentMapper<T> {
    fn default() -> Self {
        Self::new(Arc::new(PropertyMapper::default()))
    }
}

impl<T: ContentModel> ContentMapper<T> {
    /// Mapper using the descriptor declared by `T`
    ///
    /// With attribute mapping disabled in the options the descriptor is
    /// ignored and every supported node is eligible.
    pub fn new(property_mapper: Arc<PropertyMapper>) -> Self {
        let matcher = if property_mapper.options().enable_attribute_mapping {
            ContentTypeMatcher::for_model::<T>()
        } else {
            ContentTypeMatcher::default()
        };
        Self {
            matcher,
            property_mapper,
            _model: PhantomData,
        }
    }

    /// Mapper using an explicit descriptor instead of the declared one
    pub fn with_configuration(
        configuration: Option<MapperConfiguration>,
        property_mapper: Arc<PropertyMapper>,
    ) -> Self {
        Self {
            matcher: ContentTypeMatcher::new(configuration),
            property_mapper,
            _model: PhantomData,
        }
    }

    pub fn configuration(&self) -> Option<&MapperConfiguration> {
        self.matcher.configuration()
    }

    pub fn can_map(&self, source: &Source<'_>) -> bool {
        self.matcher.can_map(source)
    }

    /// Build a `T` from `source`
    ///
    /// Fails with [`Error::Ineligible`] when [`can_map`](Self::can_map) is
    /// false and with [`Error::Mapping`] when the model cannot be built.
    /// Failures of individual members are logged, not returned.
    pub fn map(&self, source: &Source<'_>) -> Result<T> {
        if !self.can_map(source) {
            return Err(Error::Ineligible {
                source_type: source.type_name().to_string(),
                destination_type: T::model_name().to_string(),
            });
        }

        self.build(source).map_err(|cause| {
            tracing::error!(
                source_type = source.type_name(),
                destination_type = T::model_name(),
                error = %cause,
                "Error mapping content"
            );
            Error::Mapping {
                source_type: source.type_name().to_string(),
                destination_type: T::model_name().to_string(),
                source: cause,
            }
        })
    }

    fn build(&self, source: &Source<'_>) -> anyhow::Result<T> {
        let mut model = T::create()?;

        panic::catch_unwind(AssertUnwindSafe(|| {
            self.property_mapper.map_properties(source, &mut model)
        }))
        .map_err(|payload| anyhow::anyhow!("property mapping panicked: {}", panic_message(&payload)))?;

        Ok(model)
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}
