//! Mapper construction for model types known only at runtime
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::content_mapper::ContentMapper;
use super::property_mapper::PropertyMapper;
use crate::config::MapperOptions;
use crate::error::{Error, Result};
use crate::model::ContentModel;
use crate::node::Source;
use crate::profile::MappingConfiguration;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A content mapper with its model type erased
pub trait DynContentMapper: Send + Sync {
    fn model_type(&self) -> TypeId;

    fn model_name(&self) -> &'static str;

    fn can_map(&self, source: &Source<'_>) -> bool;

    /// Map `source`; the box holds the model type named by `model_type`
    fn map(&self, source: &Source<'_>) -> Result<Box<dyn Any + Send>>;
}

impl<T: ContentModel> DynContentMapper for ContentMapper<T> {
    fn model_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn model_name(&self) -> &'static str {
        T::model_name()
    }

    fn can_map(&self, source: &Source<'_>) -> bool {
        ContentMapper::can_map(self, source)
    }

    fn map(&self, source: &Source<'_>) -> Result<Box<dyn Any + Send>> {
        let model = ContentMapper::map(self, source)?;
        Ok(Box::new(model))
    }
}

type MapperConstructor = fn(Arc<PropertyMapper>) -> Box<dyn DynContentMapper>;

fn construct<T: ContentModel>(property_mapper: Arc<PropertyMapper>) -> Box<dyn DynContentMapper> {
    Box::new(ContentMapper::<T>::new(property_mapper))
}

/// Builds content mappers that share one set of mapping services
pub struct ContentMapperFactory {
    property_mapper: Arc<PropertyMapper>,
    constructors: HashMap<TypeId, MapperConstructor>,
    names: HashMap<&'static str, TypeId>,
}

impl fmt::Debug for ContentMapperFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<_> = self.names.keys().collect();
        models.sort();
        f.debug_struct("ContentMapperFactory")
            .field("models", &models)
            .field("options", self.property_mapper.options())
            .finish()
    }
}

impl Default for ContentMapperFactory {
    fn default() -> Self {
        Self::new(Arc::new(PropertyMapper::default()))
    }
}

impl ContentMapperFactory {
    pub fn new(property_mapper: Arc<PropertyMapper>) -> Self {
        Self {
            property_mapper,
            constructors: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Factory with fresh services for `configuration` and `options`
    pub fn with_configuration(configuration: MappingConfiguration, options: MapperOptions) -> Self {
        Self::new(Arc::new(PropertyMapper::with_configuration(configuration, options)))
    }

    pub fn property_mapper(&self) -> &Arc<PropertyMapper> {
        &self.property_mapper
    }

    /// Make `T` available to the runtime lookups
    pub fn register<T: ContentModel>(&mut self) -> &mut Self {
        let type_id = TypeId::of::<T>();
        self.constructors.insert(type_id, construct::<T>);
        self.names.insert(T::model_name(), type_id);
        log::debug!("Registered content mapper for {}", T::model_name());
        self
    }

    pub fn is_registered(&self, model_type: TypeId) -> bool {
        self.constructors.contains_key(&model_type)
    }

    /// Mapper for a model type known at compile time
    pub fn create_mapper<T: ContentModel>(&self) -> ContentMapper<T> {
        ContentMapper::new(Arc::clone(&self.property_mapper))
    }

    /// Mapper for a registered model type
    pub fn create_mapper_for_type(&self, model_type: TypeId) -> Result<Box<dyn DynContentMapper>> {
        let construct = self.constructors.get(&model_type).ok_or_else(|| {
            Error::configuration(format!("No content mapper registered for type {:?}", model_type))
        })?;
        Ok(construct(Arc::clone(&self.property_mapper)))
    }

    /// Mapper for a registered model, by model name
    pub fn create_mapper_for_name(&self, model_name: &str) -> Result<Box<dyn DynContentMapper>> {
        let model_type = self.names.get(model_name).copied().ok_or_else(|| {
            Error::configuration(format!("No content mapper registered for model {}", model_name))
        })?;
        self.create_mapper_for_type(model_type)
    }
}
