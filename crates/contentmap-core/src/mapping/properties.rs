//! Writable-member enumeration with a shared per-type cache
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::model::{ContentModel, PropertyInfo};
use crate::value::ValueType;
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;

/// A member the property mapper may assign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub value_type: ValueType,
}

impl PropertyDescriptor {
    /// Alias used for lookups on the source node
    pub fn alias(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Computes and caches the writable members of model types
///
/// Shared between mappers (wrap it in an `Arc`); concurrent first requests
/// for the same type may compute the list twice but always store one result.
#[derive(Debug)]
pub struct ModelPropertyService {
    cache: DashMap<TypeId, Arc<[PropertyDescriptor]>>,
    caching: bool,
}

impl Default for ModelPropertyService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelPropertyService {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            caching: true,
        }
    }

    /// A service that recomputes the member list on every call
    pub fn uncached() -> Self {
        Self {
            cache: DashMap::new(),
            caching: false,
        }
    }

    /// Writable, non-indexer instance members of `T`, in declaration order
    pub fn get_properties<T: ContentModel>(&self) -> Arc<[PropertyDescriptor]> {
        if !self.caching {
            return writable_properties(T::properties()).into();
        }

        let type_id = TypeId::of::<T>();
        if let Some(cached) = self.cache.get(&type_id) {
            return Arc::clone(cached.value());
        }

        let computed: Arc<[PropertyDescriptor]> = writable_properties(T::properties()).into();
        tracing::debug!(
            model = T::model_name(),
            properties = computed.len(),
            "cached writable model properties"
        );
        let entry = self.cache.entry(type_id).or_insert(computed);
        Arc::clone(entry.value())
    }

    /// Number of model types with a cached member list
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Keep public, writable instance members without index parameters
pub fn writable_properties(properties: Vec<PropertyInfo>) -> Vec<PropertyDescriptor> {
    properties
        .into_iter()
        .filter(|p| p.can_write && p.index_parameters == 0 && !p.is_static)
        .map(|p| PropertyDescriptor {
            name: p.name,
            value_type: p.value_type,
        })
        .collect()
}
