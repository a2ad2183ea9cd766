//! Content mapping engine
//!
//! Turns published content and elements into typed models: the eligibility
//! gate, the per-type property cache, value conversion and the member
//! mapper that ties them together.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

pub mod content_mapper;
pub mod converter;
pub mod factory;
pub mod matcher;
pub mod properties;
pub mod property_mapper;
pub mod registry;
pub mod resolver;

pub use content_mapper::ContentMapper;
pub use converter::PropertyValueConverter;
pub use factory::{ContentMapperFactory, DynContentMapper};
pub use matcher::ContentTypeMatcher;
pub use properties::{ModelPropertyService, PropertyDescriptor};
pub use property_mapper::{is_built_in_property, BuiltInField, PropertyMapper};
pub use registry::{ConverterFn, TypeConverterRegistry};
pub use resolver::{MediaUrlResolver, UrlResolver, ValueResolver};
