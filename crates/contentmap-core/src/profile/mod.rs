//! Mapping profiles
//!
//! A profile groups the member mappings an application needs and applies
//! them to a [`MappingConfiguration`].
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod configuration;

pub use base::BaseMappingProfile;
pub use configuration::{
    MappingConfiguration, MappingExpression, MemberConfiguration, PropertyMapping, TypeMap,
    TypePair,
};

use crate::node::short_type_name;

/// A reusable set of type maps
pub trait MappingProfile {
    /// Name used when the profile is logged
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn configure(&self, configuration: &mut MappingConfiguration);
}
