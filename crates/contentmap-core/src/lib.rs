//! ContentMap Core - typed models from CMS published content
//!
//! This crate maps published content nodes and elements onto plain Rust
//! structs. A model declares which content type it accepts and which members
//! it exposes; the mapper fills those members from the node's built-in fields
//! and named properties, converting values along the way.
//!
//! # Main Components
//!
//! - **Content mapper**: eligibility check plus construction of the model
//! - **Property mapper**: built-in fields, configured aliases and resolvers
//! - **Conversion**: direct conversions with an optional registry fallback
//! - **Profiles**: per-member configuration for known model types
//!
//! # Example
//!
//! ```
//! use contentmap_core::{ContentMapper, MemoryContent, Source};
//! use contentmap_core::models::BaseContentModel;
//!
//! fn example() -> contentmap_core::Result<()> {
//!     let content = MemoryContent::builder("homePage").id(1).name("Home").build();
//!     let mapper = ContentMapper::<BaseContentModel>::default();
//!     let model = mapper.map(&Source::from(&content))?;
//!     assert_eq!(model.name, "Home");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod mapping;
pub mod model;
pub mod models;
pub mod node;
pub mod profile;
pub mod value;

// Re-export main types for convenience
pub use config::MapperOptions;
pub use error::{
    ConversionError, Error, ModelError, PropertyFailure, PropertyMappingError, Result,
};
pub use mapping::{
    ContentMapper, ContentMapperFactory, ContentTypeMatcher, DynContentMapper,
    ModelPropertyService, PropertyMapper, PropertyValueConverter, TypeConverterRegistry,
    ValueResolver,
};
pub use model::{ContentModel, MapperConfiguration, PropertyInfo, SourceType};
pub use node::{MemoryContent, MemoryElement, PublishedContent, PublishedElement, Source, UrlMode};
pub use profile::{BaseMappingProfile, MappingConfiguration, MappingProfile};
pub use value::{FromValue, Value, ValueType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
