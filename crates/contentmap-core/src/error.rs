//! Error types for the ContentMap core library
//!
//! This module defines the error handling system for ContentMap, using
//! thiserror for ergonomic error definitions and anyhow for wrapped causes.
//!
//! Callers only ever see [`Error`]. Per-property failures are represented by
//! [`PropertyMappingError`], which the property mapper logs and drops.

use std::fmt;
use thiserror::Error;

/// Main error type for ContentMap operations
#[derive(Error, Debug)]
pub enum Error {
    /// The source is not eligible for the destination model
    #[error("Cannot map object of type {source_type} to {destination_type}")]
    Ineligible {
        source_type: String,
        destination_type: String,
    },

    /// Unexpected failure while mapping an eligible source
    #[error("Error mapping {source_type} to {destination_type}.")]
    Mapping {
        source_type: String,
        destination_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid mapping configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        validation_errors: Vec<String>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Configuration error without individual validation messages
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            validation_errors: Vec::new(),
        }
    }

    /// Whether this is the precondition failure raised for ineligible sources
    pub fn is_ineligible(&self) -> bool {
        matches!(self, Error::Ineligible { .. })
    }
}

/// Errors raised by a model while it is constructed or a member is assigned
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The model has no parameterless constructor
    #[error("{model} has no parameterless constructor")]
    NoDefaultConstructor { model: String },

    /// The value could not be stored in the member
    #[error("Cannot assign value of type {found} to member {member} of type {expected}")]
    TypeMismatch {
        member: String,
        expected: String,
        found: String,
    },

    /// The member does not exist or is not writable
    #[error("Member {member} does not exist on {model} or is not writable")]
    UnknownMember { model: String, member: String },
}

/// Raised by the value converter when it cannot produce the target type
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Type conversion failed: cannot convert {from} to {to} for value: {value}")]
pub struct ConversionError {
    pub from: String,
    pub to: String,
    pub value: String,
}

/// What went wrong with a single member during property mapping
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyFailure {
    /// The resolved value could not be converted
    Conversion(ConversionError),
    /// The converted value was rejected by the model
    Assignment(ModelError),
}

impl fmt::Display for PropertyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyFailure::Conversion(err) => write!(f, "{}", err),
            PropertyFailure::Assignment(err) => write!(f, "{}", err),
        }
    }
}

/// A recoverable failure for one destination member
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error mapping property {member_name} (alias '{property_alias}') on {destination_type}: {failure}")]
pub struct PropertyMappingError {
    pub property_alias: String,
    pub destination_type: String,
    pub member_name: String,
    pub failure: PropertyFailure,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
