//! Core types for configuration bootstrap
//!
//! This module contains the value types shared by the resolver, fetcher and merge stages.

pub mod keys;
mod config;
mod document;
mod property;

pub use config::{ClientSettings, Credentials, ResolvedConfig};
pub use document::FetchedDocument;
pub use property::{non_empty, split_key_list, value_to_string, PropertyMap};
