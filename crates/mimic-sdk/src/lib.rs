//! Mimic SDK - dynamic values for runtime shims
//!
//! This crate provides the value model shared by the shim engine and the
//! derive macros: the [`Value`] enum, runtime type identities ([`TypeKey`],
//! [`ValueType`]) and the conversion traits that move data between Rust types
//! and dynamic values.
//!
//! # Example
//!
//! ```ignore
//! use mimic_sdk::{FromValue, ToValue, Value};
//!
//! let v = String::from("quack").to_value();
//! assert_eq!(v.as_str(), Some("quack"));
//! assert_eq!(String::from_value(v).unwrap(), "quack");
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod types;
pub mod value;

pub use convert::{FromValue, ToValue, Typed};
pub use error::{ValueError, ValueResult};
pub use types::{TypeKey, ValueType};
pub use value::{OpaqueValue, Value};
