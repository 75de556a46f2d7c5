// mimic-derive: introspection for plain Rust types
//
// Provides proc-macros that implement mimic_engine's introspection capability:
// - #[derive(Introspect)] - exposes struct fields as properties / backing fields
// - #[introspect_methods] - exposes an impl block's methods for call-through
//
// Example:
// ```
// use mimic_engine::{Introspect, introspect_methods};
//
// #[derive(Introspect)]
// #[introspect(methods)]
// struct Counter {
//     #[introspect(rename = "Count")]
//     pub count: i32,
// }
//
// #[introspect_methods]
// impl Counter {
//     pub fn add(&mut self, by: i32) -> i32 {
//         self.count += by;
//         self.count
//     }
// }
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemImpl};

mod attrs;
mod derive;
mod methods;

/// Implements `mimic_engine::Introspect` for a struct with named fields.
///
/// - `pub` fields are listed as properties (readable and writable)
/// - on `duck` types, all other fields are listed as non-public fields,
///   reachable through the backing-field convention; ordinary types ignore
///   them, so they need no conversion impls
///
/// # Attributes
///
/// Container: `#[introspect(duck)]` marks the type as a synthesized
/// placeholder; `#[introspect(methods)]` delegates method listing and
/// invocation to the type's `#[introspect_methods]` impl block.
///
/// Field: `#[introspect(rename = "Name")]`, `#[introspect(readonly)]`,
/// `#[introspect(writeonly)]`, `#[introspect(skip)]`.
///
/// # Example
///
/// ```ignore
/// #[derive(Introspect)]
/// struct Person {
///     #[introspect(rename = "Name")]
///     pub name: String,
///     #[introspect(rename = "Id", readonly)]
///     pub id: i64,
/// }
/// ```
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Exposes the public `&self` / `&mut self` methods of an inherent impl
/// block through `mimic_engine::IntrospectMethods`.
///
/// Declared parameter types come from `Typed`, so the shim can reorder
/// arguments by type in fuzzy mode. Associated functions and private methods
/// are ignored; `#[introspect(skip)]` hides a public method and
/// `#[introspect(rename = "...")]` changes its lookup name.
///
/// # Example
///
/// ```ignore
/// #[introspect_methods]
/// impl Person {
///     #[introspect(rename = "Describe")]
///     pub fn describe(&self, age: i32, title: String) -> String {
///         format!("{} {} ({})", title, self.name, age)
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn introspect_methods(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    methods::expand_methods(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
