// #[derive(Introspect)] implementation
//
// `pub` fields become properties. On `duck` types every other field becomes
// a non-public field slot; ordinary types leave them out entirely. Slots are
// numbered in declaration order within each family.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Result, Type, Visibility};

use crate::attrs::{ContainerAttrs, MemberAttrs};

struct Member {
    ident: Ident,
    ty: Type,
    name: String,
    readable: bool,
    writable: bool,
}

/// Expands `#[derive(Introspect)]`.
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[derive(Introspect)]
/// struct Person {
///     #[introspect(rename = "Name")]
///     pub name: String,
///     age: i32,
/// }
///
/// // Output (abridged):
/// impl ::mimic_engine::Introspect for Person {
///     fn type_key(&self) -> ::mimic_engine::TypeKey { ::mimic_engine::TypeKey::of::<Self>() }
///     fn list_properties(&self) -> Vec<PropertyInfo> {
///         vec![PropertyInfo::new("Name", <String as Typed>::value_type(), 0usize)]
///     }
///     fn read_property(&self, slot: usize) -> ValueResult<Value> {
///         match slot {
///             0usize => Ok(ToValue::to_value(&self.name)),
///             _ => Err(ValueError::NoSuchSlot { kind: "property", index: slot }),
///         }
///     }
///     // write_property ...; `age` is private and not introspected
/// }
/// ```
pub fn expand_derive(input: DeriveInput) -> Result<TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Introspect)] does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &data.fields,
                    "#[derive(Introspect)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Introspect)] can only be applied to structs",
            ))
        }
    };

    let mut properties = Vec::new();
    let mut hidden = Vec::new();
    for field in fields {
        let attrs = MemberAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let member = Member {
            name: attrs.rename.unwrap_or_else(|| ident.unraw().to_string()),
            ident,
            ty: field.ty.clone(),
            readable: !attrs.writeonly,
            writable: !attrs.readonly,
        };
        if matches!(field.vis, Visibility::Public(_)) {
            properties.push(member);
        } else if container.duck {
            hidden.push(member);
        }
    }

    let duck = container.duck;

    let property_infos = properties.iter().enumerate().map(|(slot, m)| {
        let display = &m.name;
        let ty = &m.ty;
        let readable = m.readable;
        let writable = m.writable;
        quote! {
            ::mimic_engine::PropertyInfo::new(
                #display,
                <#ty as ::mimic_engine::Typed>::value_type(),
                #slot,
            )
            .with_access(#readable, #writable)
        }
    });

    let read_arms = properties
        .iter()
        .enumerate()
        .filter(|(_, m)| m.readable)
        .map(|(slot, m)| {
            let ident = &m.ident;
            quote! { #slot => Ok(::mimic_engine::ToValue::to_value(&self.#ident)), }
        });

    let write_arms = properties
        .iter()
        .enumerate()
        .filter(|(_, m)| m.writable)
        .map(|(slot, m)| {
            let ident = &m.ident;
            quote! {
                #slot => {
                    self.#ident = ::mimic_engine::FromValue::from_value(value)?;
                    Ok(())
                }
            }
        });

    let field_infos = hidden.iter().enumerate().map(|(slot, m)| {
        let display = &m.name;
        let ty = &m.ty;
        quote! {
            ::mimic_engine::FieldInfo::new(
                #display,
                <#ty as ::mimic_engine::Typed>::value_type(),
                #slot,
            )
        }
    });

    let field_read_arms = hidden.iter().enumerate().map(|(slot, m)| {
        let ident = &m.ident;
        quote! { #slot => Ok(::mimic_engine::ToValue::to_value(&self.#ident)), }
    });

    let field_write_arms = hidden.iter().enumerate().map(|(slot, m)| {
        let ident = &m.ident;
        quote! {
            #slot => {
                self.#ident = ::mimic_engine::FromValue::from_value(value)?;
                Ok(())
            }
        }
    });

    let fields = if container.duck {
        quote! {
            fn list_fields(&self) -> ::std::vec::Vec<::mimic_engine::FieldInfo> {
                ::std::vec![#(#field_infos),*]
            }

            fn read_field(
                &self,
                slot: usize,
            ) -> ::mimic_engine::ValueResult<::mimic_engine::Value> {
                match slot {
                    #(#field_read_arms)*
                    _ => Err(::mimic_engine::ValueError::NoSuchSlot {
                        kind: "field",
                        index: slot,
                    }),
                }
            }

            fn write_field(
                &mut self,
                slot: usize,
                value: ::mimic_engine::Value,
            ) -> ::mimic_engine::ValueResult<()> {
                match slot {
                    #(#field_write_arms)*
                    _ => {
                        let _ = value;
                        Err(::mimic_engine::ValueError::NoSuchSlot {
                            kind: "field",
                            index: slot,
                        })
                    }
                }
            }
        }
    } else {
        quote! {}
    };

    let methods = if container.methods {
        quote! {
            fn list_methods(&self) -> ::std::vec::Vec<::mimic_engine::MethodInfo> {
                <Self as ::mimic_engine::IntrospectMethods>::method_infos()
            }

            fn invoke_method(
                &mut self,
                slot: usize,
                args: ::std::vec::Vec<::mimic_engine::Value>,
            ) -> ::mimic_engine::ValueResult<::mimic_engine::Value> {
                <Self as ::mimic_engine::IntrospectMethods>::invoke_method_slot(self, slot, args)
            }
        }
    } else {
        quote! {}
    };

    let expanded = quote! {
        impl ::mimic_engine::Introspect for #name {
            fn type_key(&self) -> ::mimic_engine::TypeKey {
                ::mimic_engine::TypeKey::of::<Self>()
            }

            fn is_synthesized(&self) -> bool {
                #duck
            }

            fn list_properties(&self) -> ::std::vec::Vec<::mimic_engine::PropertyInfo> {
                ::std::vec![#(#property_infos),*]
            }

            fn read_property(
                &self,
                slot: usize,
            ) -> ::mimic_engine::ValueResult<::mimic_engine::Value> {
                match slot {
                    #(#read_arms)*
                    _ => Err(::mimic_engine::ValueError::NoSuchSlot {
                        kind: "property",
                        index: slot,
                    }),
                }
            }

            fn write_property(
                &mut self,
                slot: usize,
                value: ::mimic_engine::Value,
            ) -> ::mimic_engine::ValueResult<()> {
                match slot {
                    #(#write_arms)*
                    _ => {
                        let _ = value;
                        Err(::mimic_engine::ValueError::NoSuchSlot {
                            kind: "property",
                            index: slot,
                        })
                    }
                }
            }

            #fields

            #methods
        }
    };

    Ok(expanded)
}
