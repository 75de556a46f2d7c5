// #[introspect_methods] proc-macro implementation
//
// Generates an `IntrospectMethods` impl describing every public `&self` /
// `&mut self` method of an inherent impl block, plus a slot dispatcher that
// converts dynamic arguments back into the declared parameter types.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{FnArg, Ident, ImplItem, ItemImpl, Pat, Result, ReturnType, Type, Visibility};

use crate::attrs::MemberAttrs;

struct Parameter {
    name: String,
    binding: Ident,
    ty: Type,
}

struct Method {
    ident: Ident,
    name: String,
    params: Vec<Parameter>,
    output: ReturnType,
}

/// Expands the #[introspect_methods] attribute macro.
///
/// Input: inherent impl block
/// Output: the impl block (with `#[introspect]` helper attributes stripped)
/// plus an `IntrospectMethods` impl
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[introspect_methods]
/// impl Greeter {
///     pub fn greet(&self, times: i32, name: String) -> String { ... }
/// }
///
/// // Output:
/// impl Greeter {
///     pub fn greet(&self, times: i32, name: String) -> String { ... }
/// }
///
/// impl ::mimic_engine::IntrospectMethods for Greeter {
///     fn method_infos() -> Vec<MethodInfo> {
///         vec![MethodInfo::new("greet", vec![/* times: i32, name: string */], <String as Typed>::value_type(), 0usize)]
///     }
///     fn invoke_method_slot(&mut self, slot: usize, args: Vec<Value>) -> ValueResult<Value> {
///         match slot {
///             0usize => {
///                 // Validation
///                 // Argument extraction
///                 // Call original method
///                 // Convert result
///             }
///             _ => Err(ValueError::NoSuchSlot { kind: "method", index: slot }),
///         }
///     }
/// }
/// ```
pub fn expand_methods(mut item: ItemImpl) -> Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[introspect_methods] must be applied to an inherent impl block",
        ));
    }

    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[introspect_methods] does not support generic impl blocks",
        ));
    }

    let mut methods = Vec::new();
    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = MemberAttrs::take(&mut method.attrs)?;
        if attrs.skip || !matches!(method.vis, Visibility::Public(_)) {
            continue;
        }

        // Associated functions without a receiver are not instance methods.
        let Some(FnArg::Receiver(receiver)) = method.sig.inputs.first() else {
            continue;
        };
        if receiver.reference.is_none() {
            return Err(syn::Error::new_spanned(
                receiver,
                "introspected methods must take `&self` or `&mut self`",
            ));
        }
        if !method.sig.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &method.sig.generics,
                "generic methods cannot be introspected; mark them #[introspect(skip)]",
            ));
        }
        if let Some(asyncness) = &method.sig.asyncness {
            return Err(syn::Error::new_spanned(
                asyncness,
                "async methods cannot be introspected; mark them #[introspect(skip)]",
            ));
        }

        let mut params = Vec::new();
        for (position, arg) in method.sig.inputs.iter().skip(1).enumerate() {
            let FnArg::Typed(pat_type) = arg else {
                continue;
            };
            let Pat::Ident(pat_ident) = &*pat_type.pat else {
                return Err(syn::Error::new_spanned(
                    &pat_type.pat,
                    "Only simple identifiers are supported as arguments",
                ));
            };
            params.push(Parameter {
                name: pat_ident.ident.unraw().to_string(),
                binding: format_ident!("__arg{}", position),
                ty: (*pat_type.ty).clone(),
            });
        }

        methods.push(Method {
            ident: method.sig.ident.clone(),
            name: attrs
                .rename
                .unwrap_or_else(|| method.sig.ident.unraw().to_string()),
            params,
            output: method.sig.output.clone(),
        });
    }

    let self_ty = &item.self_ty;

    let method_infos = methods.iter().enumerate().map(|(slot, m)| {
        let display = &m.name;
        let parameters = m.params.iter().enumerate().map(|(position, p)| {
            let pname = &p.name;
            let ty = &p.ty;
            quote! {
                ::mimic_engine::ParameterInfo::new(
                    #pname,
                    <#ty as ::mimic_engine::Typed>::value_type(),
                    #position,
                )
                .with_nullable(<#ty as ::mimic_engine::Typed>::nullable())
            }
        });
        let return_type = match &m.output {
            ReturnType::Default => quote! { ::mimic_engine::ValueType::Unit },
            ReturnType::Type(_, ty) => quote! { <#ty as ::mimic_engine::Typed>::value_type() },
        };
        quote! {
            ::mimic_engine::MethodInfo::new(
                #display,
                ::std::vec![#(#parameters),*],
                #return_type,
                #slot,
            )
        }
    });

    let dispatch_arms = methods.iter().enumerate().map(|(slot, m)| {
        let ident = &m.ident;
        let arity = m.params.len();
        let bindings: Vec<_> = m.params.iter().map(|p| &p.binding).collect();
        let extractions = m.params.iter().map(|p| {
            let binding = &p.binding;
            let ty = &p.ty;
            quote! {
                let #binding: #ty = ::mimic_engine::FromValue::from_value(
                    args.next().unwrap_or_default(),
                )?;
            }
        });
        quote! {
            #slot => {
                // Validate argument count
                if args.len() != #arity {
                    return Err(::mimic_engine::ValueError::ArgumentCount {
                        expected: #arity,
                        got: args.len(),
                    });
                }

                // Extract and convert arguments (with type checking)
                #[allow(unused_mut, unused_variables)]
                let mut args = args.into_iter();
                #(#extractions)*

                #[allow(clippy::let_unit_value)]
                let result = self.#ident(#(#bindings),*);
                Ok(::mimic_engine::ToValue::to_value(&result))
            }
        }
    });

    let expanded = quote! {
        #item

        impl ::mimic_engine::IntrospectMethods for #self_ty {
            fn method_infos() -> ::std::vec::Vec<::mimic_engine::MethodInfo> {
                ::std::vec![#(#method_infos),*]
            }

            fn invoke_method_slot(
                &mut self,
                slot: usize,
                args: ::std::vec::Vec<::mimic_engine::Value>,
            ) -> ::mimic_engine::ValueResult<::mimic_engine::Value> {
                match slot {
                    #(#dispatch_arms)*
                    _ => {
                        let _ = args;
                        Err(::mimic_engine::ValueError::NoSuchSlot {
                            kind: "method",
                            index: slot,
                        })
                    }
                }
            }
        }
    };

    Ok(expanded)
}
