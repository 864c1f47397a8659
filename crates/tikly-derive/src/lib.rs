//! `#[derive(Record)]` for tikly device records.
//!
//! Expands a plain struct into a `tikly_api::Record` impl: a `const` table
//! of field descriptors plus index-based accessors used by the codec.
//!
//! ```ignore
//! #[derive(Debug, Default, Record)]
//! pub struct Scheduler {
//!     #[record(name = ".id")]
//!     pub id: String,
//!     #[record(name = "interval", duration)]
//!     pub interval: i64,
//!     // no wire name: never encoded, never decoded
//!     pub note: String,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, LitStr, Type, parse_macro_input};

const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Coercion {
    Text,
    Bool,
    Int,
    Duration,
}

struct WireField {
    ident: syn::Ident,
    wire_name: String,
    coercion: Coercion,
}

/// Derive `tikly_api::Record` for a struct with named fields.
///
/// Field attributes:
/// - `#[record(name = "wire-name")]` maps the field to a wire attribute.
///   Fields without a name are left out of the descriptor table.
/// - `#[record(duration)]` decodes `"<N>d<HH:MM:SS>"` text into seconds.
///   Only valid on integer fields.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Struct(DataStruct {
        fields: Fields::Named(named),
        ..
    }) = &input.data
    else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        if let Some(wire) = parse_field(field)? {
            fields.push(wire);
        }
    }

    let descriptors = fields.iter().map(|f| {
        let wire = &f.wire_name;
        let attr = f.ident.to_string();
        let attr = attr.trim_start_matches("r#");
        let coercion = match f.coercion {
            Coercion::Text => quote!(::tikly_api::Coercion::Text),
            Coercion::Bool => quote!(::tikly_api::Coercion::Bool),
            Coercion::Int => quote!(::tikly_api::Coercion::Int),
            Coercion::Duration => quote!(::tikly_api::Coercion::Duration),
        };
        quote! {
            ::tikly_api::FieldDescriptor::new(#wire, #attr, #coercion)
        }
    });

    let getters = fields.iter().enumerate().map(|(index, f)| {
        let index = Literal::usize_unsuffixed(index);
        let ident = &f.ident;
        let value = match f.coercion {
            Coercion::Text => {
                quote!(::tikly_api::Value::Text(::core::clone::Clone::clone(&self.#ident)))
            }
            Coercion::Bool => quote!(::tikly_api::Value::Bool(self.#ident)),
            Coercion::Int | Coercion::Duration => quote! {
                ::tikly_api::Value::Int(
                    <i64 as ::core::convert::TryFrom<_>>::try_from(self.#ident)
                        .unwrap_or_default(),
                )
            },
        };
        quote!(#index => ::core::option::Option::Some(#value),)
    });

    let setters = fields.iter().enumerate().map(|(index, f)| {
        let index = Literal::usize_unsuffixed(index);
        let ident = &f.ident;
        match f.coercion {
            Coercion::Text => quote! {
                (#index, ::tikly_api::Value::Text(v)) => self.#ident = v,
            },
            Coercion::Bool => quote! {
                (#index, ::tikly_api::Value::Bool(v)) => self.#ident = v,
            },
            Coercion::Int | Coercion::Duration => quote! {
                (#index, ::tikly_api::Value::Int(v)) => {
                    self.#ident = ::core::convert::TryFrom::try_from(v).unwrap_or_default();
                }
            },
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::tikly_api::Record for #name #ty_generics #where_clause {
            const FIELDS: &'static [::tikly_api::FieldDescriptor] = &[#(#descriptors),*];

            fn get(&self, index: usize) -> ::core::option::Option<::tikly_api::Value> {
                match index {
                    #(#getters)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set(&mut self, index: usize, value: ::tikly_api::Value) {
                match (index, value) {
                    #(#setters)*
                    _ => {}
                }
            }
        }
    })
}

fn parse_field(field: &syn::Field) -> syn::Result<Option<WireField>> {
    let mut wire_name = None;
    let mut duration = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                wire_name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("duration") {
                duration = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `duration`"))
            }
        })?;
    }

    let Some(wire_name) = wire_name else {
        return Ok(None);
    };

    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let coercion = match (scalar_kind(&field.ty), duration) {
        (Some(Coercion::Int), true) => Coercion::Duration,
        (Some(_), true) => {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "`duration` is only valid on integer fields",
            ));
        }
        (Some(kind), false) => kind,
        (None, _) => {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "record fields must be String, bool, or an integer type",
            ));
        }
    };

    Ok(Some(WireField {
        ident,
        wire_name,
        coercion,
    }))
}

fn scalar_kind(ty: &Type) -> Option<Coercion> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let ident = segment.ident.to_string();
    match ident.as_str() {
        "String" => Some(Coercion::Text),
        "bool" => Some(Coercion::Bool),
        other if INTEGER_TYPES.contains(&other) => Some(Coercion::Int),
        _ => None,
    }
}
