//! Code generation for `#[derive(Listable)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_list_attrs, FieldKind};

pub fn listable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Listable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Listable can only be derived for structs",
            ))
        }
    };

    let mut arms: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_list_attrs(&field.attrs)?;
        let kind = match attr.kind {
            Some(kind) if !attr.skip => kind,
            _ => continue,
        };

        let name = attr.rename.unwrap_or_else(|| ident.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&name));
        constants.push(quote! {
            /// Field name for list search, filters and sorting.
            pub const #const_name: &'static str = #name;
        });

        let value = if option_inner(&field.ty).is_some() {
            let inner = value_expr(kind, quote! { __value });
            quote! {
                match &self.#ident {
                    ::core::option::Option::Some(__value) => #inner,
                    ::core::option::Option::None => ::roster::Value::None,
                }
            }
        } else {
            value_expr(kind, quote! { &self.#ident })
        };

        arms.push(quote! { #name => #value, });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::roster::Listable for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::roster::Value<'_> {
                match field {
                    #(#arms)*
                    _ => ::roster::Value::None,
                }
            }
        }
    })
}

/// Builds a `Value` from an expression that evaluates to `&FieldType`.
fn value_expr(kind: FieldKind, reference: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! { ::roster::Value::String(#reference) },
        FieldKind::Number => {
            quote! { ::roster::Value::Number(::roster::Number::from(*#reference)) }
        }
        FieldKind::Timestamp => quote! {
            ::roster::Value::Timestamp(::roster::ListTimestamp::list_timestamp(#reference))
        },
        FieldKind::Enum => quote! {
            ::roster::Value::Enum(::roster::ListEnum::list_discriminant(#reference))
        },
        FieldKind::Bool => quote! { ::roster::Value::Bool(*#reference) },
    }
}

/// Returns `T` for a field declared as `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn to_screaming_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c);
            prev_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            out.push('_');
            prev_lower = false;
        } else {
            out.push(c.to_ascii_uppercase());
            prev_lower = true;
        }
    }

    out
}
