//! Parsing of `#[list(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

const EXPECTED_KINDS: &str = "String, Number, Timestamp, Enum, Bool";

/// How a field is exposed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[list(String)]`
    String,
    /// `#[list(Number)]`
    Number,
    /// `#[list(Timestamp)]`
    Timestamp,
    /// `#[list(Enum)]`
    Enum,
    /// `#[list(Bool)]`
    Bool,
}

impl FieldKind {
    fn parse_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Timestamp" | "timestamp" => Ok(FieldKind::Timestamp),
            "Enum" | "enum" | "enumeration" => Ok(FieldKind::Enum),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            other => Err(Error::new(
                span,
                format!("unknown list field kind '{other}'. Expected one of: {EXPECTED_KINDS}"),
            )),
        }
    }

    fn from_ident(ident: &Ident) -> Result<Self> {
        Self::parse_name(&ident.to_string(), ident.span())
    }
}

/// Parsed `#[list(...)]` attribute.
#[derive(Debug, Clone, Default)]
pub struct ListAttr {
    pub kind: Option<FieldKind>,
    pub skip: bool,
    pub rename: Option<String>,
}

fn string_literal(expr: &syn::Expr, what: &str) -> Result<syn::LitStr> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{what} must be a string literal"),
        )),
    }
}

impl Parse for ListAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ListAttr::default();
        let items: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in items {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) => {
                    let ident = p.get_ident().ok_or_else(|| {
                        Error::new(p.span(), format!("expected {EXPECTED_KINDS}, or skip"))
                    })?;
                    attr.kind = Some(FieldKind::from_ident(ident)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_literal(&nv.value, "rename")?.value());
                }
                // ty = "enum" for kinds spelled as keywords
                Meta::NameValue(nv) if nv.path.is_ident("ty") => {
                    let lit = string_literal(&nv.value, "ty")?;
                    attr.kind = Some(FieldKind::parse_name(&lit.value(), lit.span())?);
                }
                Meta::NameValue(nv) => {
                    return Err(Error::new(
                        nv.path.span(),
                        "unknown attribute. Expected: rename or ty",
                    ));
                }
                Meta::List(list) => {
                    return Err(Error::new(
                        list.span(),
                        "unexpected nested list in #[list(...)]",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Reads the `#[list(...)]` attribute of a field, if any.
pub fn parse_list_attrs(attrs: &[Attribute]) -> Result<ListAttr> {
    match attrs.iter().find(|a| a.path().is_ident("list")) {
        Some(attr) => attr.parse_args::<ListAttr>(),
        None => Ok(ListAttr::default()),
    }
}
