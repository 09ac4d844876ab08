//! Proc macros for Roster.
//!
//! - [`Listable`] - Generate field accessors and field-name constants for list views

mod listable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `roster::Listable` for a struct with named fields.
///
/// Only annotated fields are exposed; everything else reads as
/// `Value::None`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | String field (`String`, `&str`) |
/// | `Number` | Any primitive integer or float |
/// | `Timestamp` | Type implementing `ListTimestamp` |
/// | `Enum` | Type implementing `ListEnum` |
/// | `Bool` | Boolean field |
/// | `ty = "..."` | Kind given as a string, for `bool` / `enum` spellings |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Expose the field under another name |
///
/// `Option<T>` fields read as `Value::None` when empty, which the engine
/// sorts as the zero value of the field's kind.
///
/// # Generated Code
///
/// 1. A `pub const` per exposed field (e.g. `Channel::NAME`)
/// 2. `impl roster::Listable`
///
/// # Example
///
/// ```ignore
/// use roster::{ListEnum, Listable};
///
/// #[derive(Clone, Copy)]
/// enum Kind { Whatsapp, Email }
///
/// impl ListEnum for Kind {
///     fn list_discriminant(&self) -> u32 {
///         match self { Kind::Whatsapp => 0, Kind::Email => 1 }
///     }
/// }
///
/// #[derive(Listable)]
/// struct Channel {
///     #[list(Number)]
///     id: u32,
///     #[list(String)]
///     name: String,
///     #[list(Enum)]
///     kind: Kind,
///     #[list(String, rename = "phone")]
///     phone_number: Option<String>,
///     #[list(skip)]
///     token: String,
/// }
/// ```
#[proc_macro_derive(Listable, attributes(list))]
pub fn listable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    listable::listable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
