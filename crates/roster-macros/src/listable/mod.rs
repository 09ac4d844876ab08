//! Implementation of `#[derive(Listable)]`.
//!
//! Generates the `Listable` field accessor and field-name constants from
//! `#[list(...)]` annotations.

mod attrs;
mod derive;

pub use derive::listable_derive_impl;
