#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates:
//!
//! * [`macro@marche_error`] wires a domain error enum (derives, context trait, conversions).
//! * [`macro@api_model`] and [`macro@api_handler`] keep DTOs and handlers consistent with `OpenAPI`.
//! * [`macro@main`] boots the tuned Tokio runtime from `marche-runtime`.
//!
//! Examples are marked `ignore` here; the macros are exercised from the consuming crates.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a blocking `fn main` running on a `marche-runtime` profile.
///
/// Accepted profiles: `high_performance`, `memory_efficient`, `default` (or no argument).
/// The function must return a `Result`, since runtime construction itself can fail.
///
/// ```rust,ignore
/// #[marche_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares an API data model.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, `utoipa::ToSchema` under the
/// `server` feature of the consuming crate, and a `camelCase` rename policy unless
/// `rename_all = "..."` says otherwise.
///
/// ```rust,ignore
/// #[marche_derive::api_model(rename_all = "snake_case")]
/// pub struct HealthResponse {
///     pub status: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Declares an Axum handler documented through `utoipa::path`.
///
/// The arguments are forwarded verbatim to `utoipa::path` when the consuming crate
/// builds with its `server` feature.
///
/// ```rust,ignore
/// #[marche_derive::api_handler(get, path = "/health", responses((status = OK)))]
/// pub async fn health_handler() -> &'static str {
///     "up"
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a domain error enum.
///
/// Every variant must use named fields. A variant carrying an upstream error names it
/// `source` (or marks it `#[source]`/`#[from]`) and must also have a
/// `context: Option<Cow<'static, str>>` field.
///
/// Generated items:
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to `Result<T, Source>`.
/// * `From<Source>` for each source-carrying variant.
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// ```rust,ignore
/// #[marche_derive::marche_error]
/// pub enum AssetError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn marche_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
