use super::derived_trait_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, Token};

const DEFAULT_RENAME: &str = "camelCase";

#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]`: serde derives, optional `ToSchema`, and the rename policy.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match expand_model(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand_model(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_model_args(args)?;
    let present = derived_trait_names(&input.attrs);

    let derives: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ]
    .into_iter()
    .filter(|(name, _)| !present.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();

    let derive_attr = if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } };
    let schema_attr = if present.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = args.rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));
    let rename_attr = match existing_rename(&input.attrs)? {
        Some(existing) if existing.value() != rename.value() => {
            return Err(syn::Error::new_spanned(
                existing,
                "conflicting serde rename_all; drop it or pass the same value to api_model",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };
    let deny_attr =
        if args.deny_unknown_fields { quote! { #[serde(deny_unknown_fields)] } } else { quote! {} };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands `#[api_handler]`: forwards the arguments to `utoipa::path` under the `server` feature.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        match meta {
            Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                if parsed.rename_all.is_some() {
                    return Err(syn::Error::new_spanned(nv, "duplicate rename_all"));
                }
                let Expr::Lit(expr) = &nv.value else {
                    return Err(syn::Error::new_spanned(nv.value, "rename_all expects a string"));
                };
                let Lit::Str(lit) = &expr.lit else {
                    return Err(syn::Error::new_spanned(&expr.lit, "rename_all expects a string"));
                };
                parsed.rename_all = Some(lit.clone());
            },
            Meta::Path(path) if path.is_ident("deny_unknown_fields") => {
                parsed.deny_unknown_fields = true;
            },
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected `rename_all = \"...\"` or `deny_unknown_fields`",
                ));
            },
        }
    }

    Ok(parsed)
}

fn existing_rename(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found = Some(meta.value()?.parse::<LitStr>()?);
            } else if meta.input.peek(Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn model_gets_default_rename_and_derives() {
        let out = expand_api_model(quote! {}, parse_quote! { pub struct Props { pub product_id: String } })
            .to_string();

        assert!(out.contains("camelCase"));
        assert!(out.contains("Serialize"));
        assert!(out.contains("ToSchema"));
        assert!(!out.contains("deny_unknown_fields"));
    }

    #[test]
    fn model_honours_arguments() {
        let out = expand_api_model(
            quote! { rename_all = "snake_case", deny_unknown_fields },
            parse_quote! { pub struct Health { pub status: String } },
        )
        .to_string();

        assert!(out.contains("snake_case"));
        assert!(out.contains("deny_unknown_fields"));
    }

    #[test]
    fn model_rejects_conflicting_rename() {
        let out = expand_api_model(
            quote! {},
            parse_quote! {
                #[serde(rename_all = "snake_case")]
                pub struct Health { pub status: String }
            },
        )
        .to_string();

        assert!(out.contains("compile_error"));
    }

    #[test]
    fn handler_is_wrapped_with_path_attribute() {
        let out = expand_api_handler(
            quote! { get, path = "/health" },
            parse_quote! { pub async fn health() -> &'static str { "up" } },
        )
        .to_string();

        assert!(out.contains("utoipa :: path"));
        assert!(out.contains("unused_async"));
    }
}
