use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemFn, ReturnType, Type};

const PROFILES: &[&str] = &["high_performance", "memory_efficient", "default"];

/// Expands `#[marche_runtime::main]`.
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    match expand(args, input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(args: TokenStream, input: ItemFn) -> syn::Result<TokenStream> {
    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            input.sig.fn_token,
            "#[marche_runtime::main] expects an `async fn`",
        ));
    }
    if !returns_result(&input.sig.output) {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "#[marche_runtime::main] requires a `Result` return type",
        ));
    }

    let profile = profile_constructor(args)?;
    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    Ok(quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #profile;
            let runtime = ::marche_runtime::build_runtime_with_config(&config)?;
            runtime.block_on(async #block)
        }
    })
}

fn profile_constructor(args: TokenStream) -> syn::Result<TokenStream> {
    if args.is_empty() {
        return Ok(quote! { ::marche_runtime::RuntimeConfig::default() });
    }

    let ident: syn::Ident = syn::parse2(args)?;
    if !PROFILES.contains(&ident.to_string().as_str()) {
        return Err(syn::Error::new_spanned(
            ident,
            format!("unknown runtime profile; expected one of: {}", PROFILES.join(", ")),
        ));
    }

    Ok(quote! { ::marche_runtime::RuntimeConfig::#ident() })
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn selects_requested_profile() {
        let out = expand_main(
            quote! { high_performance },
            parse_quote! { async fn main() -> anyhow::Result<()> { Ok(()) } },
        )
        .to_string();

        assert!(out.contains("high_performance"));
        assert!(out.contains("block_on"));
    }

    #[test]
    fn rejects_sync_main_and_unknown_profiles() {
        let sync = expand_main(quote! {}, parse_quote! { fn main() -> Result<(), ()> { Ok(()) } });
        assert!(sync.to_string().contains("compile_error"));

        let unknown = expand_main(
            quote! { turbo },
            parse_quote! { async fn main() -> Result<(), ()> { Ok(()) } },
        );
        assert!(unknown.to_string().contains("compile_error"));
    }
}
