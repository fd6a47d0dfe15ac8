use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, LitStr};

/// Register a tower operation under a name so it can be called through
/// `numtower_runtime::call_builtin`.
///
/// The function must take one or two `NumberValue` arguments by value and
/// return a `NumberValue`.
///
/// ```rust,ignore
/// #[tower_builtin(name = "sqrt")]
/// pub fn sqrt(value: NumberValue) -> NumberValue {
///     /* implementation */
/// }
/// ```
#[proc_macro_attribute]
pub fn tower_builtin(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut name: Option<LitStr> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported tower_builtin argument"))
        }
    });
    parse_macro_input!(args with parser);

    let func = parse_macro_input!(input as ItemFn);
    let ident = &func.sig.ident;

    let name = match name {
        Some(name) => name,
        None => {
            return syn::Error::new(Span::call_site(), "expected `name = \"...\"` argument")
                .to_compile_error()
                .into()
        }
    };

    if let Some(receiver) = func
        .sig
        .inputs
        .iter()
        .find(|arg| matches!(arg, FnArg::Receiver(_)))
    {
        return syn::Error::new_spanned(receiver, "tower builtins cannot take `self`")
            .to_compile_error()
            .into();
    }

    let function = match func.sig.inputs.len() {
        1 => quote!(::numtower_runtime::dispatcher::BuiltinFunction::Unary(#ident)),
        2 => quote!(::numtower_runtime::dispatcher::BuiltinFunction::Binary(#ident)),
        n => {
            return syn::Error::new_spanned(
                &func.sig.inputs,
                format!("tower builtins take one or two arguments, found {n}"),
            )
            .to_compile_error()
            .into()
        }
    };

    let register = quote! {
        const _: () = {
            ::numtower_runtime::inventory::submit! {
                ::numtower_runtime::dispatcher::Builtin {
                    name: #name,
                    function: #function,
                }
            }
        };
    };

    TokenStream::from(quote! {
        #func
        #register
    })
}
