//! Compile-time validation for `scanfmt` format strings.
//!
//! `scanfmt::format::parse` is also called at runtime by [`scanfmt::scan`],
//! so the grammar it accepts is authoritative; this crate just calls it a
//! second time, at compile time, over a string literal, and turns a parse
//! failure into a `compile_error!` that points at the literal instead of
//! into the library's internals.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, LitStr};

/// Validates a `scanfmt` format string at compile time and expands to the
/// literal itself.
///
/// ```ignore
/// let fmt = checked_format!("{:d} {:.2f}");
/// let Scanned { value: (n, x), .. } = scanfmt::scan::<(i32, f64)>("3 2.50", fmt)?;
/// ```
///
/// A malformed format string — unbalanced braces, an unknown presentation
/// letter, mixing automatic and explicit argument ids, and so on — is
/// rejected here, at the call site, rather than surfacing as a runtime
/// [`scanfmt::Error`].
#[proc_macro]
pub fn checked_format(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    let text = lit.value();

    match scanfmt::format::parse(&text) {
        Ok(_) => quote! { #lit }.into(),
        Err(err) => {
            let message = format!("invalid scanfmt format string: {err}");
            syn::Error::new(lit.span(), message)
                .to_compile_error()
                .into()
        }
    }
}
