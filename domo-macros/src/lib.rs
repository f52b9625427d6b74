use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Error, Expr, ExprLit, Field, Fields, Ident, Lit, LitStr, Meta, Result, Token,
    Type, Visibility, parse::Parse, parse::ParseStream, parse_macro_input,
};

mod parsed;

use parsed::ParsedRecord;

/// Derives `domo::Record` and `domo::Reflect` for a struct with named fields.
///
/// Field attributes:
/// - `#[domo("name,LONG,omitempty")]` or `#[domo = "..."]`: tag string
///   (column names, a column type, `omitempty`, or a sole `-` to exclude)
/// - `#[domo(embed)]`: flatten the field's record without a column of its own
/// - `#[domo(tag = "...", embed)]`: both
///
/// Only non-private fields produce columns.
#[proc_macro_derive(DomoRecord, attributes(domo))]
pub fn derive_domo_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
