extern crate proc_macro2;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input, spanned::Spanned};

/// Derives `Parseable` for a record whose native layout is exactly its fields in declaration order.
/// Padding has to be spelled out as explicit fields (e.g. `_padding0: u32`), so that the derived
/// `SIZE` matches the native `sizeof`.
#[proc_macro_derive(Parse)]
pub fn derive_parseable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    derive_parse_internal(input).into()
}

// taken from sharnoff/derive-syn-parse: put it into a separate function for testability
pub(crate) fn derive_parse_internal(input: DeriveInput) -> TokenStream {
    let found_crate = crate_name("sceneport-files").expect("sceneport-files is present in `Cargo.toml`");

    let crate_name = match found_crate {
        FoundCrate::Itself => quote!(crate),
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(#ident)
        }
    };

    let ident = input.ident;
    let (parse_impl, size_impl) = match input.data {
        Data::Union(_) => panic!("`#[derive(Parse)]` is only available on structs: {}", ident),
        Data::Struct(s) => match s.fields {
            Fields::Named(ref fields) => {
                let recurse = fields.named.iter().map(|f| {
                    let name = &f.ident;
                    let ftype = &f.ty;
                    // The qualified form also covers array types like `[Pointer; 8]`, which can't be
                    // used as a path prefix (`[Pointer; 8]::parse` does not parse).
                    quote_spanned! {f.span()=>
                        #name: <#ftype as #crate_name::common::reader::Parseable<#ftype>>::parse(rdr)?,
                    }
                });
                let sizes = fields.named.iter().map(|f| {
                    let ftype = &f.ty;
                    quote_spanned! {f.span()=>
                        + <#ftype as #crate_name::common::reader::Parseable<#ftype>>::SIZE
                    }
                });
                (quote! { #(#recurse)* }, quote! { 0 #(#sizes)* })
            }
            _ => panic!(
                "#[derive(Parse)]` only supports named struct fields at the moment: {}",
                ident
            ),
        },
        Data::Enum(_) => panic!("`#[derive(Parse)]` is only available on structs: {}", ident),
    };

    quote!(
        impl #crate_name::common::reader::Parseable<#ident> for #ident {
            const SIZE: usize = #size_impl;

            fn parse<R: std::io::Read>(rdr: &mut R) -> Result<#ident, #crate_name::ParserError> {
                Ok(#ident{
                    #parse_impl
                })
            }
        }
    )
}
