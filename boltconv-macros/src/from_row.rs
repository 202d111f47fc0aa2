
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attrs;

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match derive(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &ast.ident;
    let struct_name = name.to_string();
    let mut inits = Vec::new();

    for f in attrs::named_fields(ast, "FromRow")? {
        let opts = attrs::parse(&f.attrs)?;
        let ident = f.ident.as_ref().expect("named field");
        let ty = &f.ty;

        if opts.flatten {
            inits.push(quote! {
                #ident: <#ty as boltconv_core::traits::FromRow>::from_row(row)?
            });
            continue;
        }

        let column = opts.column.unwrap_or_else(|| ident.to_string());
        let context = format!("{struct_name}::{ident}");

        if attrs::is_option(ty) {
            inits.push(quote! {
                #ident: match boltconv_core::record::get_value(row, #column) {
                    None => None,
                    Some(v) => <#ty as boltconv_core::traits::FromBolt>::from_bolt(v)
                        .map_err(|e| e.with_context(#context))?,
                }
            });
        } else {
            inits.push(quote! {
                #ident: {
                    let v = boltconv_core::record::get_value(row, #column)
                        .ok_or_else(|| boltconv_core::error::ConvertError::missing_field(#column, #struct_name))?;
                    <#ty as boltconv_core::traits::FromBolt>::from_bolt(v)
                        .map_err(|e| e.with_context(#context))?
                }
            });
        }
    }

    Ok(quote! {
        impl boltconv_core::traits::FromRow for #name {
            fn from_row(row: &neo4rs::Row) -> Result<Self, boltconv_core::error::ConvertError> {
                Ok(Self {
                    #(#inits,)*
                })
            }
        }
    })
}
