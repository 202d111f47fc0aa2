
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
    let label = attrs::parse(&ast.attrs)?
        .label
        .unwrap_or_else(|| name.to_string());

    let mut inits = Vec::new();
    for f in attrs::named_fields(ast, "NodeEntity")? {
        let opts = attrs::parse(&f.attrs)?;
        let ident = f.ident.as_ref().expect("named field");
        let ty = &f.ty;
        let prop = opts.prop.unwrap_or_else(|| ident.to_string());
        let context = format!("{label}::{ident} (prop '{prop}')");

        if attrs::is_option(ty) {
            inits.push(quote! {
                #ident: match boltconv_core::record::node_prop(node, #prop) {
                    None => None,
                    Some(v) => <#ty as boltconv_core::traits::FromBolt>::from_bolt(v)
                        .map_err(|e| e.with_context(#context))?,
                }
            });
        } else {
            inits.push(quote! {
                #ident: {
                    let v = boltconv_core::record::node_prop(node, #prop)
                        .ok_or_else(|| boltconv_core::error::ConvertError::missing_property(#prop, #label))?;
                    <#ty as boltconv_core::traits::FromBolt>::from_bolt(v)
                        .map_err(|e| e.with_context(#context))?
                }
            });
        }
    }

    Ok(quote! {
        impl boltconv_core::traits::NodeEntity for #name {
            const LABEL: &'static str = #label;

            fn from_node(node: &neo4rs::BoltNode) -> Result<Self, boltconv_core::error::ConvertError> {
                Ok(Self {
                    #(#inits,)*
                })
            }
        }

        impl boltconv_core::traits::FromBolt for #name {
            fn from_bolt(value: neo4rs::BoltType) -> Result<Self, boltconv_core::error::ConvertError> {
                match value {
                    neo4rs::BoltType::Node(n) => <Self as boltconv_core::traits::NodeEntity>::from_node(&n),
                    other => Err(boltconv_core::error::ConvertError::type_mismatch(
                        "Node", boltconv_core::value::bolt_type_name(&other), #label,
                    )),
                }
            }
        }
    })
}
