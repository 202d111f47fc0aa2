
use syn::{Attribute, Expr, ExprLit, Lit};

/// Options collected from `#[boltconv(...)]` attributes.
#[derive(Default)]
pub(crate) struct Options {
    /// `#[boltconv(flatten)]`
    pub flatten: bool,
    /// `#[boltconv(label = "...")]`
    pub label: Option<String>,
    /// `#[boltconv(column = "...")]`
    pub column: Option<String>,
    /// `#[boltconv(prop = "...")]`
    pub prop: Option<String>,
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let expr: Expr = meta.value()?.parse()?;
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Options> {
    let mut opts = Options::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("boltconv")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                opts.flatten = true;
            } else if meta.path.is_ident("label") {
                opts.label = Some(string_value(&meta)?);
            } else if meta.path.is_ident("column") {
                opts.column = Some(string_value(&meta)?);
            } else if meta.path.is_ident("prop") {
                opts.prop = Some(string_value(&meta)?);
            } else {
                return Err(meta.error("unknown boltconv attribute"));
            }
            Ok(())
        })?;
    }
    Ok(opts)
}

/// Named fields of a struct, or a spanned error naming the derive.
pub(crate) fn named_fields<'a>(
    ast: &'a syn::DeriveInput,
    derive: &str,
) -> syn::Result<Vec<&'a syn::Field>> {
    match &ast.data {
        syn::Data::Struct(s) => match &s.fields {
            syn::Fields::Named(named) => Ok(named.named.iter().collect()),
            _ => Err(syn::Error::new_spanned(
                ast,
                format!("{derive} only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(ast, format!("{derive} only supports structs"))),
    }
}

/// Syntactic check for `Option<...>` field types.
pub(crate) fn is_option(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(p) => p
            .path
            .segments
            .last()
            .map(|s| s.ident == "Option")
            .unwrap_or(false),
        _ => false,
    }
}
