//! Attribute parsing for the `#[derive(McpSchema)]` macro.
//!
//! Hand-rolled `syn`-based parsing, the same way the rest of this workspace's
//! macro layer is grounded — no `darling`. A `#[schema(...)]` attribute is a
//! comma-separated list of items, each either a bare flag (`required`) or a
//! `name = value` pair (`min = 10`).

use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, Lit, Token};

/// One parsed `#[schema(...)]` item, before it's folded into [`SchemaFieldAttrs`].
enum SchemaItem {
    Flag(Ident),
    KeyValue(Ident, Expr),
}

impl Parse for SchemaItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // `type` is a Rust keyword but a legal schema key, so accept raw
        // identifiers (`Ident::parse_any`) rather than `Ident::parse`.
        let name = Ident::parse_any(input)?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            Ok(SchemaItem::KeyValue(name, value))
        } else {
            Ok(SchemaItem::Flag(name))
        }
    }
}

struct SchemaArgs {
    items: Vec<SchemaItem>,
}

impl Parse for SchemaArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let items = Punctuated::<SchemaItem, Token![,]>::parse_terminated(input)?
            .into_iter()
            .collect();
        Ok(SchemaArgs { items })
    }
}

/// A field's parsed `#[schema(...)]` attribute, folded across every
/// occurrence (normally just one).
#[derive(Debug, Default)]
pub struct SchemaFieldAttrs {
    pub required: bool,
    pub description: Option<String>,
    pub default: Option<Expr>,
    pub format: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub values: Option<Vec<Expr>>,
    pub type_hint: Option<(String, proc_macro2::Span)>,
}

impl SchemaFieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("schema") {
                continue;
            }
            let args: SchemaArgs = attr.parse_args()?;
            for item in args.items {
                result.apply(item)?;
            }
        }
        Ok(result)
    }

    fn apply(&mut self, item: SchemaItem) -> syn::Result<()> {
        match item {
            SchemaItem::Flag(name) => {
                if name == "required" {
                    self.required = true;
                    Ok(())
                } else {
                    Err(syn::Error::new_spanned(&name, format!("unknown schema attribute `{name}`")))
                }
            }
            SchemaItem::KeyValue(name, value) => {
                let key = name.to_string();
                match key.as_str() {
                    "description" => {
                        self.description = Some(expect_str(&value)?);
                    }
                    "default" => {
                        self.default = Some(value);
                    }
                    "format" => {
                        self.format = Some(expect_str(&value)?);
                    }
                    "min" => {
                        self.min = Some(expect_number(&value)?);
                    }
                    "max" => {
                        self.max = Some(expect_number(&value)?);
                    }
                    "min_length" => {
                        self.min_length = Some(expect_number(&value)? as usize);
                    }
                    "max_length" => {
                        self.max_length = Some(expect_number(&value)? as usize);
                    }
                    "values" => {
                        self.values = Some(expect_array(&value)?);
                    }
                    "type" => {
                        self.type_hint = Some((expect_str(&value)?, name.span()));
                    }
                    _ => {
                        return Err(syn::Error::new_spanned(&name, format!("unknown schema attribute `{key}`")));
                    }
                }
                Ok(())
            }
        }
    }
}

fn expect_str(value: &Expr) -> syn::Result<String> {
    if let Expr::Lit(lit) = value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn expect_number(value: &Expr) -> syn::Result<f64> {
    if let Expr::Lit(lit) = value {
        match &lit.lit {
            Lit::Int(i) => return i.base10_parse::<f64>(),
            Lit::Float(f) => return f.base10_parse::<f64>(),
            _ => {}
        }
    }
    Err(syn::Error::new_spanned(value, "expected a numeric literal"))
}

fn expect_array(value: &Expr) -> syn::Result<Vec<Expr>> {
    if let Expr::Array(array) = value {
        return Ok(array.elems.iter().cloned().collect());
    }
    Err(syn::Error::new_spanned(value, "expected an array literal, e.g. `[\"a\", \"b\"]`"))
}
