//! Derive macro implementation for automatic Fuzzable trait derivation
//!
//! Structs get a composite type descriptor: by default one constructor, the
//! struct literal, taking one argument per field. Container attributes swap
//! that for explicit constructors or for default construction plus setters.
//! Enums get one variant builder per declared variant.

use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, GenericParam, Ident, Index, LitInt, LitStr,
    Member, Result, Type, Variant, parse_macro_input, parse_quote,
};

/// Main entry point for the Fuzzable derive macro
pub fn derive_fuzzable_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_fuzzable_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Options read from `#[fuzz(...)]` on the type itself
#[derive(Default)]
struct ContainerOptions {
    setters: bool,
    constructors: Vec<DeclaredConstructor>,
}

/// `#[fuzz(constructor(path = "...", arity = N, fallible))]`
struct DeclaredConstructor {
    path: syn::Path,
    arity: usize,
    fallible: bool,
}

/// One field of a struct or variant
struct FieldSpec {
    member: Member,
    ty: Type,
    skip: bool,
}

impl FieldSpec {
    fn label(&self) -> String {
        match &self.member {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(index) => index.index.to_string(),
        }
    }
}

/// Generate the Fuzzable implementation for the given input
fn generate_fuzzable_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(Error::new_spanned(
            lifetime,
            "Fuzzable cannot be derived for types with lifetime parameters",
        ));
    }

    let mut generics = input.generics.clone();
    add_trait_bounds(&mut generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (shape_body, degraded_body) = match &input.data {
        Data::Struct(data_struct) => {
            let options = parse_container_attributes(&input.attrs)?;
            let fields = field_specs(&data_struct.fields)?;
            (
                generate_struct_shape(name, &data_struct.fields, &fields, &options),
                generate_struct_degraded(&data_struct.fields, &fields, &options),
            )
        }
        Data::Enum(data_enum) => {
            reject_container_attributes(&input.attrs)?;
            let variants: Vec<&Variant> = data_enum.variants.iter().collect();
            (
                generate_enum_shape(name, &variants)?,
                generate_enum_degraded(name, &variants)?,
            )
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Fuzzable derive is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::variety::Fuzzable for #name #ty_generics #where_clause {
            fn shape() -> ::variety::TypeShape<Self> {
                #shape_body
            }

            fn degraded() -> Self {
                #degraded_body
            }
        }
    })
}

/// Add the Fuzzable bound to every type parameter
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::variety::Fuzzable));
        }
    }
}

/// Parse `#[fuzz(setters)]` and `#[fuzz(constructor(...))]`
fn parse_container_attributes(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("fuzz")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("setters") {
                options.setters = true;
                Ok(())
            } else if meta.path.is_ident("constructor") {
                options.constructors.push(parse_constructor(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported fuzz attribute, expected `setters` or `constructor(...)`"))
            }
        })?;
    }

    Ok(options)
}

fn parse_constructor(meta: &ParseNestedMeta<'_>) -> Result<DeclaredConstructor> {
    let mut path = None;
    let mut arity = None;
    let mut fallible = false;

    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("path") {
            let lit: LitStr = inner.value()?.parse()?;
            path = Some(lit.parse::<syn::Path>()?);
        } else if inner.path.is_ident("arity") {
            let lit: LitInt = inner.value()?.parse()?;
            arity = Some(lit.base10_parse::<usize>()?);
        } else if inner.path.is_ident("fallible") {
            fallible = true;
        } else {
            return Err(inner.error("expected `path`, `arity` or `fallible`"));
        }
        Ok(())
    })?;

    Ok(DeclaredConstructor {
        path: path.ok_or_else(|| meta.error("constructor requires `path = \"...\"`"))?,
        arity: arity.ok_or_else(|| meta.error("constructor requires `arity = N`"))?,
        fallible,
    })
}

fn reject_container_attributes(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("fuzz")) {
        Some(attr) => Err(Error::new_spanned(
            attr,
            "container fuzz attributes are only supported on structs",
        )),
        None => Ok(()),
    }
}

/// Whether a field carries `#[fuzz(skip)]`
fn is_skipped(attrs: &[Attribute]) -> Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("fuzz")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn field_specs(fields: &Fields) -> Result<Vec<FieldSpec>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(index)),
            };
            Ok(FieldSpec {
                member,
                ty: field.ty.clone(),
                skip: is_skipped(&field.attrs)?,
            })
        })
        .collect()
}

/// Build `path { a: .., b: .. }`, `path(.., ..)` or `path` depending on the field kind
fn build_literal<F>(path: TokenStream, kind: &Fields, fields: &[FieldSpec], value: F) -> TokenStream
where
    F: Fn(&FieldSpec) -> TokenStream,
{
    match kind {
        Fields::Named(_) => {
            let inits = fields.iter().map(|field| {
                let member = &field.member;
                let init = value(field);
                quote! { #member: #init }
            });
            quote! { #path { #(#inits),* } }
        }
        Fields::Unnamed(_) => {
            let values = fields.iter().map(&value);
            quote! { #path( #(#values),* ) }
        }
        Fields::Unit => quote! { #path },
    }
}

fn fuzzed_value(field: &FieldSpec, graph: &Ident) -> TokenStream {
    let ty = &field.ty;
    if field.skip {
        quote! { ::core::default::Default::default() }
    } else {
        quote! { #graph.fuzz::<#ty>() }
    }
}

fn degraded_value(field: &FieldSpec) -> TokenStream {
    let ty = &field.ty;
    if field.skip {
        quote! { ::core::default::Default::default() }
    } else {
        quote! { <#ty as ::variety::Fuzzable>::degraded() }
    }
}

/// Closure parameter, underscored when the body never fuzzes anything
fn graph_ident(used: bool) -> Ident {
    if used {
        parse_quote!(graph)
    } else {
        parse_quote!(_graph)
    }
}

/// Generate the composite shape of a struct
fn generate_struct_shape(
    name: &Ident,
    kind: &Fields,
    fields: &[FieldSpec],
    options: &ContainerOptions,
) -> TokenStream {
    let type_name = name.to_string();
    let mut members = Vec::new();

    for declared in &options.constructors {
        members.push(declared_constructor(declared));
    }

    if options.setters {
        members.push(quote! {
            .constructor(0usize, |_graph| {
                ::core::result::Result::Ok::<Self, ::core::convert::Infallible>(
                    <Self as ::core::default::Default>::default(),
                )
            })
        });
        for field in fields.iter().filter(|field| !field.skip) {
            let member = &field.member;
            let ty = &field.ty;
            let label = field.label();
            members.push(quote! {
                .setter(#label, |instance, graph| {
                    instance.#member = graph.fuzz::<#ty>();
                })
            });
        }
    } else if options.constructors.is_empty() {
        let arity = fields.iter().filter(|field| !field.skip).count();
        let graph = graph_ident(arity > 0);
        let literal = build_literal(quote! { Self }, kind, fields, |field| {
            fuzzed_value(field, &graph)
        });
        members.push(quote! {
            .constructor(#arity, |#graph| {
                ::core::result::Result::Ok::<Self, ::core::convert::Infallible>(#literal)
            })
        });
    }

    quote! {
        ::variety::TypeShape::Composite(
            ::variety::TypeDescriptor::<Self>::new(#type_name)
                #(#members)*
        )
    }
}

fn declared_constructor(declared: &DeclaredConstructor) -> TokenStream {
    let path = &declared.path;
    let arity = declared.arity;
    let graph = graph_ident(arity > 0);
    let arguments = (0..arity).map(|_| quote! { #graph.fuzz() });
    let call = quote! { #path( #(#arguments),* ) };

    if declared.fallible {
        quote! {
            .constructor(#arity, |#graph| #call)
        }
    } else {
        quote! {
            .constructor(#arity, |#graph| {
                ::core::result::Result::Ok::<Self, ::core::convert::Infallible>(#call)
            })
        }
    }
}

fn generate_struct_degraded(
    kind: &Fields,
    fields: &[FieldSpec],
    options: &ContainerOptions,
) -> TokenStream {
    if options.setters {
        quote! { <Self as ::core::default::Default>::default() }
    } else {
        build_literal(quote! { Self }, kind, fields, degraded_value)
    }
}

/// Generate the enumeration shape of an enum
fn generate_enum_shape(name: &Ident, variants: &[&Variant]) -> Result<TokenStream> {
    if variants.is_empty() {
        return Err(Error::new_spanned(
            name,
            "Cannot derive Fuzzable for empty enum",
        ));
    }

    let builders = variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;
            let label = variant_name.to_string();
            let fields = field_specs(&variant.fields)?;
            let graph = graph_ident(fields.iter().any(|field| !field.skip));
            let literal = build_literal(
                quote! { Self::#variant_name },
                &variant.fields,
                &fields,
                |field| fuzzed_value(field, &graph),
            );

            Ok(quote! {
                ::variety::Variant::new(#label, |#graph| #literal)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        ::variety::TypeShape::Enumeration(::std::vec![
            #(#builders),*
        ])
    })
}

/// The first declared variant, with degraded fields
fn generate_enum_degraded(name: &Ident, variants: &[&Variant]) -> Result<TokenStream> {
    let first = variants.first().ok_or_else(|| {
        Error::new_spanned(name, "Cannot derive Fuzzable for empty enum")
    })?;
    let variant_name = &first.ident;
    let fields = field_specs(&first.fields)?;

    Ok(build_literal(
        quote! { Self::#variant_name },
        &first.fields,
        &fields,
        degraded_value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> String {
        generate_fuzzable_impl(&input).unwrap().to_string()
    }

    #[test]
    fn test_add_trait_bounds() {
        let mut generics: syn::Generics = parse_quote! { <T, U> };
        add_trait_bounds(&mut generics);

        for param in &generics.params {
            if let GenericParam::Type(type_param) = param {
                assert_eq!(type_param.bounds.len(), 1);
            }
        }
    }

    #[test]
    fn test_struct_literal_constructor() {
        let output = expand(parse_quote! {
            struct Order {
                id: u32,
                lines: Vec<String>,
            }
        });

        assert!(output.contains("TypeDescriptor :: < Self > :: new (\"Order\")"));
        assert!(output.contains("2usize"));
        assert!(output.contains("graph . fuzz :: < u32 > ()"));
        assert!(output.contains("< Vec < String > as :: variety :: Fuzzable > :: degraded ()"));
    }

    #[test]
    fn test_unit_struct_ignores_graph() {
        let output = expand(parse_quote! {
            struct Marker;
        });

        assert!(output.contains("0usize"));
        assert!(output.contains("_graph"));
    }

    #[test]
    fn test_container_attributes() {
        let input: DeriveInput = parse_quote! {
            #[fuzz(setters)]
            #[fuzz(constructor(path = "Self::try_new", arity = 2, fallible))]
            struct Money {
                amount: i64,
                currency: String,
            }
        };

        let options = parse_container_attributes(&input.attrs).unwrap();
        assert!(options.setters);
        assert_eq!(options.constructors.len(), 1);
        assert_eq!(options.constructors[0].arity, 2);
        assert!(options.constructors[0].fallible);
    }

    #[test]
    fn test_constructor_requires_arity() {
        let input: DeriveInput = parse_quote! {
            #[fuzz(constructor(path = "Self::new"))]
            struct Money {
                amount: i64,
            }
        };

        assert!(parse_container_attributes(&input.attrs).is_err());
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let input: DeriveInput = parse_quote! {
            #[fuzz(unique)]
            struct Money {
                amount: i64,
            }
        };

        assert!(parse_container_attributes(&input.attrs).is_err());
    }

    #[test]
    fn test_setters_skip_marked_fields() {
        let output = expand(parse_quote! {
            #[fuzz(setters)]
            struct Account {
                owner: String,
                #[fuzz(skip)]
                balance: i64,
            }
        });

        assert!(output.contains("setter (\"owner\""));
        assert!(!output.contains("setter (\"balance\""));
    }

    #[test]
    fn test_skipped_fields_use_default() {
        let input: DeriveInput = parse_quote! {
            struct Account {
                owner: String,
                #[fuzz(skip)]
                balance: i64,
            }
        };
        let Data::Struct(data) = &input.data else {
            panic!("expected a struct");
        };
        let fields = field_specs(&data.fields).unwrap();

        assert!(!fields[0].skip);
        assert!(fields[1].skip);
        assert!(expand(input).contains("1usize"));
    }

    #[test]
    fn test_enum_variants() {
        let output = expand(parse_quote! {
            enum Shape {
                Empty,
                Circle(f64),
                Rect { width: f64, height: f64 },
            }
        });

        assert!(output.contains("TypeShape :: Enumeration"));
        assert!(output.contains("Variant :: new (\"Empty\""));
        assert!(output.contains("Variant :: new (\"Rect\""));
        assert!(output.contains("fn degraded () -> Self { Self :: Empty }"));
    }

    #[test]
    fn test_rejected_inputs() {
        let empty: DeriveInput = parse_quote! { enum Never {} };
        assert!(generate_fuzzable_impl(&empty).is_err());

        let borrowed: DeriveInput = parse_quote! { struct View<'a> { text: &'a str } };
        assert!(generate_fuzzable_impl(&borrowed).is_err());

        let union: DeriveInput = parse_quote! { union Bits { a: u32, b: f32 } };
        assert!(generate_fuzzable_impl(&union).is_err());
    }
}
