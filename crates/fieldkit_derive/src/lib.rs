//! Derive macro for fieldkit records.
//!
//! `#[derive(Record)]` turns a named struct into a `fieldkit::Record`: a `'static` table of field
//! descriptors plus by-name read and assign dispatch. Supported attributes:
//! - `#[record(tag(json = "userId,omitempty", db = "user_id"))]` on a field: metadata annotations
//! - `#[record(embed)]` on a field: the field is itself a `Record` whose fields flatten into this one
//! - `#[record(methods(start, stop))]` on the struct: method names reported by `has_method`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Visibility, parse_macro_input};

/// Generates the `fieldkit::Record` implementation.
///
/// # Example
/// ```ignore
/// #[derive(Record, Default)]
/// #[record(methods(validate))]
/// pub struct User {
///     #[record(tag(json = "id"))]
///     pub id: i64,
///     pub name: String,
///     #[record(embed)]
///     pub audit: Audit,
///     secret: String,
/// }
///
/// // Generates (abridged):
/// impl fieldkit::Record for User {
///     fn record_name(&self) -> &'static str { "User" }
///     fn fields(&self) -> &'static [fieldkit::FieldDescriptor] { /* one entry per field */ }
///     fn field_value(&self, name: &str) -> Option<fieldkit::Value> { /* match on name */ }
///     fn assign_field(&mut self, name: &str, value: fieldkit::Value) -> Result<(), fieldkit::Value> { /* ... */ }
///     fn embedded(&self, name: &str) -> Option<&dyn fieldkit::Record> { /* "audit" */ }
///     fn embedded_mut(&mut self, name: &str) -> Option<&mut dyn fieldkit::Record> { /* "audit" */ }
///     fn methods(&self) -> &'static [&'static str] { &["validate"] }
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input).unwrap_or_else(|e| e.to_compile_error()).into()
}

#[derive(Default)]
struct FieldAttrs {
    tags: Vec<(String, String)>,
    embed: bool,
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embed") {
                out.embed = true;
                Ok(())
            } else if meta.path.is_ident("tag") {
                meta.parse_nested_meta(|tag| {
                    let key = tag
                        .path
                        .get_ident()
                        .ok_or_else(|| tag.error("expected a tag key"))?
                        .unraw()
                        .to_string();
                    let value: LitStr = tag.value()?.parse()?;
                    out.tags.push((key, value.value()));
                    Ok(())
                })
            } else {
                Err(meta.error("unsupported record field attribute, expected `embed` or `tag(...)`"))
            }
        })?;
    }
    Ok(out)
}

fn parse_struct_methods(attrs: &[Attribute]) -> syn::Result<Vec<Ident>> {
    let mut methods = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("methods") {
                meta.parse_nested_meta(|method| {
                    let ident = method
                        .path
                        .get_ident()
                        .ok_or_else(|| method.error("expected a method name"))?;
                    methods.push(ident.clone());
                    Ok(())
                })
            } else {
                Err(meta.error("unsupported record attribute, expected `methods(...)`"))
            }
        })?;
    }
    Ok(methods)
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record can only be derived for structs")),
    };

    let mut descriptors = Vec::new();
    let mut read_arms = Vec::new();
    let mut assign_arms = Vec::new();
    let mut embed_arms = Vec::new();
    let mut embed_mut_arms = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let ty = &field.ty;
        let attrs = parse_field_attrs(&field.attrs)?;
        let exported = matches!(field.vis, Visibility::Public(_));
        let tags = attrs.tags.iter().map(|(k, v)| quote!((#k, #v)));

        let field_type = if attrs.embed {
            // Token spacing from `quote` is noise in a type name ("crate :: Audit").
            let type_name = quote!(#ty).to_string().replace(' ', "");
            embed_arms.push(quote! { #field_name => Some(&self.#ident as &dyn ::fieldkit::Record) });
            embed_mut_arms.push(quote! { #field_name => Some(&mut self.#ident as &mut dyn ::fieldkit::Record) });
            quote! { ::fieldkit::FieldType::Record(#type_name) }
        } else {
            read_arms.push(quote! {
                #field_name => Some(::fieldkit::FieldValue::to_value(&self.#ident))
            });
            assign_arms.push(quote! {
                #field_name => {
                    self.#ident = <#ty as ::fieldkit::FieldValue>::from_value(value)?;
                    Ok(())
                }
            });
            quote! { <#ty as ::fieldkit::FieldValue>::FIELD_TYPE }
        };

        let embedded = attrs.embed;
        descriptors.push(quote! {
            ::fieldkit::FieldDescriptor {
                name: #field_name,
                field_type: #field_type,
                tags: &[#(#tags),*],
                exported: #exported,
                embedded: #embedded,
            }
        });
    }

    let embedded_impls = if embed_arms.is_empty() {
        quote! {}
    } else {
        quote! {
            fn embedded(&self, name: &str) -> Option<&dyn ::fieldkit::Record> {
                match name {
                    #(#embed_arms,)*
                    _ => None,
                }
            }

            fn embedded_mut(&mut self, name: &str) -> Option<&mut dyn ::fieldkit::Record> {
                match name {
                    #(#embed_mut_arms,)*
                    _ => None,
                }
            }
        }
    };

    let methods = parse_struct_methods(&input.attrs)?;
    let methods_impl = if methods.is_empty() {
        quote! {}
    } else {
        let method_names = methods.iter().map(|m| m.unraw().to_string());
        quote! {
            fn methods(&self) -> &'static [&'static str] {
                // Fails to compile when a listed method does not exist.
                let _ = (#(Self::#methods,)*);
                &[#(#method_names),*]
            }
        }
    };

    Ok(quote! {
        impl ::fieldkit::Record for #name {
            fn record_name(&self) -> &'static str {
                #name_str
            }

            fn fields(&self) -> &'static [::fieldkit::FieldDescriptor] {
                const FIELDS: &[::fieldkit::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_value(&self, name: &str) -> Option<::fieldkit::Value> {
                match name {
                    #(#read_arms,)*
                    _ => None,
                }
            }

            fn assign_field(
                &mut self,
                name: &str,
                value: ::fieldkit::Value,
            ) -> ::core::result::Result<(), ::fieldkit::Value> {
                match name {
                    #(#assign_arms,)*
                    _ => Err(value),
                }
            }

            #embedded_impls

            #methods_impl
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> syn::Result<String> {
        expand_record(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_tags_and_visibility_reach_descriptors() {
        let out = expand(parse_quote! {
            pub struct User {
                #[record(tag(json = "id,omitempty", db = "user_id"))]
                pub id: i64,
                secret: String,
            }
        })
        .unwrap();
        assert!(out.contains(r#"("json" , "id,omitempty")"#), "{out}");
        assert!(out.contains(r#"("db" , "user_id")"#), "{out}");
        assert!(out.contains("exported : true"), "{out}");
        assert!(out.contains("exported : false"), "{out}");
        assert!(!out.contains("fn embedded"), "{out}");
    }

    #[test]
    fn test_embed_generates_record_type_and_accessors() {
        let out = expand(parse_quote! {
            pub struct Account {
                #[record(embed)]
                pub audit: crate::Audit,
            }
        })
        .unwrap();
        assert!(out.contains(r#"FieldType :: Record ("crate::Audit")"#), "{out}");
        assert!(out.contains("fn embedded_mut"), "{out}");
    }

    #[test]
    fn test_raw_identifiers_are_unrawed() {
        let out = expand(parse_quote! {
            pub struct Token {
                pub r#type: String,
            }
        })
        .unwrap();
        assert!(out.contains(r#"name : "type""#), "{out}");
    }

    #[test]
    fn test_methods_attribute_lists_names() {
        let out = expand(parse_quote! {
            #[record(methods(validate, r#move))]
            pub struct Job {
                pub id: i64,
            }
        })
        .unwrap();
        assert!(out.contains(r#"& ["validate" , "move"]"#), "{out}");
    }

    #[test]
    fn test_rejects_generic_structs() {
        let err = expand(parse_quote! {
            pub struct Wrapper<T> {
                pub inner: T,
            }
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Record cannot be derived for generic structs");
    }

    #[test]
    fn test_rejects_tuple_structs_and_enums() {
        let err = expand(parse_quote! { pub struct Pair(i32, i32); }).unwrap_err();
        assert_eq!(err.to_string(), "Record can only be derived for structs with named fields");
        let err = expand(parse_quote! { pub enum Kind { A, B } }).unwrap_err();
        assert_eq!(err.to_string(), "Record can only be derived for structs");
    }

    #[test]
    fn test_rejects_unknown_field_attribute() {
        let err = expand(parse_quote! {
            pub struct User {
                #[record(rename = "x")]
                pub id: i64,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported record field attribute"), "{err}");
    }
}
