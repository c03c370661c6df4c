mod utils;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, FieldsNamed};
use utils::{has_attribute, validate_attributes};

const MARKERS: &[&str] = &["key", "ignore_case", "hashed"];

/// Implement `facsimile::Equivalence` from field markers.
///
/// * `#[key]` - the field takes part in `equivalent` and `key_hash`.
/// * `#[ignore_case]` - compare and hash a `#[key]` text field case-insensitively.
/// * `#[hashed]` - the field takes part in `summed_hash`.
#[proc_macro_derive(Equivalent, attributes(key, ignore_case, hashed))]
pub fn equivalent(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let fields = match &ast.data {
        Data::Struct(syn::DataStruct {
            fields: Fields::Named(FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => {
            return syn::Error::new_spanned(
                &ast.ident,
                "can only derive on a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let FieldTokens {
        comparisons,
        key_hashes,
        hashed,
    } = match process_fields(&ast, fields.iter()) {
        Ok(v) => v,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::facsimile::Equivalence for #name #ty_generics #where_clause {
            fn equivalent(&self, other: &Self) -> bool {
                true #(&& #comparisons)*
            }

            fn summed_hash(&self) -> i32 {
                0i32 #(.wrapping_add(::facsimile::ContentHash::content_hash(&self.#hashed)))*
            }

            fn key_hash<__H: ::std::hash::Hasher>(&self, state: &mut __H) {
                #(#key_hashes;)*
            }
        }
    };

    expanded.into()
}

struct FieldTokens {
    comparisons: Vec<proc_macro2::TokenStream>,
    key_hashes: Vec<proc_macro2::TokenStream>,
    hashed: Vec<syn::Ident>,
}

/// Process fields and decide what should be generated for each field.
fn process_fields<'a>(
    ast: &DeriveInput,
    fields: impl Iterator<Item = &'a Field>,
) -> syn::Result<FieldTokens> {
    let mut comparisons = vec![];
    let mut key_hashes = vec![];
    let mut hashed = vec![];

    for field in fields {
        validate_attributes(&field.attrs, MARKERS)?;

        // Named fields always carry an ident.
        let field_name = match &field.ident {
            Some(ident) => ident,
            None => continue,
        };

        let is_key = has_attribute(&field.attrs, "key").is_some();

        if let Some(attr) = has_attribute(&field.attrs, "ignore_case") {
            if !is_key {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`ignore_case` only applies to a `key` field",
                ));
            }

            comparisons.push(quote! {
                ::facsimile::equivalence::eq_ignore_case(&self.#field_name, &other.#field_name)
            });
            key_hashes.push(quote! {
                ::facsimile::equivalence::hash_ignore_case(&self.#field_name, state)
            });
        } else if is_key {
            comparisons.push(quote! { self.#field_name == other.#field_name });
            key_hashes.push(quote! {
                ::std::hash::Hash::hash(&self.#field_name, state)
            });
        }

        if has_attribute(&field.attrs, "hashed").is_some() {
            hashed.push(field_name.clone());
        }
    }

    if comparisons.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "at least one field must be marked `#[key]`",
        ));
    }

    Ok(FieldTokens {
        comparisons,
        key_hashes,
        hashed,
    })
}
