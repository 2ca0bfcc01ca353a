use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;

use syn::ext::IdentExt as _;
use syn::spanned::Spanned as _;
use syn::{Attribute, Data, DeriveInput, Error, GenericArgument, PathArguments, Type};

const INJECT_ATTR: &str = "inject";

enum InjectTag {
    Type,
    Name,
}

fn extract_option_type(ty: &Type) -> Option<Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner.clone());
    }
    None
}

fn extract_inject_tag(attrs: &[Attribute]) -> Result<Option<InjectTag>, Error> {
    let mut found = None;
    for attr in attrs {
        if !attr.path().is_ident(INJECT_ATTR) {
            continue;
        }
        if found.is_some() {
            return Err(Error::new(
                attr.span(),
                format!("Duplicate #[{INJECT_ATTR}] attribute"),
            ));
        }
        let meta_list = attr.meta.require_list()?;
        let tag = meta_list.tokens.to_string();
        found = Some(match tag.as_str() {
            "type" => InjectTag::Type,
            "name" => InjectTag::Name,
            _ => {
                return Err(Error::new(
                    meta_list.tokens.span(),
                    format!("Invalid #[{INJECT_ATTR}] tag `{tag}`, expected `type` or `name`"),
                ));
            }
        });
    }
    Ok(found)
}

/// Derive macro for the Fill trait.
///
/// Fields marked `#[inject(type)]` are resolved from the default binding of
/// their type, fields marked `#[inject(name)]` from the binding named after
/// the field. `Option<T>` fields resolve `T`. Other fields are left untouched.
#[proc_macro_derive(Fill, attributes(inject))]
pub fn derive_fill(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    handle_derive_fill(input)
}

fn handle_derive_fill(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return TokenStream::from(
                Error::new(
                    Span::call_site(),
                    format!("`{name}` is not a struct, only structs are supported"),
                )
                .to_compile_error(),
            );
        }
    };

    let mut field_stmts: Vec<proc_macro2::TokenStream> = Vec::new();

    match fields {
        syn::Fields::Named(fields) => {
            for field in &fields.named {
                let tag = match extract_inject_tag(&field.attrs) {
                    Ok(Some(tag)) => tag,
                    Ok(None) => continue,
                    Err(err) => return TokenStream::from(err.to_compile_error()),
                };
                let field_ident = field.ident.as_ref().unwrap();
                let field_name = field_ident.unraw().to_string();
                let field_ty = &field.ty;
                let tag = match tag {
                    InjectTag::Type => quote! { ::modular::FieldTag::Type },
                    InjectTag::Name => quote! { ::modular::FieldTag::Name },
                };

                if let Some(inner_type) = extract_option_type(field_ty) {
                    field_stmts.push(quote! {
                        self.#field_ident = ::core::option::Option::Some(
                            fields.inject_tagged::<#inner_type>(#field_name, #tag)?
                        );
                    });
                } else {
                    field_stmts.push(quote! {
                        self.#field_ident = fields.inject_tagged::<#field_ty>(#field_name, #tag)?;
                    });
                }
            }
        }
        syn::Fields::Unnamed(_) => {
            return TokenStream::from(
                Error::new(fields.span(), "Tuple structs are not supported").to_compile_error(),
            );
        }
        syn::Fields::Unit => {}
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::modular::Fill for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn fill(
                &mut self,
                fields: &::modular::Fields<'_>,
            ) -> ::modular::Result<()> {
                #(#field_stmts)*
                ::core::result::Result::Ok(())
            }
        }
    }
    .into()
}
