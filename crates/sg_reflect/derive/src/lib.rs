//! Provides [`macro@Reflect`], the derive behind `sg_reflect`'s struct
//! reflection.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, LitInt, parse_macro_input};

static FIELD_ATTRIBUTE_NAME: &str = "field";

// -----------------------------------------------------------------------------
// Derive entry

/// # Struct Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits for a struct with
/// named fields:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct`
///
/// The type must implement [`Clone`]; `reflect_clone` delegates to it.
/// Generic structs, tuple structs, unit structs and enums are not supported.
///
/// ## Field Attributes
///
/// Traversal metadata is authored per field with `#[field(...)]`:
///
/// - `persist = <id>`: the field is persisted, serialized under the compact
///   id instead of its name.
/// - `editor`: the field is shown in editor property panels.
/// - `copy`: the field participates in structural copies.
/// - `reference`: copies alias the field's value instead of recursing.
/// - `skip`: the field is excluded from every traversal.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, Default)]
/// struct Transform {
///     #[field(persist = 0, editor, copy)]
///     x: f32,
///     #[field(persist = 1, editor, copy)]
///     y: f32,
///     #[field(skip)]
///     dirty: bool,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(field))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_reflect(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand_reflect(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "#[derive(Reflect)] does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "#[derive(Reflect)] requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "#[derive(Reflect)] only supports structs",
            ));
        }
    };

    let fields = fields
        .iter()
        .map(ReflectField::parse)
        .collect::<syn::Result<Vec<_>>>()?;

    let type_path = impl_type_path(input);
    let typed = impl_typed(input, &fields);
    let struct_ops = impl_struct(input, &fields);
    let reflect = impl_reflect(input);

    Ok(quote! {
        #type_path
        #typed
        #struct_ops
        #reflect
    })
}

// -----------------------------------------------------------------------------
// Field parsing

struct ReflectField {
    ident: syn::Ident,
    name: String,
    ty: syn::Type,
    persist: Option<u16>,
    editor: bool,
    copy: bool,
    skip: bool,
    reference: bool,
}

impl ReflectField {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        // Named fields only, checked by the caller.
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

        let mut parsed = Self {
            name: ident.to_string(),
            ident,
            ty: field.ty.clone(),
            persist: None,
            editor: false,
            copy: false,
            skip: false,
            reference: false,
        };

        for attr in &field.attrs {
            if !attr.path().is_ident(FIELD_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("persist") {
                    let lit: LitInt = meta.value()?.parse()?;
                    parsed.persist = Some(lit.base10_parse::<u16>()?);
                    Ok(())
                } else if meta.path.is_ident("editor") {
                    parsed.editor = true;
                    Ok(())
                } else if meta.path.is_ident("copy") {
                    parsed.copy = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("reference") {
                    parsed.reference = true;
                    Ok(())
                } else {
                    Err(meta.error(
                        "expected one of: `persist = <id>`, `editor`, `copy`, `skip`, `reference`",
                    ))
                }
            })?;
        }

        Ok(parsed)
    }

    fn flags_tokens(&self) -> TokenStream2 {
        let mut flags = quote!(::sg_reflect::info::FieldFlags::new());
        if let Some(id) = self.persist {
            flags = quote!(#flags.persisted(#id));
        }
        if self.editor {
            flags = quote!(#flags.editor());
        }
        if self.copy {
            flags = quote!(#flags.copyable());
        }
        if self.skip {
            flags = quote!(#flags.ignored());
        }
        if self.reference {
            flags = quote!(#flags.by_reference());
        }
        flags
    }
}

// -----------------------------------------------------------------------------
// Impl blocks

fn impl_type_path(input: &DeriveInput) -> TokenStream2 {
    let ident = &input.ident;
    let name = ident.to_string();

    quote! {
        impl ::sg_reflect::info::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #name)
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }
        }
    }
}

fn impl_typed(input: &DeriveInput, fields: &[ReflectField]) -> TokenStream2 {
    let ident = &input.ident;
    let field_infos = fields.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        let flags = field.flags_tokens();
        quote! {
            ::sg_reflect::info::FieldInfo::new::<#ty>(#name, #flags)
        }
    });

    quote! {
        impl ::sg_reflect::info::Typed for #ident {
            fn type_info() -> &'static ::sg_reflect::info::TypeInfo {
                static CELL: ::sg_reflect::impls::NonGenericTypeInfoCell =
                    ::sg_reflect::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    ::sg_reflect::info::TypeInfo::Struct(
                        ::sg_reflect::info::StructInfo::new::<Self>(&[
                            #(#field_infos,)*
                        ]),
                    )
                })
            }
        }
    }
}

fn impl_struct(input: &DeriveInput, fields: &[ReflectField]) -> TokenStream2 {
    let ident = &input.ident;
    let field_len = fields.len();

    let field_arms = fields.iter().map(|field| {
        let name = &field.name;
        let ident = &field.ident;
        quote!(#name => ::core::option::Option::Some(&self.#ident),)
    });
    let field_mut_arms = fields.iter().map(|field| {
        let name = &field.name;
        let ident = &field.ident;
        quote!(#name => ::core::option::Option::Some(&mut self.#ident),)
    });
    let field_at_arms = fields.iter().enumerate().map(|(index, field)| {
        let ident = &field.ident;
        quote!(#index => ::core::option::Option::Some(&self.#ident),)
    });
    let field_at_mut_arms = fields.iter().enumerate().map(|(index, field)| {
        let ident = &field.ident;
        quote!(#index => ::core::option::Option::Some(&mut self.#ident),)
    });
    let name_at_arms = fields.iter().enumerate().map(|(index, field)| {
        let name = &field.name;
        quote!(#index => ::core::option::Option::Some(#name),)
    });

    quote! {
        impl ::sg_reflect::ops::Struct for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::sg_reflect::Reflect> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::sg_reflect::Reflect> {
                match name {
                    #(#field_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn ::sg_reflect::Reflect> {
                match index {
                    #(#field_at_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::sg_reflect::Reflect> {
                match index {
                    #(#field_at_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #(#name_at_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }

            #[inline]
            fn iter_fields(&self) -> ::sg_reflect::ops::StructFieldIter<'_> {
                ::sg_reflect::ops::StructFieldIter::new(self)
            }
        }
    }
}

fn impl_reflect(input: &DeriveInput) -> TokenStream2 {
    let ident = &input.ident;

    quote! {
        impl ::sg_reflect::Reflect for #ident {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn ::sg_reflect::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::sg_reflect::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ::sg_reflect::info::ReflectKind {
                ::sg_reflect::info::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> ::sg_reflect::ops::ReflectRef<'_> {
                ::sg_reflect::ops::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ::sg_reflect::ops::ReflectMut<'_> {
                ::sg_reflect::ops::ReflectMut::Struct(self)
            }

            #[inline]
            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<
                ::std::boxed::Box<dyn ::sg_reflect::Reflect>,
                ::sg_reflect::ops::ReflectCloneError,
            > {
                ::core::result::Result::Ok(::std::boxed::Box::new(
                    ::core::clone::Clone::clone(self),
                ))
            }
        }
    }
}
