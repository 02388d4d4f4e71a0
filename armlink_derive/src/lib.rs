use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{Attribute, Data, DataEnum, DataStruct, DeriveInput, Expr, Field, Fields, Index, Lit};

/// Derives `armlink::wire::Wire` for a struct, encoding its fields in declaration order.
#[proc_macro_derive(Wire)]
pub fn derive_wire(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error().into(),
    };

    impl_wire(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `armlink::status::Status` for a `#[repr(u32)]` enum whose first variant is `Success`.
///
/// Anything else is rejected at build time.
#[proc_macro_derive(Status)]
pub fn derive_status(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error().into(),
    };

    impl_status(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn impl_wire(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let ds = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Wire can only be derived for structs",
            ));
        }
    };

    let sizes = ds.fields.iter().map(|field| {
        let ty = &field.ty;
        quote! { <#ty as ::armlink::wire::Wire>::SIZE }
    });

    let encodes = field_struct_gen(
        |ident, _| {
            quote! {
                ::armlink::wire::Wire::encode(&self.#ident, encoder)?;
            }
        },
        ds,
    );

    let decode = generate_decode(&ds.fields);

    Ok(quote! {
        impl #impl_generics ::armlink::wire::Wire for #name #ty_generics #where_clause {
            const SIZE: usize = 0 #(+ #sizes)*;

            fn encode(
                &self,
                encoder: &mut ::armlink::wire::Encoder<'_>,
            ) -> ::core::result::Result<(), ::armlink::wire::WireError> {
                #(#encodes)*
                ::core::result::Result::Ok(())
            }

            fn decode(
                decoder: &mut ::armlink::wire::Decoder<'_>,
            ) -> ::core::result::Result<Self, ::armlink::wire::WireError> {
                ::core::result::Result::Ok(#decode)
            }
        }
    })
}

/// Struct literal fields are evaluated in source order, which keeps decoding in wire order.
fn generate_decode(fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let inits = fields.named.iter().map(|field| {
                let ident = field.ident.as_ref().unwrap();
                let ty = &field.ty;
                quote! { #ident: <#ty as ::armlink::wire::Wire>::decode(decoder)? }
            });
            quote! { Self { #(#inits),* } }
        }
        Fields::Unnamed(fields) => {
            let inits = fields.unnamed.iter().map(|field| {
                let ty = &field.ty;
                quote! { <#ty as ::armlink::wire::Wire>::decode(decoder)? }
            });
            quote! { Self( #(#inits),* ) }
        }
        Fields::Unit => quote! { Self },
    }
}

fn impl_status(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let de = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Status can only be derived for enums",
            ));
        }
    };

    if !has_repr_u32(&input.attrs)? {
        return Err(syn::Error::new_spanned(
            name,
            "status enums must be declared #[repr(u32)]",
        ));
    }

    check_variants(de)?;

    let arms = de.variants.iter().map(|variant| {
        let ident = &variant.ident;
        quote! {
            raw if raw == Self::#ident as u32 => ::core::option::Option::Some(Self::#ident),
        }
    });

    Ok(quote! {
        const _: () = assert!(
            #name::Success as u32 == 0,
            "`Success` must have the value 0"
        );

        impl ::armlink::status::__private::Sealed for #name {}

        impl ::armlink::status::Status for #name {
            const SUCCESS: Self = Self::Success;
            const SUCCESS_RAW: u32 = <Self as ::armlink::status::Status>::SUCCESS as u32;

            fn as_raw(self) -> u32 {
                self as u32
            }

            fn from_raw(raw: u32) -> ::core::option::Option<Self> {
                match raw {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn has_repr_u32(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("u32") {
                found = true;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

fn check_variants(de: &DataEnum) -> syn::Result<()> {
    let first = de.variants.first().ok_or_else(|| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            "status enums must define a `Success` variant",
        )
    })?;

    if first.ident != "Success" {
        return Err(syn::Error::new_spanned(
            &first.ident,
            "the first status variant must be `Success`",
        ));
    }

    if let Some((_, expr)) = &first.discriminant {
        if !is_zero(expr)? {
            return Err(syn::Error::new_spanned(expr, "`Success` must have the value 0"));
        }
    }

    for variant in &de.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "status variants cannot carry data",
            ));
        }
    }

    Ok(())
}

fn is_zero(expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => Ok(int.base10_parse::<u32>()? == 0),
            _ => Ok(false),
        },
        _ => Ok(false),
    }
}

/// Generates a vector of TokenStream2 from the fields of a struct.
/// The `transform` function is applied to each field's identifier and the field itself.
/// The field identifier works with both named and unnamed fields.
fn field_struct_gen(
    transform: fn(&TokenStream2, &Field) -> TokenStream2,
    input: &DataStruct,
) -> Vec<TokenStream2> {
    match &input.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .map(|field| {
                let ident = field.ident.as_ref().unwrap();
                transform(&ident.to_token_stream(), field)
            })
            .collect(),
        Fields::Unnamed(fields) => fields
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let ident = Index::from(i);
                transform(&ident.to_token_stream(), field)
            })
            .collect(),
        Fields::Unit => Vec::new(),
    }
}
