use crate::prelude::*;
use proc_macro_crate::{FoundCrate, crate_name};

macro_rules! extract {
    ($val:expr, $pat:pat, $error_message: expr) => {
        let $pat = $val else {
            return Err(Error::new_spanned($val, $error_message));
        };
    };
}

pub(crate) use extract;

pub fn extract_named_fields(span: Span, data: Data) -> Result<FieldsNamed> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(span, "expected struct"));
    };

    extract!(
        data_struct.fields,
        Fields::Named(named_fields),
        "expected named fields"
    );

    Ok(named_fields)
}

pub fn extract_serde_rename(field: &Field) -> Option<String> {
    #[derive(FromAttributes)]
    #[darling(attributes(serde))]
    struct SerdeAttribute {
        rename: String,
    }

    let serde_attribute = SerdeAttribute::from_attributes(&field.attrs).ok();

    serde_attribute.map(|attribute| attribute.rename)
}

pub fn build_fields_enum<'a>(
    field_idents: impl Iterator<Item = &'a Ident>,
    field_lits: impl Iterator<Item = &'a LitStr>,
) -> TokenStream {
    let variants = field_idents
        .map(|ident| {
            Ident::new(
                &ident.to_string().trim_start_matches("r#").to_upper_camel_case(),
                Span::call_site(),
            )
        })
        .collect_vec();

    let field_lits = field_lits.collect_vec();

    quote! {
        #[derive(
            ::std::fmt::Debug,
            ::std::clone::Clone,
            ::std::marker::Copy,
            ::std::cmp::PartialEq,
            ::std::cmp::Eq,
            ::std::hash::Hash,
        )]
        pub enum Fields {
            #( #variants ),*
        }

        impl Fields {
            pub const ALL: &'static [Fields] = &[ #( Fields::#variants ),* ];

            pub const fn as_str(self) -> &'static str {
                match self {
                    #(
                        Self::#variants => #field_lits
                    ),*
                }
            }
        }

        impl ::std::fmt::Display for Fields {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::From<Fields> for ::std::string::String {
            fn from(value: Fields) -> Self {
                ::std::string::ToString::to_string(&value)
            }
        }
    }
}

pub fn krate() -> Result<TokenStream> {
    let found = crate_name("ordu")
        .map_err(|error| Error::new(Span::call_site(), format!("cannot locate `ordu`: {error}")))?;

    let path = match found {
        FoundCrate::Itself => quote! { crate },
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote! { ::#ident }
        }
    };

    Ok(path)
}
