use crate::{
    prelude::*,
    utils::{build_fields_enum, extract_named_fields, extract_serde_rename},
};

#[derive(FromAttributes)]
#[darling(attributes(entity))]
struct Attributes {
    #[darling(default)]
    collection: Option<String>,
    #[darling(default)]
    searchable: PathList,
}

struct FieldConfig {
    ident: Ident,
    lit: LitStr,
}

pub fn derive_entity(item: TokenStream) -> Result<TokenStream> {
    let input = parse2::<DeriveInput>(item)?;

    let attributes = Attributes::from_attributes(&input.attrs)?;

    let fields_named = extract_named_fields(input.span(), input.data)?;

    let fields = fields_named
        .named
        .into_iter()
        .filter_map(|field| {
            let rename = extract_serde_rename(&field);
            let ident = field.ident?;
            let stored = rename.unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_owned());

            Some(FieldConfig {
                lit: LitStr::new(&stored, Span::call_site()),
                ident,
            })
        })
        .collect_vec();

    let lits_by_ident = fields
        .iter()
        .map(|field| (&field.ident, &field.lit))
        .collect::<HashMap<_, _>>();

    let searchable = attributes
        .searchable
        .iter()
        .map(|path| {
            let ident = path
                .get_ident()
                .ok_or_else(|| Error::new_spanned(path, "expected ident"))?;

            lits_by_ident
                .get(ident)
                .copied()
                .ok_or_else(|| Error::new_spanned(ident, "unknown field"))
        })
        .try_collect::<_, Vec<_>, _>()?;

    let lowercase_entity = input.ident.to_string().to_snake_case();

    let collection_name = attributes.collection.unwrap_or_else(|| {
        lowercase_entity
            .strip_suffix("_entity")
            .unwrap_or(&lowercase_entity)
            .to_owned()
    });

    if collection_name.is_empty() {
        return Err(Error::new(
            input.ident.span(),
            "collection name must not be empty",
        ));
    }

    build(
        &input.vis,
        &input.ident,
        &lowercase_entity,
        &LitStr::new(&collection_name, Span::call_site()),
        &fields,
        &searchable,
    )
}

fn build(
    vis: &Visibility,
    ident: &Ident,
    lowercase_entity: &str,
    collection_name: &LitStr,
    fields: &[FieldConfig],
    searchable: &[&LitStr],
) -> Result<TokenStream> {
    let krate = krate()?;

    let mod_ident = Ident::new(lowercase_entity, Span::call_site());

    let fields_enum = build_fields_enum(
        fields.iter().map(|field| &field.ident),
        fields.iter().map(|field| &field.lit),
    );

    Ok(quote! {
        #vis mod #mod_ident {
            use super::*;

            impl #krate::Entity for #ident {
                type Fields = Fields;

                const COLLECTION_NAME: &'static str = #collection_name;

                const SEARCHABLE_FIELDS: &'static [&'static str] = &[ #( #searchable ),* ];
            }

            #fields_enum
        }
    })
}
