use super::*;

pub(crate) struct ParsedRecord {
    name: Ident,
    generics: syn::Generics,
    fields: Vec<ParsedField>,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        for attr in &input.attrs {
            if attr.path().is_ident("domo") {
                return Err(Error::new_spanned(
                    attr,
                    "#[domo(...)] belongs on fields, not on the struct",
                ));
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(ParsedField::from_field)
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(Error::new(input.ident.span(), "DomoRecord requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "DomoRecord can only be derived for structs")),
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(Error::new_spanned(
                lifetime,
                "DomoRecord types must be 'static; borrowed fields are not supported",
            ));
        }

        Ok(Self {
            name: input.ident.clone(),
            generics: input.generics.clone(),
            fields,
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let name_lit = LitStr::new(&name.to_string(), name.span());

        let mut generics = self.generics.clone();
        let type_params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
        if !type_params.is_empty() {
            let where_clause = generics.make_where_clause();
            for param in &type_params {
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#param: ::domo::Reflect + 'static));
            }
        }
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let field_defs = self.fields.iter().map(ParsedField::to_tokens);

        quote! {
            impl #impl_generics ::domo::Record for #name #ty_generics #where_clause {
                fn describe() -> ::domo::RecordDescriptor {
                    ::domo::RecordDescriptor::new(#name_lit)
                        #(.field(#field_defs))*
                }
            }

            impl #impl_generics ::domo::Reflect for #name #ty_generics #where_clause {
                fn kind() -> ::domo::FieldKind {
                    ::domo::FieldKind::Record(<Self as ::domo::Record>::describe())
                }
            }
        }
    }
}
