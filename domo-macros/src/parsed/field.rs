use super::*;

pub(crate) struct ParsedField {
    name: String,
    span: proc_macro2::Span,
    ty: Type,
    tag: Option<LitStr>,
    embedded: bool,
    visible: bool,
}

enum FieldAttrItem {
    Tag(LitStr),
    Embed,
}

impl Parse for FieldAttrItem {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(FieldAttrItem::Tag(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        if ident == "embed" {
            Ok(FieldAttrItem::Embed)
        } else if ident == "tag" {
            input.parse::<Token![=]>()?;
            Ok(FieldAttrItem::Tag(input.parse()?))
        } else {
            Err(Error::new(
                ident.span(),
                format!("unknown domo option `{ident}`, expected a tag string, `tag = \"...\"` or `embed`"),
            ))
        }
    }
}

impl ParsedField {
    pub(crate) fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "DomoRecord requires named fields"))?;

        let mut tag = None;
        let mut embedded = false;
        for attr in &field.attrs {
            if attr.path().is_ident("domo") {
                for item in Self::parse_field_attr(attr)? {
                    match item {
                        FieldAttrItem::Tag(lit) => {
                            if tag.is_some() {
                                return Err(Error::new(lit.span(), "field already has a domo tag"));
                            }
                            tag = Some(lit);
                        }
                        FieldAttrItem::Embed => embedded = true,
                    }
                }
            }
        }

        Ok(Self {
            name: ident.unraw().to_string(),
            span: ident.span(),
            ty: field.ty.clone(),
            tag,
            embedded,
            visible: !matches!(field.vis, Visibility::Inherited),
        })
    }

    fn parse_field_attr(attr: &Attribute) -> Result<Vec<FieldAttrItem>> {
        match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(vec![FieldAttrItem::Tag(lit.clone())]),
                other => Err(Error::new_spanned(other, "expected a tag string, e.g. #[domo = \"name,LONG\"]")),
            },
            Meta::List(_) => {
                let items = attr.parse_args_with(Punctuated::<FieldAttrItem, Token![,]>::parse_terminated)?;
                Ok(items.into_iter().collect())
            }
            Meta::Path(path) => Err(Error::new_spanned(
                path,
                "expected #[domo(\"...\")], #[domo = \"...\"] or #[domo(embed)]",
            )),
        }
    }

    pub(crate) fn to_tokens(&self) -> TokenStream2 {
        let ty = &self.ty;
        let name = LitStr::new(&self.name, self.span);
        let tag = self.tag.as_ref().map(|lit| quote! { .tag(#lit) });
        let embedded = self.embedded.then(|| quote! { .embedded(true) });
        let visible = (!self.visible).then(|| quote! { .visible(false) });

        quote! {
            ::domo::FieldDef::of::<#ty>(#name) #tag #embedded #visible
        }
    }
}
