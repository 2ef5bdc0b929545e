/// Value the database or the persistence layer fills in for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Auto {
    Increment,
    CreatedAt,
    UpdatedAt,
}

impl Auto {
    /// Picks the strategy for an `#[auto]` field from its role: key fields
    /// auto increment, `created_at` and `updated_at` are timestamps.
    pub(super) fn from_ast(
        attr: &syn::Attribute,
        ident: &syn::Ident,
        key: bool,
    ) -> syn::Result<Self> {
        if !matches!(attr.meta, syn::Meta::Path(_)) {
            return Err(syn::Error::new_spanned(attr, "expected `#[auto]`"));
        }

        if key {
            return Ok(Self::Increment);
        }

        match ident.to_string().as_str() {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(syn::Error::new_spanned(
                attr,
                "`#[auto]` is only supported on `#[key]` fields, `created_at` and `updated_at`",
            )),
        }
    }
}
