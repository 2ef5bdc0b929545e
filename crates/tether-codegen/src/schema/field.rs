use super::{Auto, ErrorSet, Name};

#[derive(Debug)]
pub(crate) struct Field {
    /// Index of field in the containing model
    pub(crate) id: usize,

    /// Field name
    pub(crate) name: Name,

    /// Field type
    pub(crate) ty: syn::Type,

    /// The field is part of the primary key
    pub(crate) key: bool,

    /// Specifies if and how the field is filled in automatically
    pub(crate) auto: Option<Auto>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, id: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut key = None;
        let mut auto = None;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "expected `#[key]`"));
                } else {
                    key = Some(attr);
                }
            } else if attr.path().is_ident("auto") {
                if auto.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[auto] attribute"));
                } else {
                    auto = Some(attr);
                }
            }
        }

        // `#[auto]` depends on `#[key]`, which may come after it.
        let auto = match auto {
            Some(attr) => match Auto::from_ast(attr, ident, key.is_some()) {
                Ok(auto) => Some(auto),
                Err(err) => {
                    errs.push(err);
                    None
                }
            },
            None => None,
        };

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            id,
            name: Name::from_ident(ident),
            ty: field.ty.clone(),
            key: key.is_some(),
            auto,
        })
    }
}
