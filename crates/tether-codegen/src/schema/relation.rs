use syn::{parse::ParseStream, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    ManyToMany,
}

impl RelationKind {
    fn from_path(path: &syn::Path) -> Option<Self> {
        if path.is_ident("belongs_to") {
            Some(Self::BelongsTo)
        } else if path.is_ident("has_one") {
            Some(Self::HasOne)
        } else if path.is_ident("has_many") {
            Some(Self::HasMany)
        } else if path.is_ident("many_to_many") {
            Some(Self::ManyToMany)
        } else {
            None
        }
    }
}

/// A relation declared with a struct-level attribute, e.g.
/// `#[has_many(stories: Story, key = id, references = author_id)]`.
#[derive(Debug)]
pub(crate) struct Relation {
    pub(crate) kind: RelationKind,

    /// Relation name, also the accessor method name
    pub(crate) name: syn::Ident,

    /// Target model type
    pub(crate) ty: syn::Type,

    /// Fields of the declaring model
    pub(crate) key: Vec<syn::Ident>,

    /// Fields of the target model, paired with `key`
    pub(crate) references: Vec<syn::Ident>,

    pub(crate) through: Option<Through>,
}

#[derive(Debug)]
pub(crate) struct Through {
    pub(crate) table: syn::LitStr,
    pub(crate) join_key: Vec<syn::Ident>,
    pub(crate) join_references: Vec<syn::Ident>,
}

impl Relation {
    /// Parses `attr` if it is a relation attribute.
    pub(super) fn from_ast(
        attr: &syn::Attribute,
        names: &[syn::Ident],
    ) -> Option<syn::Result<Self>> {
        let kind = RelationKind::from_path(attr.path())?;
        Some(Self::parse(attr, kind, names))
    }

    fn parse(attr: &syn::Attribute, kind: RelationKind, names: &[syn::Ident]) -> syn::Result<Self> {
        let mut key: Vec<syn::Ident> = vec![];
        let mut references: Vec<syn::Ident> = vec![];
        let mut table: Option<syn::LitStr> = None;
        let mut join_key: Vec<syn::Ident> = vec![];
        let mut join_references: Vec<syn::Ident> = vec![];

        let (name, ty) = attr.parse_args_with(|input: ParseStream| {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![:]>()?;
            let ty: syn::Type = input.parse()?;

            while !input.is_empty() {
                input.parse::<Token![,]>()?;

                if input.is_empty() {
                    break;
                }

                let option: syn::Ident = input.parse()?;
                input.parse::<Token![=]>()?;

                if option == "key" {
                    key.push(input.parse()?);
                } else if option == "references" {
                    references.push(input.parse()?);
                } else if option == "through" && kind == RelationKind::ManyToMany {
                    if table.is_some() {
                        return Err(syn::Error::new_spanned(&option, "duplicate `through`"));
                    }
                    table = Some(input.parse()?);
                } else if option == "join_key" && kind == RelationKind::ManyToMany {
                    join_key.push(input.parse()?);
                } else if option == "join_references" && kind == RelationKind::ManyToMany {
                    join_references.push(input.parse()?);
                } else if kind == RelationKind::ManyToMany {
                    return Err(syn::Error::new_spanned(
                        &option,
                        "expected `key`, `references`, `through`, `join_key` or `join_references`",
                    ));
                } else {
                    return Err(syn::Error::new_spanned(
                        &option,
                        "expected `key` or `references`",
                    ));
                }
            }

            Ok((name, ty))
        })?;

        if key.is_empty() {
            return Err(syn::Error::new_spanned(
                attr,
                "expected at least one `key` and `references` attribute",
            ));
        }

        if key.len() != references.len() {
            return Err(syn::Error::new_spanned(
                attr,
                "number of `key` and `references` attributes must match",
            ));
        }

        for ident in &key {
            if !names.contains(ident) {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("unknown field `{ident}`"),
                ));
            }
        }

        let through = if kind == RelationKind::ManyToMany {
            let Some(table) = table else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`many_to_many` requires `through = \"join_table\"`",
                ));
            };

            if join_key.len() != key.len() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "number of `join_key` and `key` attributes must match",
                ));
            }

            if join_references.len() != references.len() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "number of `join_references` and `references` attributes must match",
                ));
            }

            Some(Through {
                table,
                join_key,
                join_references,
            })
        } else {
            None
        };

        Ok(Self {
            kind,
            name,
            ty,
            key,
            references,
            through,
        })
    }
}
