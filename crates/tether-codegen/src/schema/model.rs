use super::{ErrorSet, Field, ModelAttr, Name, Relation};

#[derive(Debug)]
pub(crate) struct Model {
    /// Model name
    pub(crate) name: Name,

    /// Model visibility
    pub(crate) vis: syn::Visibility,

    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Model fields
    pub(crate) fields: Vec<Field>,

    /// Relations declared on the model
    pub(crate) relations: Vec<Relation>,

    /// Optional table to map the model to
    pub(crate) table: Option<syn::LitStr>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        // Relation keys are checked against the field names
        let names: Vec<_> = node
            .named
            .iter()
            .filter_map(|field| field.ident.clone())
            .collect();

        let mut model_attr = ModelAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = model_attr.populate_from_ast(&ast.attrs, &names) {
            errs.push(err);
        }

        for (index, node) in node.named.iter().enumerate() {
            match Field::from_ast(node, index) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        if !fields.iter().any(|field| field.key) {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "model must have at least one field-level `#[key]` attribute",
            ));
        }

        Ok(Self {
            name: Name::from_ident(&ast.ident),
            vis: ast.vis.clone(),
            ident: ast.ident.clone(),
            fields,
            relations: model_attr.relations,
            table: model_attr.table,
        })
    }

    pub(crate) fn table_name(&self) -> String {
        match &self.table {
            Some(table) => table.value(),
            None => self.name.table_name(),
        }
    }
}
