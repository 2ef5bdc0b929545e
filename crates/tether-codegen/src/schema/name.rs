use std_util::str;

#[derive(Debug)]
pub(crate) struct Name {
    /// Snake case form, used for column and relation names
    pub(crate) snake: String,

    /// The identifier as written
    pub(crate) ident: syn::Ident,
}

impl Name {
    pub(crate) fn from_ident(ident: &syn::Ident) -> Self {
        let src = ident.to_string();
        let src = src.strip_prefix("r#").unwrap_or(&src);

        Self {
            snake: str::snake_case(src),
            ident: ident.clone(),
        }
    }

    /// Default table name: the plural of the snake case name.
    pub(crate) fn table_name(&self) -> String {
        str::pluralize(&self.snake)
    }
}
