use super::Expand;
use crate::schema::{Auto, RelationKind};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_schema(&self) -> TokenStream {
        let tether = &self.tether;
        let model_name = self.model.ident.to_string();
        let table_name = self.model.table_name();
        let fields = self.expand_field_schemas();
        let relations = self.expand_relation_schemas();

        quote! {
            fn schema() -> #tether::schema::Model {
                #tether::schema::Model {
                    id: <Self as #tether::Model>::id(),
                    name: #model_name,
                    table_name: #table_name,
                    fields: #tether::Vec::from([ #( #fields ),* ]),
                    relations: #tether::Vec::from([ #( #relations ),* ]),
                }
            }
        }
    }

    fn expand_field_schemas(&self) -> Vec<TokenStream> {
        let tether = &self.tether;

        self.model
            .fields
            .iter()
            .map(|field| {
                let name = &field.name.snake;
                let ty = &field.ty;
                let primary_key = field.key;
                let auto = match field.auto {
                    Some(Auto::Increment) => quote!(Some(#tether::schema::Auto::Increment)),
                    Some(Auto::CreatedAt) => quote!(Some(#tether::schema::Auto::CreatedAt)),
                    Some(Auto::UpdatedAt) => quote!(Some(#tether::schema::Auto::UpdatedAt)),
                    None => quote!(None),
                };

                quote! {
                    #tether::schema::Field {
                        name: #name,
                        ty: <#ty as #tether::Primitive>::ty(),
                        nullable: <#ty as #tether::Primitive>::NULLABLE,
                        primary_key: #primary_key,
                        auto: #auto,
                    }
                }
            })
            .collect()
    }

    fn expand_relation_schemas(&self) -> Vec<TokenStream> {
        let tether = &self.tether;

        self.model
            .relations
            .iter()
            .map(|relation| {
                let name = relation.name.to_string();
                let ty = &relation.ty;
                let target_name = quote!(#ty).to_string().replace(' ', "");
                let key = relation.key.iter().map(|ident| ident.to_string());
                let references = relation.references.iter().map(|ident| ident.to_string());

                let kind = match relation.kind {
                    RelationKind::BelongsTo => quote!(#tether::schema::RelationKind::BelongsTo),
                    RelationKind::HasOne => quote!(#tether::schema::RelationKind::HasOne),
                    RelationKind::HasMany => quote!(#tether::schema::RelationKind::HasMany),
                    RelationKind::ManyToMany => quote!(#tether::schema::RelationKind::ManyToMany),
                };

                let through = match &relation.through {
                    Some(through) => {
                        let table = &through.table;
                        let join_key = through.join_key.iter().map(|ident| ident.to_string());
                        let join_references =
                            through.join_references.iter().map(|ident| ident.to_string());

                        quote! {
                            Some(#tether::schema::Through {
                                table: #table,
                                join_key: #tether::Vec::from([ #( #join_key ),* ]),
                                join_references: #tether::Vec::from([ #( #join_references ),* ]),
                            })
                        }
                    }
                    None => quote!(None),
                };

                quote! {
                    #tether::schema::Relation {
                        name: #name,
                        kind: #kind,
                        target: <#ty as #tether::Model>::id(),
                        target_name: #target_name,
                        key: #tether::Vec::from([ #( #key ),* ]),
                        references: #tether::Vec::from([ #( #references ),* ]),
                        through: #through,
                    }
                }
            })
            .collect()
    }
}
