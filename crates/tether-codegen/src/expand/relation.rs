use super::Expand;
use crate::schema::RelationKind;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// One accessor method per declared relation.
    pub(super) fn expand_relation_methods(&self) -> TokenStream {
        let tether = &self.tether;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;

        let methods = self.model.relations.iter().map(|relation| {
            let ident = &relation.name;
            let name = ident.to_string();
            let ty = &relation.ty;

            match relation.kind {
                RelationKind::BelongsTo => quote! {
                    #vis fn #ident(&mut self) -> #tether::BelongsTo<'_, #model_ident, #ty> {
                        #tether::BelongsTo::new(self, #name)
                    }
                },
                RelationKind::HasOne => quote! {
                    #vis fn #ident(&self) -> #tether::HasOne<'_, #model_ident, #ty> {
                        #tether::HasOne::new(self, #name)
                    }
                },
                RelationKind::HasMany => quote! {
                    #vis fn #ident(&self) -> #tether::HasMany<'_, #model_ident, #ty> {
                        #tether::HasMany::new(self, #name)
                    }
                },
                RelationKind::ManyToMany => quote! {
                    #vis fn #ident(&self) -> #tether::HasManyThrough<'_, #model_ident, #ty> {
                        #tether::HasManyThrough::new(self, #name)
                    }
                },
            }
        });

        quote! {
            impl #model_ident {
                #( #methods )*
            }
        }
    }
}
