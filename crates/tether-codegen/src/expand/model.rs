use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impls(&self) -> TokenStream {
        let tether = &self.tether;
        let model_ident = &self.model.ident;
        let model_schema = self.expand_model_schema();
        let load_body = self.expand_load_body();
        let get_field_arms = self.expand_get_field_arms();
        let set_field_arms = self.expand_set_field_arms();
        let model_name = model_ident.to_string();

        quote! {
            impl #tether::Model for #model_ident {
                fn id() -> #tether::ModelId {
                    static ID: #tether::OnceLock<#tether::ModelId> = #tether::OnceLock::new();
                    *ID.get_or_init(|| #tether::generate_unique_id())
                }

                #model_schema

                fn load(mut record: #tether::ValueRecord) -> #tether::Result<Self> {
                    #load_body
                }

                fn get_field(&self, index: usize) -> #tether::Value {
                    match index {
                        #get_field_arms
                        _ => panic!("model `{}` has no field at index {}", #model_name, index),
                    }
                }

                fn set_field(&mut self, index: usize, value: #tether::Value) -> #tether::Result<()> {
                    match index {
                        #set_field_arms
                        _ => Err(#tether::Error::invalid_schema(format!(
                            "model `{}` has no field at index {}",
                            #model_name,
                            index
                        ))),
                    }
                }
            }
        }
    }

    fn expand_load_body(&self) -> TokenStream {
        let tether = &self.tether;
        let model_name = self.model.ident.to_string();
        let len = util::int(self.model.fields.len());

        let fields = self.model.fields.iter().map(|field| {
            let ident = &field.name.ident;
            let ty = &field.ty;
            let index = util::int(field.id);

            quote!(#ident: <#ty as #tether::Primitive>::load(record[#index].take())?,)
        });

        quote! {
            if record.len() != #len {
                return Err(#tether::Error::invalid_result(format!(
                    "expected {} values to load model `{}`, got {}",
                    #len,
                    #model_name,
                    record.len()
                )));
            }

            Ok(Self {
                #( #fields )*
            })
        }
    }

    fn expand_get_field_arms(&self) -> TokenStream {
        let tether = &self.tether;

        self.model
            .fields
            .iter()
            .map(|field| {
                let ident = &field.name.ident;
                let ty = &field.ty;
                let index = util::int(field.id);

                quote!(#index => <#ty as #tether::Primitive>::to_value(&self.#ident),)
            })
            .collect()
    }

    fn expand_set_field_arms(&self) -> TokenStream {
        let tether = &self.tether;

        self.model
            .fields
            .iter()
            .map(|field| {
                let ident = &field.name.ident;
                let ty = &field.ty;
                let index = util::int(field.id);

                quote! {
                    #index => {
                        self.#ident = <#ty as #tether::Primitive>::load(value)?;
                        Ok(())
                    }
                }
            })
            .collect()
    }
}
