mod model;
mod relation;
mod schema;
mod util;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for tether types
    tether: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impls = self.expand_model_impls();
        let relation_methods = self.expand_relation_methods();

        wrap_in_const(quote! {
            #model_impls
            #relation_methods
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        tether: quote!(_tether::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tether as _tether;
            #code
        };
    }
}
