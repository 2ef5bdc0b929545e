extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Model,
    attributes(key, auto, table, belongs_to, has_one, has_many, many_to_many)
)]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match tether_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
