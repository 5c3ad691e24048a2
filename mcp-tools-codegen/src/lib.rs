use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ItemFn, Lit, MetaNameValue, Token, parse_macro_input};

/// Attribute macro to mark a function as an MCP tool.
///
/// The function is passed through unchanged. Next to it the macro emits a
/// `<FN_NAME>_TOOL` constant of type `crate::mcp::tools::ToolMeta` holding the
/// declared name and description, so the owning domain can advertise the tool
/// and route calls to it from a single declaration.
///
/// Usage:
/// ```rust,ignore
/// #[mcp_tool(
///     name = "mcp_ado_work_items_get",
///     description = "Get work item by ID"
/// )]
/// pub async fn get_work_item(
///     connection: Connection,
///     args: GetWorkItemArgs,
/// ) -> Result<Value, ToolError> {
///     // implementation
/// }
/// // expands to the function plus `pub const GET_WORK_ITEM_TOOL: ToolMeta`
/// ```
#[proc_macro_attribute]
pub fn mcp_tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let metas = parse_macro_input!(attr with Punctuated::<MetaNameValue, Token![,]>::parse_terminated);
    let input_fn = parse_macro_input!(item as ItemFn);

    let mut name = None;
    let mut description = None;

    for meta in metas {
        let value = match &meta.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => s.clone(),
            other => {
                return syn::Error::new_spanned(other, "expected a string literal")
                    .to_compile_error()
                    .into();
            }
        };

        if meta.path.is_ident("name") {
            name = Some(value);
        } else if meta.path.is_ident("description") {
            description = Some(value);
        } else {
            return syn::Error::new_spanned(&meta.path, "unknown mcp_tool parameter")
                .to_compile_error()
                .into();
        }
    }

    let (Some(name), Some(description)) = (name, description) else {
        return syn::Error::new_spanned(
            &input_fn.sig.ident,
            "mcp_tool attribute requires both 'name' and 'description' parameters",
        )
        .to_compile_error()
        .into();
    };

    if name.value().trim().is_empty() || description.value().trim().is_empty() {
        return syn::Error::new_spanned(name, "mcp_tool name and description cannot be empty")
            .to_compile_error()
            .into();
    }

    let vis = &input_fn.vis;
    let const_ident = format_ident!(
        "{}_TOOL",
        input_fn.sig.ident.to_string().to_uppercase()
    );

    TokenStream::from(quote! {
        #input_fn

        #vis const #const_ident: crate::mcp::tools::ToolMeta = crate::mcp::tools::ToolMeta {
            name: #name,
            description: #description,
        };
    })
}
