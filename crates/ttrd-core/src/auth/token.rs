//! CSRF token extraction from the portal login page.

use scraper::{Html, Selector};

/// Pulls the anti-forgery token out of login-page HTML.
///
/// The portal renders it as `<input name="_csrf_token" value="...">`. Returns
/// `None` when the input or its `value` attribute is absent; the login POST
/// must not be attempted in that case.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let input_sel = Selector::parse(r#"input[name="_csrf_token"]"#).unwrap();
    document
        .select(&input_sel)
        .next()
        .and_then(|input| input.attr("value"))
        .map(str::to_string)
}
