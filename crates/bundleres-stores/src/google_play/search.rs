//! Package name recovery from Google Play search results

use scraper::{Html, Selector};
use url::Url;

const RESULT_LINK_SELECTOR: &str = "a[href*='/store/apps/details?id=']";

/// Read the `id` query parameter of a listing link.
///
/// Relative links are resolved against `base`.
pub fn package_from_href(base: &Url, href: &str) -> Option<String> {
    let url = base.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// First result link whose package matches `wanted` ignoring ASCII case
pub fn find_package(html: &str, base: &Url, wanted: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(RESULT_LINK_SELECTOR).ok()?;
    doc.select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| package_from_href(base, href))
        .find(|package| package.eq_ignore_ascii_case(wanted))
}
