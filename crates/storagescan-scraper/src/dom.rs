//! Selector-query helpers shared by the site templates.
//!
//! Text helpers follow jQuery-style semantics: querying a selector that
//! matches several elements concatenates their text, and a selector that
//! matches nothing yields an empty string.

use scraper::{ElementRef, Selector};

/// Compiles a CSS selector. Only called with literal selectors.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `Some(s)` when `s` is non-empty.
pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// First element under `scope` matching `css`.
pub(crate) fn first_match<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope.select(&selector(css)).next()
}

/// Whether any element under `scope` matches `css`.
pub(crate) fn has_match(scope: ElementRef<'_>, css: &str) -> bool {
    first_match(scope, css).is_some()
}

/// All descendant text of `el`, concatenated.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Concatenated text of every element matching `css`, trimmed.
pub(crate) fn text_of(scope: ElementRef<'_>, css: &str) -> String {
    scope
        .select(&selector(css))
        .map(element_text)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trimmed text of each element matching `css`, in document order.
pub(crate) fn texts_of(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    scope
        .select(&selector(css))
        .map(|el| element_text(el).trim().to_string())
        .collect()
}

/// The element's own text nodes (child elements excluded), trimmed, with
/// whitespace-only nodes dropped.
pub(crate) fn own_text_nodes(el: ElementRef<'_>) -> Vec<&str> {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Text of every element matching `css` with its child elements removed
/// first, so nested labels and counters do not leak into the value.
pub(crate) fn own_text_of(scope: ElementRef<'_>, css: &str) -> String {
    let joined = scope
        .select(&selector(css))
        .flat_map(|el| {
            el.children()
                .filter_map(|node| node.value().as_text())
                .map(|text| String::from(&**text))
                .collect::<Vec<_>>()
        })
        .collect::<String>();
    joined.trim().to_string()
}

/// Trimmed, non-empty values of `attr` on every element matching `css`.
pub(crate) fn attrs_of(scope: ElementRef<'_>, css: &str, attr: &str) -> Vec<String> {
    scope
        .select(&selector(css))
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed, non-empty value of `attr` on `el` itself.
pub(crate) fn attr_of(el: ElementRef<'_>, attr: &str) -> Option<String> {
    el.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Whether `el` carries `class` in its class list.
pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
