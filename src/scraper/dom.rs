//! Small query layer over `scraper` used by the extractors.
//!
//! fbref marks up its pages with stable element ids, label elements followed
//! by their value, and links whose path carries the site id of the linked
//! entity. These helpers cover exactly those lookups.

use ::scraper::{ElementRef, Selector};

use crate::error::Result;

/// First `tag` element under `root` whose `id` attribute equals `id`.
pub fn find_by_id<'a>(root: ElementRef<'a>, tag: &str, id: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = Selector::parse(tag)?;
    Ok(root
        .select(&selector)
        .find(|el| el.value().attr("id") == Some(id)))
}

/// First `tag` element under `root` whose trimmed text equals `label`.
pub fn find_labelled<'a>(
    root: ElementRef<'a>,
    tag: &str,
    label: &str,
) -> Result<Option<ElementRef<'a>>> {
    let selector = Selector::parse(tag)?;
    Ok(root
        .select(&selector)
        .find(|el| element_text(el).trim() == label))
}

/// The text node directly after `element`, if the next sibling is text.
pub fn following_text(element: ElementRef) -> Option<String> {
    element
        .next_sibling()
        .and_then(|node| node.value().as_text().map(|text| text.to_string()))
}

/// The nearest following sibling element named `tag`.
pub fn following_element<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// All text under `element`, concatenated without trimming.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

/// Segment `index` of an href split on `/`.
///
/// `/en/squads/18bb7c10/Arsenal-Stats` has the site id at index 3.
pub fn href_segment(href: &str, index: usize) -> Option<&str> {
    href.split('/').nth(index)
}

/// Segment `index` of the first non-empty link target inside `element`.
pub fn link_segment(element: &ElementRef, index: usize) -> Result<Option<String>> {
    let selector = Selector::parse("a[href]")?;
    Ok(element
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .and_then(|href| href_segment(href, index))
        .map(str::to_string))
}
