use crate::error::{MangaDlError, Result};
use crate::rulebook::Rule;
use scraper::{Html, Selector};

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| MangaDlError::invalid_rule(format!("bad selector {:?}: {}", css, e)))
}

/// Text content of the first node matching the rule's name selector.
pub fn extract_name(html: &str, rule: &Rule) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = parse_selector(&rule.name_selector)?;

    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| MangaDlError::selector_not_found(&rule.name_selector))?;

    Ok(element.text().collect::<String>().trim().to_string())
}

/// `src` attribute of the first node matching the rule's image selector.
pub fn extract_image_url(html: &str, rule: &Rule) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = parse_selector(&rule.image_selector)?;

    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| MangaDlError::selector_not_found(&rule.image_selector))?;

    element
        .value()
        .attr("src")
        .map(|src| src.to_string())
        .ok_or_else(|| {
            MangaDlError::selector_not_found(format!("{} has no src attribute", rule.image_selector))
        })
}
