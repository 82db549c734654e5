//! Helpers for walking a rendered page tree: visible text, bounded ancestor
//! search, and image-based item lists.

use std::collections::HashSet;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::patterns::is_noise;

lazy_static! {
    static ref ANY: Selector = Selector::parse("*").unwrap();
    static ref IMG: Selector = Selector::parse("img").unwrap();
}

fn is_hidden(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "script" | "style" | "noscript" | "template")
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address" | "article" | "aside" | "blockquote" | "body" | "dd" | "details" | "dialog"
            | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form"
            | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "html" | "li"
            | "main" | "nav" | "ol" | "p" | "pre" | "section" | "summary" | "table"
            | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr" | "ul"
    )
}

fn write_rendered(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.replace(|c: char| c.is_whitespace(), " "));
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if is_hidden(child_el) {
                continue;
            }
            let name = child_el.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = is_block(name);
            if block {
                out.push('\n');
            }
            write_rendered(child_el, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Rendered text of an element, roughly as a browser lays it out: inline
/// content and comment-split text runs together, block elements and `<br>`
/// start new lines, whitespace collapses, blank lines are dropped.
pub fn inner_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    write_rendered(el, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text held directly by the element, excluding its child elements.
pub fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_leaf(el: ElementRef<'_>) -> bool {
    !el.children().any(|node| node.value().is_element())
}

/// Every element of the document, in document order.
pub fn elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.select(&ANY).filter(|el| !is_hidden(*el))
}

/// Test `start`, then up to `max_steps` of its ancestors, returning the first
/// that satisfies `accept`. `None` once the bound or the document root is hit.
pub fn ascend<'a, F>(start: ElementRef<'a>, max_steps: usize, mut accept: F) -> Option<ElementRef<'a>>
where
    F: FnMut(ElementRef<'a>) -> bool,
{
    std::iter::once(start)
        .chain(start.ancestors().filter_map(ElementRef::wrap))
        .take(max_steps + 1)
        .find(|el| accept(*el))
}

/// Run the bounded ascent from every anchor and return the distinct cards
/// found, in the order their first anchor appears. The card predicate sees the
/// candidate's rendered text.
pub fn locate_cards<'a, A, V>(doc: &'a Html, is_anchor: A, is_card: V, max_steps: usize) -> Vec<ElementRef<'a>>
where
    A: Fn(ElementRef<'a>) -> bool,
    V: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for anchor in elements(doc).filter(|el| is_anchor(*el)) {
        match ascend(anchor, max_steps, |el| is_card(&inner_text(el))) {
            Some(card) => {
                if seen.insert(card.id()) {
                    cards.push(card);
                }
            }
            None => trace!(max_steps, "anchor without a card, dropped"),
        }
    }
    cards
}

/// How a vendor turns the images around a card into item names.
pub struct ItemRules {
    /// Stand-in for an unlabeled but product-sized image.
    pub placeholder: &'static str,
    /// Unlabeled images at most this wide are decoration.
    pub min_width: u32,
    /// Ancestor levels to probe when the card itself has no usable images.
    pub probe_levels: usize,
    pub alt_noise: &'static [&'static str],
    pub src_noise: &'static [&'static str],
}

fn declared_width(img: ElementRef<'_>) -> u32 {
    img.value()
        .attr("width")
        .map(|w| w.trim().trim_end_matches("px"))
        .and_then(|w| w.parse::<f32>().ok())
        .map(|w| w as u32)
        .unwrap_or(0)
}

fn items_at(level: ElementRef<'_>, rules: &ItemRules) -> Vec<String> {
    let mut real = Vec::new();
    let mut placeholders = 0usize;
    for img in level.select(&IMG) {
        let alt = img.value().attr("alt").unwrap_or("").trim();
        let src = img.value().attr("src").unwrap_or("");
        if is_noise(alt, rules.alt_noise) || is_noise(src, rules.src_noise) {
            continue;
        }
        if alt.chars().count() > 1 {
            real.push(alt.to_string());
        } else if declared_width(img) > rules.min_width {
            placeholders += 1;
        }
    }
    if real.is_empty() {
        vec![rules.placeholder.to_string(); placeholders]
    } else {
        real
    }
}

/// Item names for a card: the card's own images first, then up to
/// `probe_levels` ancestors while `within_order` holds. The first level that
/// yields anything wins. Empty when nothing usable was found.
pub fn collect_items<F>(card: ElementRef<'_>, rules: &ItemRules, within_order: F) -> Vec<String>
where
    F: Fn(ElementRef<'_>) -> bool,
{
    let levels = std::iter::once(card)
        .chain(card.ancestors().filter_map(ElementRef::wrap))
        .take(rules.probe_levels + 1);
    for (depth, level) in levels.enumerate() {
        if depth > 0 && !within_order(level) {
            break;
        }
        let items = items_at(level, rules);
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ItemRules = ItemRules {
        placeholder: "Some Item",
        min_width: 30,
        probe_levels: 2,
        alt_noise: &["arrow"],
        src_noise: &[".svg"],
    };

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_inner_text_skips_scripts_and_blank_nodes() {
        let doc = Html::parse_fragment(
            "<div id='c'><p> Hello </p><script>var x = 1;</script><span>world</span>\n</div>",
        );
        assert_eq!(inner_text(first(&doc, "#c")), "Hello\nworld");
    }

    #[test]
    fn test_inner_text_keeps_inline_children_on_one_line() {
        let doc = Html::parse_fragment(
            "<div id='c'><p>Placed at <b>21 Jan</b> 2026,\n   8:15 pm</p><p>Total <span>₹</span>1,299</p></div>",
        );
        assert_eq!(inner_text(first(&doc, "#c")), "Placed at 21 Jan 2026, 8:15 pm\nTotal ₹1,299");
    }

    #[test]
    fn test_inner_text_joins_comment_split_runs() {
        let doc = Html::parse_fragment("<span id='c'>₹<!-- -->1,234<!-- --> • <!-- -->08 Feb</span>");
        assert_eq!(inner_text(first(&doc, "#c")), "₹1,234 • 08 Feb");
    }

    #[test]
    fn test_inner_text_breaks_on_br() {
        let doc = Html::parse_fragment("<span id='c'>Arrived<br>₹56</span>");
        assert_eq!(inner_text(first(&doc, "#c")), "Arrived\n₹56");
    }

    #[test]
    fn test_own_text_and_leaf() {
        let doc = Html::parse_fragment("<div id='c'>Placed at <b>noon</b></div>");
        let div = first(&doc, "#c");
        assert_eq!(own_text(div).trim(), "Placed at");
        assert!(!is_leaf(div));
        assert!(is_leaf(first(&doc, "b")));
    }

    #[test]
    fn test_ascend_finds_smallest_match() {
        let doc = Html::parse_fragment(
            "<div id='outer'><div id='inner'><span id='start'>x</span></div></div>",
        );
        let start = first(&doc, "#start");
        let found = ascend(start, 5, |el| el.value().name() == "div").unwrap();
        assert_eq!(found.value().id(), Some("inner"));
    }

    #[test]
    fn test_ascend_respects_bound() {
        let doc = Html::parse_fragment(
            "<section><div><div><div><span id='start'>x</span></div></div></div></section>",
        );
        let start = first(&doc, "#start");
        assert!(ascend(start, 2, |el| el.value().name() == "section").is_none());
        assert!(ascend(start, 4, |el| el.value().name() == "section").is_some());
    }

    #[test]
    fn test_locate_cards_dedups_shared_card() {
        let doc = Html::parse_fragment(
            "<div class='card'><b>mark</b><i>mark</i><p>₹10</p></div>",
        );
        let cards = locate_cards(
            &doc,
            |el| own_text(el).contains("mark"),
            |text| text.contains('₹'),
            3,
        );
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_locate_cards_drops_unvalidated_anchor() {
        let doc = Html::parse_fragment("<div><div><b>mark</b></div></div>");
        let cards = locate_cards(&doc, |el| own_text(el).contains("mark"), |text| text.contains('₹'), 6);
        assert!(cards.is_empty());
    }

    #[test]
    fn test_collect_items_prefers_real_names() {
        let doc = Html::parse_fragment(
            "<div id='c'>\
               <img alt='Milk' src='milk.png'>\
               <img alt='' width='64' src='p.png'>\
               <img alt='arrow' src='a.png'>\
               <img alt='Bread' src='logo.svg'>\
             </div>",
        );
        let items = collect_items(first(&doc, "#c"), &RULES, |_| true);
        assert_eq!(items, vec!["Milk".to_string()]);
    }

    #[test]
    fn test_collect_items_placeholders_when_unlabeled() {
        let doc = Html::parse_fragment(
            "<div id='c'><img alt='' width='64'><img width='80px'><img alt='' width='16'></div>",
        );
        let items = collect_items(first(&doc, "#c"), &RULES, |_| true);
        assert_eq!(items, vec!["Some Item".to_string(), "Some Item".to_string()]);
    }

    #[test]
    fn test_collect_items_probes_ancestors() {
        let doc = Html::parse_fragment(
            "<div id='outer'><img alt='Eggs'><div><p id='c'>text</p></div></div>",
        );
        let items = collect_items(first(&doc, "#c"), &RULES, |_| true);
        assert_eq!(items, vec!["Eggs".to_string()]);
    }

    #[test]
    fn test_collect_items_stops_at_guard() {
        let doc = Html::parse_fragment(
            "<div id='outer'><img alt='Eggs'><div><p id='c'>text</p></div></div>",
        );
        let items = collect_items(first(&doc, "#c"), &RULES, |el| el.value().id() != Some("outer"));
        assert!(items.is_empty());
    }
}
