use std::sync::LazyLock;

use scraper::{Html, Node, Selector};

static EXAMPLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.ExempleDefinition").expect("static selector"));

/// Elements whose text is never shown to a reader.
const HIDDEN: [&str; 2] = ["script", "style"];

/// Example sentences of a definition, in document order.
///
/// Tags inside an example are dropped. Surrounding whitespace is trimmed and
/// every inner run of whitespace, line breaks from the page source included,
/// becomes a single space, so an example always reads as one line. Markup
/// that is not HTML at all simply has no examples.
pub fn extract_examples(markup: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(markup);

    fragment
        .select(&EXAMPLE)
        .map(|example| collapse(example.text()))
        .collect()
}

/// Readable text of a whole markup fragment.
///
/// Entities are decoded, `script` and `style` bodies are skipped and tag
/// boundaries count as whitespace, so adjacent blocks don't run together.
pub fn markup_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);

    let texts = fragment.root_element().descendants().filter_map(|node| {
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN.contains(&element.name()),
            _ => false,
        });

        match node.value() {
            Node::Text(text) if !hidden => Some(&**text),
            _ => None,
        }
    });

    collapse(texts.flat_map(|text| [text, " "]))
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
