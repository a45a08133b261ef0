//! Lenient HTML fragment parser
//!
//! Builds a [`MarkupNode`] tree from the sanitized HTML produced by the
//! markdown renderer. The input is HTML rather than XML, so the reader runs
//! with end-name checks disabled: void elements never wait for a close tag,
//! stray end tags are dropped, and any element still open at the end of the
//! input is closed implicitly.

use crate::markup::{Element, InlineStyle, MarkupNode, ROOT_TAG};
use crate::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether `tag` is an HTML void element (no content, no end tag)
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse an HTML fragment into a tree rooted at a synthetic `div`
pub fn parse_fragment(html: &str) -> Result<MarkupNode> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;

    let mut stack: Vec<Element> = vec![Element::new(ROOT_TAG)];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = start_element(&e);
                if is_void_element(&element.tag) {
                    append(&mut stack, MarkupNode::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(e)) => {
                append(&mut stack, MarkupNode::Element(start_element(&e)));
            }
            Ok(Event::End(e)) => {
                let tag = lowercase_name(e.name().as_ref());
                if is_void_element(&tag) {
                    continue;
                }
                // Index 0 is the synthetic root and never closes
                if let Some(open_at) = stack.iter().rposition(|el| el.tag == tag).filter(|&i| i > 0) {
                    while stack.len() > open_at {
                        close_top(&mut stack);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                append_text(&mut stack, unescape_lenient(&String::from_utf8_lossy(&e)));
            }
            Ok(Event::CData(e)) => {
                append_text(&mut stack, String::from_utf8_lossy(&e).into_owned());
            }
            Ok(Event::Comment(e)) => {
                append(
                    &mut stack,
                    MarkupNode::Comment(String::from_utf8_lossy(&e).into_owned()),
                );
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(err.into()),
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    let root = stack.pop().unwrap_or_else(|| Element::new(ROOT_TAG));
    Ok(MarkupNode::Element(root))
}

fn lowercase_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

fn start_element(start: &BytesStart<'_>) -> Element {
    let mut element = Element::new(lowercase_name(start.name().as_ref()));
    for attr in start.html_attributes().flatten() {
        let name = lowercase_name(attr.key.as_ref());
        let value = unescape_lenient(&String::from_utf8_lossy(&attr.value));
        if name == "style" {
            element.style = InlineStyle::parse(&value);
        } else {
            element.attributes.push((name, value));
        }
    }
    element
}

fn append(stack: &mut [Element], node: MarkupNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn append_text(stack: &mut [Element], text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        // CDATA next to text merges into one node
        if let Some(MarkupNode::Text(previous)) = parent.children.last_mut() {
            previous.push_str(&text);
        } else {
            parent.children.push(MarkupNode::Text(text));
        }
    }
}

fn close_top(stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        append(stack, MarkupNode::Element(element));
    }
}

/// Resolve character references, leaving unknown or malformed ones as literal text
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match reference_len(tail) {
            Some(len) => {
                let reference = &tail[..len];
                match quick_xml::escape::unescape_with(reference, resolve_entity) {
                    Ok(text) => out.push_str(&text),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of the `&name;` or `&#digits;` reference at the start of `tail`
fn reference_len(tail: &str) -> Option<usize> {
    let body = tail.strip_prefix('&')?;
    let name = body.strip_prefix('#').unwrap_or(body);
    let len = name.bytes().take_while(u8::is_ascii_alphanumeric).count();
    (len > 0 && name[len..].starts_with(';')).then(|| tail.len() - name.len() + len + 1)
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    quick_xml::escape::resolve_predefined_entity(name).or_else(|| resolve_html_entity(name))
}

/// Named character references beyond the five XML ones
fn resolve_html_entity(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "hellip" => "\u{2026}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        _ => return None,
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::StyleProperty;

    fn root(html: &str) -> Element {
        match parse_fragment(html).unwrap() {
            MarkupNode::Element(element) => element,
            other => panic!("expected element root, got {:?}", other),
        }
    }

    fn tags(element: &Element) -> Vec<String> {
        element
            .children
            .iter()
            .filter_map(|child| child.as_element().map(|el| el.tag.clone()))
            .collect()
    }

    #[test]
    fn test_parse_simple_fragment() {
        let root = root("<h2>Title</h2><p>Hello <strong>World</strong></p>");
        assert_eq!(root.tag, "div");
        assert_eq!(tags(&root), vec!["h2", "p"]);

        let p = root.children[1].as_element().unwrap();
        assert_eq!(p.children[0], MarkupNode::text("Hello "));
        assert_eq!(p.children[1].as_element().unwrap().tag, "strong");
        assert_eq!(p.text_content(), "Hello World");
    }

    #[test]
    fn test_void_elements_need_no_close_tag() {
        let root = root("<p>one<br>two<br/>three</p><hr>");
        assert_eq!(tags(&root), vec!["p", "hr"]);
        let p = root.children[0].as_element().unwrap();
        assert_eq!(p.children.len(), 5);
        assert_eq!(p.children[1].as_element().unwrap().tag, "br");
        assert_eq!(p.children[3].as_element().unwrap().tag, "br");
    }

    #[test]
    fn test_unclosed_and_stray_tags() {
        let root = root("<ul><li>one<li>two</ul></span><p>tail");
        assert_eq!(tags(&root), vec!["ul", "p"]);
        let ul = root.children[0].as_element().unwrap();
        assert_eq!(ul.text_content(), "onetwo");
        assert_eq!(root.children[1].as_element().unwrap().text_content(), "tail");
    }

    #[test]
    fn test_entities_are_resolved() {
        let root = root("<p>a &amp; b&nbsp;&mdash; &#65; &unknown; c</p>");
        let text = root.text_content();
        assert!(text.starts_with("a & b\u{a0}\u{2014} A"));
        assert!(text.ends_with(" c"));
    }

    #[test]
    fn test_bare_ampersand_is_literal() {
        let root = root("<p>AT&T &amp; co</p>");
        assert_eq!(root.text_content(), "AT&T & co");
    }

    #[test]
    fn test_predefined_entities_are_resolved() {
        let root = root("<p>&lt;T&gt; &quot;q&quot; &apos;s&apos; &#x41;</p>");
        assert_eq!(root.text_content(), "<T> \"q\" 's' A");
    }

    #[test]
    fn test_malformed_references_stay_literal() {
        assert_eq!(unescape_lenient("a & b &; &#; &amp"), "a & b &; &#; &amp");
        assert_eq!(unescape_lenient("x&y=1&amp;z"), "x&y=1&z");
    }

    #[test]
    fn test_attributes_and_inline_style() {
        let root = root(r#"<td style="text-align: center; color: red" class="x">cell</td>"#);
        let td = root.children[0].as_element().unwrap();
        assert_eq!(td.attribute("class"), Some("x"));
        assert_eq!(td.style.get(StyleProperty::Color), Some("red"));
        assert!(td.attribute("style").is_none());
    }

    #[test]
    fn test_comments_are_kept_as_nodes() {
        let root = root("<!-- hidden --><p>x</p>");
        assert_eq!(root.children[0], MarkupNode::Comment(" hidden ".into()));
    }

    #[test]
    fn test_uppercase_tags_are_normalized() {
        let root = root("<P>x</P><H1>y</h1>");
        assert_eq!(tags(&root), vec!["p", "h1"]);
    }

    #[test]
    fn test_roundtrip_through_html() {
        let html = r#"<div><h1>T</h1><p>a<br />b</p></div>"#;
        let parsed = parse_fragment("<h1>T</h1><p>a<br>b</p>").unwrap();
        assert_eq!(parsed.to_html(), html);
    }
}
