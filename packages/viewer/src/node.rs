//! The document tag tree: a uniform, JSON-shaped representation of parsed TEI.
//!
//! Every parsed element becomes a [`DocumentNode`] of `{tag, attributes,
//! value}`, where `value` is either literal text or an ordered sequence of
//! child nodes. Text nodes use the reserved tag [`TEXT_TAG`]; elements whose
//! entire content is a single text node are flattened to a string value at
//! parse time. Trees are immutable once built: transformations such as
//! [`remove_empty_text_values`] always produce new trees.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reserved tag name for text nodes.
pub const TEXT_TAG: &str = "#text";

/// A node in the parsed document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Tag name without namespace prefix, or `#text` for text nodes.
    pub tag: String,
    /// Attribute map; empty for text nodes and attribute-less elements.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Node content: literal text or ordered children.
    pub value: NodeValue,
}

/// Content of a [`DocumentNode`].
///
/// Serializes untagged, so JSON output is a plain string or a plain array,
/// matching the tree shape documents are exchanged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    /// Terminal text: always for `#text` nodes, and for elements flattened
    /// from single-text content.
    Text(String),
    /// Ordered child sequence; empty for void elements.
    Children(Vec<DocumentNode>),
}

impl DocumentNode {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            attributes: BTreeMap::new(),
            value: NodeValue::Text(value.into()),
        }
    }

    /// Create an element node with the given children.
    #[must_use]
    pub fn element(tag: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            value: NodeValue::Children(children),
        }
    }

    /// Create an element node with flattened text content.
    #[must_use]
    pub fn flat(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            value: NodeValue::Text(text.into()),
        }
    }

    /// Add an attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Whether this is a `#text` node.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Literal text value, if this node carries one.
    ///
    /// Present for `#text` nodes and flattened elements; `None` for nodes
    /// with child sequences.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Text(text) => Some(text),
            NodeValue::Children(_) => None,
        }
    }

    /// Child nodes; empty slice for text-valued nodes.
    #[must_use]
    pub fn children(&self) -> &[DocumentNode] {
        match &self.value {
            NodeValue::Children(children) => children,
            NodeValue::Text(_) => &[],
        }
    }

    /// Element children only (excludes `#text` nodes).
    pub fn child_elements(&self) -> impl Iterator<Item = &DocumentNode> {
        self.children().iter().filter(|child| !child.is_text())
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Find the first child element with the given tag name.
    #[must_use]
    pub fn find_child(&self, tag: &str) -> Option<&DocumentNode> {
        self.children().iter().find(|child| child.tag == tag)
    }

    /// Find all child elements with the given tag name.
    pub fn find_children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DocumentNode> {
        self.children().iter().filter(move |child| child.tag == tag)
    }

    /// Find a descendant matching a path of tag names.
    ///
    /// Descends one child level per path segment; at each level the first
    /// matching child wins and siblings are not revisited.
    ///
    /// # Arguments
    /// * `path` - Slash-separated path of tag names (e.g., "fileDesc/titleStmt/title")
    ///
    /// # Returns
    /// Matching node, or `None` if any step fails to match
    ///
    /// # Examples
    /// ```
    /// use recto_viewer::node::parse_document;
    ///
    /// let roots = parse_document("<TEI><teiHeader><fileDesc/></teiHeader></TEI>").unwrap();
    /// assert!(roots[0].find_by_path("teiHeader/fileDesc").is_some());
    /// assert!(roots[0].find_by_path("teiHeader/missing").is_none());
    /// ```
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&DocumentNode> {
        let mut current = self;
        for part in path.split('/') {
            current = current.find_child(part)?;
        }
        Some(current)
    }

    /// Find the first descendant with the given tag, searching at most
    /// `max_depth` levels below this node.
    ///
    /// Depth 1 means direct children. Matches in document order, shallower
    /// levels first within each subtree (depth-first, pre-order).
    #[must_use]
    pub fn find_descendant(&self, tag: &str, max_depth: usize) -> Option<&DocumentNode> {
        if max_depth == 0 {
            return None;
        }
        for child in self.children() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(tag, max_depth - 1) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text content of this node and its descendants.
    ///
    /// Trimmed text fragments joined with single spaces; empty fragments are
    /// skipped. Useful for metadata fields and anchors, where markup inside
    /// the element does not matter.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        match &self.value {
            NodeValue::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            NodeValue::Children(children) => {
                for child in children {
                    child.collect_text(parts);
                }
            }
        }
    }
}

/// Parse a TEI/XML document string into a list of root nodes.
///
/// Namespace prefixes are stripped from tag names; comments and processing
/// instructions are dropped. The returned list holds the single document
/// root, kept as a list because lookups and transforms operate on node
/// sequences throughout.
///
/// # Arguments
/// * `xml` - The XML document text
///
/// # Returns
/// Root nodes of the parsed tree
///
/// # Examples
/// ```
/// use recto_viewer::node::parse_document;
///
/// let roots = parse_document("<TEI><text><body><p>ok</p></body></text></TEI>").unwrap();
/// assert_eq!(roots[0].tag, "TEI");
/// ```
pub fn parse_document(xml: &str) -> Result<Vec<DocumentNode>> {
    let doc = Document::parse(xml)?;
    Ok(vec![convert_element(doc.root_element())])
}

/// Find a node by path across a list of roots.
///
/// The first path segment selects among the roots themselves (first match
/// wins); remaining segments descend through children as in
/// [`DocumentNode::find_by_path`].
#[must_use]
pub fn find_by_path<'a>(roots: &'a [DocumentNode], path: &str) -> Option<&'a DocumentNode> {
    let (first, rest) = match path.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (path, None),
    };
    let root = roots.iter().find(|node| node.tag == first)?;
    match rest {
        Some(rest) => root.find_by_path(rest),
        None => Some(root),
    }
}

/// Recursively strip `#text` nodes whose value is whitespace-only or empty.
///
/// Recurses into child sequences first, then filters at the current level,
/// so a node emptied by the recursion keeps its (now shorter) child list.
/// Nodes with flattened string values are left untouched. Idempotent.
///
/// # Examples
/// ```
/// use recto_viewer::node::{remove_empty_text_values, DocumentNode};
///
/// let nodes = vec![DocumentNode::text("  "), DocumentNode::flat("p", "ok")];
/// let cleaned = remove_empty_text_values(&nodes);
/// assert_eq!(cleaned, vec![DocumentNode::flat("p", "ok")]);
/// ```
#[must_use]
pub fn remove_empty_text_values(nodes: &[DocumentNode]) -> Vec<DocumentNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let cleaned = match &node.value {
                NodeValue::Children(children) => DocumentNode {
                    tag: node.tag.clone(),
                    attributes: node.attributes.clone(),
                    value: NodeValue::Children(remove_empty_text_values(children)),
                },
                NodeValue::Text(_) => node.clone(),
            };
            if cleaned.is_text() && cleaned.as_text().is_some_and(|t| t.trim().is_empty()) {
                None
            } else {
                Some(cleaned)
            }
        })
        .collect()
}

fn convert_element(node: Node<'_, '_>) -> DocumentNode {
    let tag = node.tag_name().name().to_string();
    let attributes: BTreeMap<String, String> = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert_element(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                children.push(DocumentNode::text(text));
            }
        }
    }

    // Single-text content flattens to a string value; whitespace-only
    // content collapses to an empty element.
    let value = match children.as_slice() {
        [only] if only.is_text() => {
            let text = only.as_text().unwrap_or_default().trim();
            if text.is_empty() {
                NodeValue::Children(Vec::new())
            } else {
                NodeValue::Text(text.to_string())
            }
        }
        _ => NodeValue::Children(children),
    };

    DocumentNode {
        tag,
        attributes,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flattens_single_text_content() {
        let roots = parse_document("<p>ok</p>").unwrap();
        assert_eq!(roots, vec![DocumentNode::flat("p", "ok")]);
    }

    #[test]
    fn test_parse_trims_flattened_text() {
        let roots = parse_document("<head>\n  Introduction\n</head>").unwrap();
        assert_eq!(roots[0].as_text(), Some("Introduction"));
    }

    #[test]
    fn test_parse_whitespace_only_content_becomes_empty_element() {
        let roots = parse_document("<p>   </p>").unwrap();
        assert_eq!(roots[0].value, NodeValue::Children(Vec::new()));
    }

    #[test]
    fn test_parse_mixed_content_keeps_text_nodes() {
        let roots = parse_document("<p>See <ref>here</ref> for more</p>").unwrap();
        let children = roots[0].children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], DocumentNode::text("See "));
        assert_eq!(children[1], DocumentNode::flat("ref", "here"));
        assert_eq!(children[2], DocumentNode::text(" for more"));
    }

    #[test]
    fn test_parse_collects_attributes() {
        let roots = parse_document(r#"<graphic url="fig1.png" height="2in"/>"#).unwrap();
        assert_eq!(roots[0].attribute("url"), Some("fig1.png"));
        assert_eq!(roots[0].attribute("height"), Some("2in"));
        assert_eq!(roots[0].attribute("missing"), None);
    }

    #[test]
    fn test_parse_strips_namespace_prefixes() {
        let xml = r#"<tei:TEI xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:text/></tei:TEI>"#;
        let roots = parse_document(xml).unwrap();
        assert_eq!(roots[0].tag, "TEI");
        assert_eq!(roots[0].children()[0].tag, "text");
    }

    #[test]
    fn test_parse_drops_comments() {
        let roots = parse_document("<p><!-- note to self -->ok</p>").unwrap();
        assert_eq!(roots[0].as_text(), Some("ok"));
    }

    #[test]
    fn test_parse_invalid_xml_is_an_error() {
        assert!(parse_document("<p>unclosed").is_err());
    }

    #[test]
    fn test_find_child() {
        let roots = parse_document("<root><a/><b/><c/></root>").unwrap();
        let root = &roots[0];

        assert!(root.find_child("a").is_some());
        assert!(root.find_child("b").is_some());
        assert!(root.find_child("d").is_none());
    }

    #[test]
    fn test_find_children() {
        let roots = parse_document("<root><item>1</item><other/><item>2</item></root>").unwrap();
        let items: Vec<_> = roots[0].find_children("item").collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_find_by_path() {
        let roots =
            parse_document("<root><level1><level2><target>found</target></level2></level1></root>")
                .unwrap();
        let root = &roots[0];

        let target = root.find_by_path("level1/level2/target");
        assert!(target.is_some());
        assert_eq!(target.and_then(DocumentNode::as_text), Some("found"));

        assert!(root.find_by_path("missing/path").is_none());
    }

    #[test]
    fn test_find_by_path_first_match_wins() {
        let xml = "<root><branch><leaf>first</leaf></branch><branch><leaf>second</leaf></branch></root>";
        let roots = parse_document(xml).unwrap();

        let leaf = roots[0].find_by_path("branch/leaf");
        assert_eq!(leaf.and_then(DocumentNode::as_text), Some("first"));
    }

    #[test]
    fn test_find_by_path_does_not_backtrack_across_siblings() {
        // The first matching branch has no leaf; lookup must not fall through
        // to the second branch once the level is matched.
        let xml = "<root><branch><other/></branch><branch><leaf>late</leaf></branch></root>";
        let roots = parse_document(xml).unwrap();

        assert!(roots[0].find_by_path("branch/leaf").is_none());
    }

    #[test]
    fn test_find_by_path_is_deterministic() {
        let roots = parse_document("<a><b><c>x</c></b></a>").unwrap();
        let first = find_by_path(&roots, "a/b/c");
        let second = find_by_path(&roots, "a/b/c");
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_find_by_path_across_roots() {
        let roots = parse_document("<TEI><teiHeader><fileDesc/></teiHeader></TEI>").unwrap();

        assert!(find_by_path(&roots, "TEI").is_some());
        assert!(find_by_path(&roots, "TEI/teiHeader/fileDesc").is_some());
        assert!(find_by_path(&roots, "other/teiHeader").is_none());
    }

    #[test]
    fn test_find_descendant_bounded_depth() {
        let roots = parse_document("<root><a><b><c>deep</c></b></a></root>").unwrap();
        let root = &roots[0];

        assert!(root.find_descendant("c", 2).is_none());
        assert!(root.find_descendant("c", 3).is_some());
        assert!(root.find_descendant("a", 1).is_some());
        assert!(root.find_descendant("missing", 10).is_none());
    }

    #[test]
    fn test_text_content_joins_fragments() {
        let roots = parse_document(
            "<persName><forename>Ada</forename> <surname>Lovelace</surname></persName>",
        )
        .unwrap();
        assert_eq!(roots[0].text_content(), "Ada Lovelace");
    }

    #[test]
    fn test_remove_empty_text_values() {
        let nodes = vec![DocumentNode::text("  "), DocumentNode::flat("p", "ok")];
        let cleaned = remove_empty_text_values(&nodes);
        assert_eq!(cleaned, vec![DocumentNode::flat("p", "ok")]);
    }

    #[test]
    fn test_remove_empty_text_values_recurses_first() {
        let nodes = vec![DocumentNode::element(
            "div",
            vec![
                DocumentNode::text("\n  "),
                DocumentNode::element("p", vec![DocumentNode::text("\t"), DocumentNode::text("x")]),
            ],
        )];
        let cleaned = remove_empty_text_values(&nodes);

        let expected = vec![DocumentNode::element(
            "div",
            vec![DocumentNode::element("p", vec![DocumentNode::text("x")])],
        )];
        assert_eq!(cleaned, expected);
    }

    #[test]
    fn test_remove_empty_text_values_keeps_flattened_elements() {
        // A non-text node with a string value is not a #text node and stays.
        let nodes = vec![DocumentNode::flat("label", "  ")];
        assert_eq!(remove_empty_text_values(&nodes), nodes);
    }

    #[test]
    fn test_remove_empty_text_values_is_idempotent() {
        let roots = parse_document("<div>\n  <p>a</p>\n  <p>b</p>\n</div>").unwrap();
        let once = remove_empty_text_values(&roots);
        let twice = remove_empty_text_values(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_json_shape_string_value() {
        let node = DocumentNode::flat("p", "ok");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"tag": "p", "value": "ok"}));
    }

    #[test]
    fn test_json_shape_children_and_attributes() {
        let node = DocumentNode::element("hi", vec![DocumentNode::text("x")])
            .with_attribute("rend", "italic");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tag": "hi",
                "attributes": {"rend": "italic"},
                "value": [{"tag": "#text", "value": "x"}],
            })
        );
    }

    #[test]
    fn test_json_round_trip() {
        let roots = parse_document(
            r##"<TEI><text><body><p>See <ref target="#x">here</ref></p></body></text></TEI>"##,
        )
        .unwrap();
        let json = serde_json::to_string(&roots).unwrap();
        let back: Vec<DocumentNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roots);
    }
}
