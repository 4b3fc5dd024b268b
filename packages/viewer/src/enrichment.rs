//! Lexical enrichment terms and their deduplication.
//!
//! Enrichment overlays annotate a document with terms grouped by category
//! membership. Term lists nest, and the same term often appears both at an
//! outer level and again inside a sibling's subtree; display keeps only the
//! most specific occurrence. [`remove_duplicate_nested_terms`] implements
//! that rule as a pure tree-to-tree transform.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::node::DocumentNode;

/// A lexical enrichment term with group memberships and nested sub-terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The term text.
    pub term: String,
    /// Category groups this term belongs to.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub groups: BTreeSet<String>,
    /// More specific terms nested under this one.
    #[serde(
        rename = "subTerms",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_terms: Vec<Term>,
}

impl Term {
    /// Create a term with no groups and no sub-terms.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            groups: BTreeSet::new(),
            sub_terms: Vec::new(),
        }
    }

    /// Add a group membership (builder style).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    /// Add a nested sub-term (builder style).
    #[must_use]
    pub fn with_sub_term(mut self, sub_term: Term) -> Self {
        self.sub_terms.push(sub_term);
        self
    }

    /// Build a term from a `<term>` node.
    ///
    /// The term text is the node's own text content, excluding nested term
    /// elements, which become sub-terms instead. Groups come from the `ana`
    /// attribute: whitespace-separated references with any leading `#`
    /// stripped.
    ///
    /// # Returns
    /// The term, or `None` when the node carries no usable text
    #[must_use]
    pub fn from_node(node: &DocumentNode) -> Option<Self> {
        let mut fragments: Vec<String> = Vec::new();
        let mut sub_terms: Vec<Term> = Vec::new();

        match node.as_text() {
            Some(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    fragments.push(trimmed.to_string());
                }
            }
            None => {
                for child in node.children() {
                    if child.tag == "term" {
                        if let Some(sub_term) = Term::from_node(child) {
                            sub_terms.push(sub_term);
                        }
                    } else {
                        let text = child.text_content();
                        if !text.is_empty() {
                            fragments.push(text);
                        }
                    }
                }
            }
        }

        let term = fragments.join(" ");
        if term.is_empty() && sub_terms.is_empty() {
            return None;
        }

        let groups = node
            .attribute("ana")
            .map(parse_group_refs)
            .unwrap_or_default();

        Some(Self {
            term,
            groups,
            sub_terms,
        })
    }
}

/// Parse an `ana` attribute value into a group set.
fn parse_group_refs(value: &str) -> BTreeSet<String> {
    value
        .split_whitespace()
        .map(|reference| reference.trim_start_matches('#').to_string())
        .filter(|group| !group.is_empty())
        .collect()
}

/// Extract the term list from a `<keywords>` node.
#[must_use]
pub fn terms_from_keywords(keywords: &DocumentNode) -> Vec<Term> {
    keywords
        .find_children("term")
        .filter_map(Term::from_node)
        .collect()
}

/// Remove terms that reappear, at least as specifically, inside a sibling's
/// subtree.
///
/// A term is dropped when some strict sibling has a descendant with the same
/// term text whose group set contains all of the dropped term's groups; the
/// nested occurrence is the more specific one and wins. Siblings themselves
/// are not candidates, so identical siblings survive side by side. The rule
/// is applied recursively to the subtrees that remain.
///
/// Sibling subtrees are checked in order and the first match decides; since
/// every match leads to the same drop, the order does not affect the result.
///
/// # Examples
/// ```
/// use recto_viewer::enrichment::{remove_duplicate_nested_terms, Term};
///
/// let terms = vec![
///     Term::new("America").with_group("g1"),
///     Term::new("States").with_sub_term(Term::new("America").with_group("g1")),
/// ];
/// let deduped = remove_duplicate_nested_terms(&terms);
/// assert_eq!(deduped.len(), 1);
/// assert_eq!(deduped[0].term, "States");
/// ```
#[must_use]
pub fn remove_duplicate_nested_terms(terms: &[Term]) -> Vec<Term> {
    terms
        .iter()
        .enumerate()
        .filter(|(index, term)| !has_nested_duplicate(terms, *index, term))
        .map(|(_, term)| Term {
            term: term.term.clone(),
            groups: term.groups.clone(),
            sub_terms: remove_duplicate_nested_terms(&term.sub_terms),
        })
        .collect()
}

/// Whether any strict sibling's subtree contains a match for `term`.
fn has_nested_duplicate(siblings: &[Term], index: usize, term: &Term) -> bool {
    siblings
        .iter()
        .enumerate()
        .filter(|(sibling_index, _)| *sibling_index != index)
        .any(|(_, sibling)| {
            sibling
                .sub_terms
                .iter()
                .any(|descendant| subtree_contains(descendant, term))
        })
}

/// Whether `root` or any of its descendants matches `term`.
fn subtree_contains(root: &Term, term: &Term) -> bool {
    matches(root, term)
        || root
            .sub_terms
            .iter()
            .any(|child| subtree_contains(child, term))
}

/// Match rule: same term text, and the candidate's groups cover the
/// target's. Equal group sets are the boundary case of coverage.
fn matches(candidate: &Term, target: &Term) -> bool {
    candidate.term == target.term && target.groups.is_subset(&candidate.groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::node::parse_document;

    fn term(text: &str, groups: &[&str]) -> Term {
        let mut result = Term::new(text);
        for group in groups {
            result = result.with_group(*group);
        }
        result
    }

    #[test]
    fn test_dedup_keeps_nested_occurrence() {
        // "America" appears both as an outer entry and, more specifically,
        // nested under a sibling; only the nested occurrence survives.
        let terms = vec![term("United States of America", &["g1"])
            .with_sub_term(term("America", &["g1", "g2"]))
            .with_sub_term(
                term("States of America", &["g1", "g3"])
                    .with_sub_term(term("America", &["g1", "g3", "g2"])),
            )];

        let expected = vec![term("United States of America", &["g1"]).with_sub_term(
            term("States of America", &["g1", "g3"])
                .with_sub_term(term("America", &["g1", "g3", "g2"])),
        )];

        assert_eq!(remove_duplicate_nested_terms(&terms), expected);
    }

    #[test]
    fn test_dedup_never_removes_unmatched_terms() {
        let terms = vec![
            term("alpha", &["g1"]).with_sub_term(term("beta", &["g1"])),
            term("gamma", &["g2"]).with_sub_term(term("delta", &["g2"])),
        ];
        assert_eq!(remove_duplicate_nested_terms(&terms), terms);
    }

    #[test]
    fn test_dedup_requires_group_coverage() {
        // The nested occurrence carries fewer groups than the outer one, so
        // it is not at least as specific and the outer term stays.
        let terms = vec![
            term("alpha", &["g1", "g2"]),
            term("beta", &[]).with_sub_term(term("alpha", &["g1"])),
        ];
        assert_eq!(remove_duplicate_nested_terms(&terms), terms);
    }

    #[test]
    fn test_dedup_identical_siblings_survive() {
        // Siblings are not candidates for each other; only nested
        // occurrences win.
        let terms = vec![term("alpha", &["g1"]), term("alpha", &["g1"])];
        assert_eq!(remove_duplicate_nested_terms(&terms), terms);
    }

    #[test]
    fn test_dedup_empty_group_sets_match() {
        let terms = vec![
            term("alpha", &[]),
            term("beta", &[]).with_sub_term(term("alpha", &[])),
        ];
        let expected = vec![term("beta", &[]).with_sub_term(term("alpha", &[]))];
        assert_eq!(remove_duplicate_nested_terms(&terms), expected);
    }

    #[test]
    fn test_dedup_recurses_into_kept_subtrees() {
        // The duplicate pair sits one level down, inside a kept term.
        let root = term("outer", &[])
            .with_sub_term(term("x", &["g"]))
            .with_sub_term(term("y", &[]).with_sub_term(term("x", &["g"])));

        let deduped = remove_duplicate_nested_terms(&[root]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].sub_terms.len(), 1);
        assert_eq!(deduped[0].sub_terms[0].term, "y");
    }

    #[test]
    fn test_dedup_group_order_is_irrelevant() {
        let terms = vec![
            term("alpha", &["g2", "g1"]),
            term("beta", &[]).with_sub_term(term("alpha", &["g1", "g2"])),
        ];
        let deduped = remove_duplicate_nested_terms(&terms);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].term, "beta");
    }

    #[test]
    fn test_term_from_node_splits_ana_groups() {
        let roots = parse_document(r##"<term ana="#g1 #g2">America</term>"##).unwrap();
        let term = Term::from_node(&roots[0]).unwrap();

        assert_eq!(term.term, "America");
        assert_eq!(
            term.groups,
            BTreeSet::from(["g1".to_string(), "g2".to_string()])
        );
        assert!(term.sub_terms.is_empty());
    }

    #[test]
    fn test_term_from_node_excludes_nested_term_text() {
        let xml = r##"<term ana="#g1">United States<term ana="#g2">America</term></term>"##;
        let roots = parse_document(xml).unwrap();
        let term = Term::from_node(&roots[0]).unwrap();

        assert_eq!(term.term, "United States");
        assert_eq!(term.sub_terms.len(), 1);
        assert_eq!(term.sub_terms[0].term, "America");
    }

    #[test]
    fn test_term_from_empty_node_is_none() {
        let roots = parse_document("<term></term>").unwrap();
        assert_eq!(Term::from_node(&roots[0]), None);
    }

    #[test]
    fn test_terms_from_keywords() {
        let xml = "<keywords><term>parsing</term><term>rendering</term><label>skip me</label></keywords>";
        let roots = parse_document(xml).unwrap();
        let terms = terms_from_keywords(&roots[0]);

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term, "parsing");
        assert_eq!(terms[1].term, "rendering");
    }

    #[test]
    fn test_term_json_shape() {
        let value = serde_json::to_value(term("America", &["g1"])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"term": "America", "groups": ["g1"]})
        );

        let nested: Term = serde_json::from_value(serde_json::json!({
            "term": "USA",
            "subTerms": [{"term": "America"}],
        }))
        .unwrap();
        assert_eq!(nested.sub_terms.len(), 1);
        assert!(nested.groups.is_empty());
    }
}
