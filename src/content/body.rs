//! Top node scoring.
//!
//! Paragraph-like nodes with enough stopwords and few links vote for their
//! parent (full score) and grandparent (half score). The highest-scoring
//! parent is the top node. Early paragraphs preceded by other wordy
//! paragraphs get a boost; on long pages the last quarter is penalised.

use std::collections::HashMap;

use dom_query::{Document, NodeId, NodeRef, Selection};

use crate::dom;
use crate::nlp::StopWords;

use super::{TopNode, TopNodeResolver};

/// Nodes that can carry body text.
const CANDIDATE_SELECTOR: &str = "p, pre, td";

/// A candidate needs more stopwords than this.
const MIN_CANDIDATE_STOPWORDS: usize = 2;

/// Boost base for paragraphs preceded by wordy paragraphs.
const BOOST_SCORE: f64 = 50.0;

/// A preceding paragraph counts for the boost above this many stopwords.
const BOOST_MIN_STOPWORDS: usize = 5;

/// Preceding paragraphs inspected for the boost.
const BOOST_MAX_STEPS: usize = 3;

/// Pages with more candidates than this penalise their tail.
const NEGATIVE_SCORING_MIN_NODES: usize = 15;

/// Sibling paragraphs need this share of the top node's average stopwords.
const SIBLING_THRESHOLD: f64 = 0.3;

/// Baseline used when the top node has no scorable paragraphs.
const DEFAULT_SIBLING_BASELINE: f64 = 100_000.0;

/// Stopword density scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityScorer;

impl TopNodeResolver for DensityScorer {
    fn resolve(&self, doc: &Document, stopwords: &StopWords) -> Option<TopNode> {
        let top = top_node(doc, stopwords)?;
        tracing::debug!(tag = ?dom::tag_name(&top), "resolved top node");
        Some(TopNode {
            node: dom::detached_copy(&top),
            complemented: complement(&top, stopwords),
        })
    }
}

/// Linked words per word, multiplied by the number of links.
#[must_use]
pub fn link_density(sel: &Selection) -> f64 {
    let links = sel.select("a");
    if links.is_empty() {
        return 0.0;
    }
    let words = sel.text().split_whitespace().count();
    if words == 0 {
        return 0.0;
    }
    let link_words: usize = links
        .nodes()
        .iter()
        .map(|link| link.text().split_whitespace().count())
        .sum();

    link_words as f64 / words as f64 * links.length() as f64
}

/// Whether a node is mostly links.
#[must_use]
pub fn is_high_link_density(sel: &Selection) -> bool {
    link_density(sel) >= 1.0
}

/// The best-scoring container in `doc`.
#[must_use]
pub fn top_node<'a>(doc: &'a Document, stopwords: &StopWords) -> Option<Selection<'a>> {
    let candidates: Vec<(Selection<'a>, usize)> = doc
        .select(CANDIDATE_SELECTOR)
        .nodes()
        .iter()
        .filter_map(|node| {
            let sel = Selection::from(*node);
            let count = stopwords.stats(&sel.text()).stopword_count;
            (count > MIN_CANDIDATE_STOPWORDS && !is_high_link_density(&sel)).then_some((sel, count))
        })
        .collect();

    let total = candidates.len();
    let bottom_negative = total as f64 * 0.25;
    let mut starting_boost = 1.0;

    let mut scores: HashMap<NodeId, f64> = HashMap::new();
    let mut order: Vec<NodeRef<'a>> = Vec::new();
    let mut add = |node: NodeRef<'a>, delta: f64| {
        *scores.entry(node.id).or_insert_with(|| {
            order.push(node);
            0.0
        }) += delta;
    };

    for (i, (sel, stopword_count)) in candidates.iter().enumerate() {
        let mut boost = 0.0;
        if is_boostable(sel, stopwords) {
            boost = BOOST_SCORE / starting_boost;
            starting_boost += 1.0;
        }
        if total > NEGATIVE_SCORING_MIN_NODES {
            let remaining = (total - i) as f64;
            if remaining <= bottom_negative {
                boost = -(bottom_negative - remaining).powi(2);
                if boost.abs() > 40.0 {
                    boost = 5.0;
                }
            }
        }

        let upscore = *stopword_count as f64 + boost;
        let Some(parent) = element_parent(sel) else {
            continue;
        };
        add(parent, upscore);
        if let Some(grandparent) = parent.parent().filter(NodeRef::is_element) {
            add(grandparent, upscore / 2.0);
        }
    }

    let mut best: Option<(NodeRef<'a>, f64)> = None;
    for node in order {
        let score = scores.get(&node.id).copied().unwrap_or_default();
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((node, score)),
        }
    }
    best.map(|(node, _)| Selection::from(node))
}

fn element_parent<'a>(sel: &Selection<'a>) -> Option<NodeRef<'a>> {
    sel.nodes().first()?.parent().filter(NodeRef::is_element)
}

/// A wordy paragraph within the previous few paragraphs.
fn is_boostable(sel: &Selection, stopwords: &StopWords) -> bool {
    let mut steps = 0;
    for sibling in dom::previous_element_siblings(sel) {
        if dom::tag_name(&sibling).as_deref() != Some("p") {
            continue;
        }
        if steps >= BOOST_MAX_STEPS {
            return false;
        }
        if stopwords.stats(&sibling.text()).stopword_count > BOOST_MIN_STOPWORDS {
            return true;
        }
        steps += 1;
    }
    false
}

/// Copy of `top` with qualifying preceding content prepended.
///
/// A preceding `p` sibling with text is always taken. Other siblings
/// contribute their paragraphs whose stopword count beats 30% of the top
/// node's average and that are not link lists.
fn complement(top: &Selection, stopwords: &StopWords) -> Document {
    let baseline = siblings_baseline(top, stopwords);
    let threshold = baseline * SIBLING_THRESHOLD;

    let mut prefix: Vec<String> = Vec::new();
    for sibling in dom::previous_element_siblings(top) {
        let mut found = Vec::new();
        if dom::tag_name(&sibling).as_deref() == Some("p") {
            if !dom::normalized_text(&sibling).is_empty() {
                found.push(dom::outer_html(&sibling).to_string());
            }
        } else {
            for node in sibling.select("p").nodes() {
                let paragraph = Selection::from(*node);
                let text = paragraph.text();
                if text.trim().is_empty() {
                    continue;
                }
                let score = stopwords.stats(&text).stopword_count as f64;
                if score > threshold && !is_high_link_density(&paragraph) {
                    found.push(dom::outer_html(&paragraph).to_string());
                }
            }
        }
        // siblings arrive nearest first
        found.extend(prefix);
        prefix = found;
    }

    let complemented = dom::detached_copy(top);
    if !prefix.is_empty() {
        if let Some(root) = dom::root_element(&complemented) {
            let html = format!("{}{}", prefix.concat(), root.inner_html());
            dom::set_inner_html(&root, &html);
        }
    }
    complemented
}

/// Average stopword count of the scorable paragraphs inside `top`.
fn siblings_baseline(top: &Selection, stopwords: &StopWords) -> f64 {
    let counts: Vec<usize> = top
        .select("p")
        .nodes()
        .iter()
        .filter_map(|node| {
            let paragraph = Selection::from(*node);
            let count = stopwords.stats(&paragraph.text()).stopword_count;
            (count > MIN_CANDIDATE_STOPWORDS && !is_high_link_density(&paragraph)).then_some(count)
        })
        .collect();

    if counts.is_empty() {
        DEFAULT_SIBLING_BASELINE
    } else {
        counts.iter().sum::<usize>() as f64 / counts.len() as f64
    }
}
