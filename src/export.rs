use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::MindMapDocument;
use crate::layout::TreeIndex;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("tag pattern"));

/// Markdown outline of a document: title as an H1, each root as an H2,
/// descendants as nested bullets. Rich-text notes are stripped to plain
/// text and attached as blockquotes.
pub fn generate_markdown(doc: &MindMapDocument) -> String {
    let index = TreeIndex::build(&doc.nodes);
    let mut out = format!("# {}\n\n", doc.title);

    fn traverse(id: &str, depth: usize, doc: &MindMapDocument, index: &TreeIndex, out: &mut String) {
        let Some(slot) = index.slot(id) else {
            return;
        };
        let node = &doc.nodes[slot];
        if depth == 0 {
            out.push_str(&format!("## {}\n", node.content));
        } else {
            let indent = "  ".repeat(depth - 1);
            out.push_str(&format!("{indent}- {}\n", node.content));
        }
        if let Some(note) = &node.note {
            let indent = "  ".repeat(depth.max(1) - 1);
            let plain = HTML_TAG_RE.replace_all(note, "");
            out.push_str(&format!("{indent}  > {}\n", plain.trim()));
        }
        for child_id in index.children_of(id) {
            traverse(child_id, depth + 1, doc, index, out);
        }
    }

    for root_id in index.roots() {
        traverse(root_id, 0, doc, &index, &mut out);
    }
    out
}

/// Plain-text outline: underlined title, one tab-indented line per node.
pub fn generate_plain_text(doc: &MindMapDocument) -> String {
    let index = TreeIndex::build(&doc.nodes);
    let mut out = format!("{}\n{}\n\n", doc.title, "=".repeat(doc.title.chars().count()));

    fn traverse(id: &str, depth: usize, doc: &MindMapDocument, index: &TreeIndex, out: &mut String) {
        let Some(slot) = index.slot(id) else {
            return;
        };
        out.push_str(&format!("{}{}\n", "\t".repeat(depth), doc.nodes[slot].content));
        for child_id in index.children_of(id) {
            traverse(child_id, depth + 1, doc, index, out);
        }
    }

    for root_id in index.roots() {
        traverse(root_id, 0, doc, &index, &mut out);
    }
    out
}
