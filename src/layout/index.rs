use std::collections::HashMap;

use crate::document::MapNode;

/// Adjacency index over a flat node list: id -> slice position, plus
/// parent id -> child ids in input order. Sibling order carries layout
/// meaning, so insertion order is preserved verbatim.
#[derive(Debug, Default)]
pub struct TreeIndex {
    slots: HashMap<String, usize>,
    children: HashMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl TreeIndex {
    pub fn build(nodes: &[MapNode]) -> Self {
        let mut slots = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            slots.insert(node.id.clone(), idx);
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut roots = Vec::new();
        for node in nodes {
            match &node.parent_id {
                None => roots.push(node.id.clone()),
                Some(parent_id) => {
                    // A dangling parent id orphans the node: it stays out
                    // of the child map and is never reached by traversal.
                    if slots.contains_key(parent_id.as_str()) {
                        children
                            .entry(parent_id.clone())
                            .or_default()
                            .push(node.id.clone());
                    }
                }
            }
        }

        Self {
            slots,
            children,
            roots,
        }
    }

    pub fn slot(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn root(&self) -> Option<&str> {
        self.roots.first().map(String::as_str)
    }
}
