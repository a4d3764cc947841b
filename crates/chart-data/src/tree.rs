//! Import-forest reconstruction for importtime-chart.
//!
//! Rebuilds the nested import hierarchy from the flat, indentation-coded
//! record sequence and flattens it into parent-attributed duration records.
//! `-X importtime` writes entries post-order: a package's nested imports are
//! logged before the package itself, so the builder absorbs still-open deeper
//! entries into each arriving shallower one.

use chart_core::models::{FlatRecord, ImportNode, TimingRecord};
use tracing::debug;

// ── Forest construction ───────────────────────────────────────────────────────

/// Reconstruct the forest of top-level import trees from parsed records.
///
/// Single forward pass maintaining a stack of still-open nodes:
/// 1. The first record overall primes the stack, whatever its depth.
/// 2. A depth-1 record closes the current tree: the entire stack (in stack
///    order) becomes its children and the node moves to the output.
/// 3. Equal depth to the stack top → sibling, pushed.
/// 4. Shallower than the stack top → the candidate absorbs every entry
///    strictly deeper than itself as children and takes their place; entries
///    at the candidate's own depth stay behind as its siblings.
/// 5. Deeper than the stack top (or empty stack after a close) → pushed.
///
/// Records still on the stack at end of input belong to a tree that was never
/// closed by a depth-1 record and are dropped from the output.
pub fn build_forest(records: &[TimingRecord]) -> Vec<ImportNode> {
    let mut forest: Vec<ImportNode> = Vec::new();
    let mut stack: Vec<ImportNode> = Vec::new();

    for record in records {
        let mut candidate = ImportNode::from(record);

        // First record overall primes the stack.
        if forest.is_empty() && stack.is_empty() {
            stack.push(candidate);
            continue;
        }

        if record.depth == 1 {
            // New top-level import: everything still open is its subtree.
            candidate.children = std::mem::take(&mut stack);
            forest.push(candidate);
        } else if let Some(top) = stack.last() {
            if top.depth == record.depth {
                stack.push(candidate);
            } else if top.depth > record.depth {
                // Stack depths are non-decreasing bottom to top, so the
                // strictly-deeper entries form a suffix. They were all
                // imported from inside the candidate.
                let split = stack
                    .iter()
                    .position(|node| node.depth > record.depth)
                    .unwrap_or(stack.len());
                candidate.children = stack.split_off(split);
                stack.push(candidate);
            } else {
                stack.push(candidate);
            }
        } else {
            stack.push(candidate);
        }
    }

    if !stack.is_empty() {
        debug!(
            "build_forest: {} record(s) without a closing depth-1 entry dropped",
            stack.len()
        );
    }

    forest
}

// ── Flattening ────────────────────────────────────────────────────────────────

/// Flatten the forest into the ordered sequence of duration records.
///
/// For each top-level node, every leaf in its subtree yields one record
/// attributed to the top-level name (not the immediate parent), in discovery
/// order, followed by one self-record for the top-level node itself. The self
/// time of internal nodes is not emitted.
pub fn flatten_forest(forest: &[ImportNode]) -> Vec<FlatRecord> {
    let mut records = Vec::new();

    for tree in forest {
        collect_leaves(&tree.children, &tree.name, &mut records);
        records.push(FlatRecord {
            parent_import: tree.name.clone(),
            package: tree.name.clone(),
            duration_micros: tree.self_micros,
        });
    }

    records
}

/// Depth-first walk emitting one record per leaf, all attributed to the fixed
/// top-level `parent` name.
fn collect_leaves(children: &[ImportNode], parent: &str, records: &mut Vec<FlatRecord>) {
    for child in children {
        if child.is_leaf() {
            records.push(FlatRecord {
                parent_import: parent.to_string(),
                package: child.name.clone(),
                duration_micros: child.self_micros,
            });
        } else {
            collect_leaves(&child.children, parent, records);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
