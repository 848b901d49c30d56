//! Nested-body assembly from flat dot-and-index paths.
//!
//! Splunk-style tools declare body parameters whose json paths encode the
//! position of each value inside the request body, e.g.
//! `filters[0].name = "env"`. This module rebuilds the nested JSON
//! structure from that flat map. Merging is order-independent: the result
//! is identical no matter how the inputs are ordered, and any ambiguity
//! (type conflicts, sparse arrays) is an error rather than a guess.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One step in a parsed body path
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Intermediate merge tree; arrays stay sparse until finalization
enum Node {
    Object(BTreeMap<String, Node>),
    Array(BTreeMap<usize, Node>),
    Leaf(Value),
}

/// Assemble a nested JSON body from `(path, value)` pairs.
///
/// Empty input yields `{}`. Fails on malformed paths, conflicting types at
/// a shared path, and gaps in array indices.
pub fn assemble<'a, I>(fields: I) -> Result<Value>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut root = Node::Object(BTreeMap::new());
    for (path, value) in fields {
        let segments = parse_path(path)?;
        insert(&mut root, String::new(), &segments, value)?;
    }
    finalize(root)
}

/// Tokenize a path like `rules[0].filters.name` into segments
fn parse_path(path: &str) -> Result<Vec<Segment>> {
    let malformed = || Error::body_path(format!("invalid body path: {path}"));
    let mut segments = Vec::new();
    for part in path.split('.') {
        let mut rest = part;
        let key_end = rest.find('[').unwrap_or(rest.len());
        let key = &rest[..key_end];
        if key.is_empty() {
            return Err(malformed());
        }
        segments.push(Segment::Key(key.to_string()));
        rest = &rest[key_end..];
        while let Some(stripped) = rest.strip_prefix('[') {
            let close = stripped.find(']').ok_or_else(malformed)?;
            let digits = &stripped[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let index = digits.parse::<usize>().map_err(|_| malformed())?;
            segments.push(Segment::Index(index));
            rest = &stripped[close + 1..];
        }
        if !rest.is_empty() {
            return Err(malformed());
        }
    }
    Ok(segments)
}

/// Insert one value, materializing intermediate objects and arrays
fn insert(node: &mut Node, parent: String, segments: &[Segment], value: &Value) -> Result<()> {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => unreachable!("parse_path never yields an empty segment list"),
    };
    let prefix = match segment {
        Segment::Key(key) if parent.is_empty() => key.clone(),
        Segment::Key(key) => format!("{parent}.{key}"),
        Segment::Index(index) => format!("{parent}[{index}]"),
    };
    let slot = match (segment, node) {
        (Segment::Key(key), Node::Object(entries)) => entries
            .entry(key.clone())
            .or_insert_with(|| empty_slot(rest)),
        (Segment::Index(index), Node::Array(entries)) => {
            entries.entry(*index).or_insert_with(|| empty_slot(rest))
        }
        // The existing container at the parent path disagrees with this
        // segment's kind.
        _ => return Err(conflict(if parent.is_empty() { &prefix } else { &parent })),
    };
    if rest.is_empty() {
        return match slot {
            Node::Leaf(existing) if existing.is_null() => {
                *existing = value.clone();
                Ok(())
            }
            // Either a duplicate leaf assignment or a container already grew
            // at this path; both are ambiguous.
            _ => Err(conflict(&prefix)),
        };
    }
    match slot {
        Node::Leaf(_) => Err(conflict(&prefix)),
        _ => insert(slot, prefix, rest, value),
    }
}

/// Empty node for the remaining path: a leaf when the path ends here
fn empty_slot(rest: &[Segment]) -> Node {
    match rest.first() {
        None => Node::Leaf(Value::Null),
        Some(next) => empty_for(next),
    }
}

/// Empty container matching the next segment's kind
fn empty_for(next: &Segment) -> Node {
    match next {
        Segment::Key(_) => Node::Object(BTreeMap::new()),
        Segment::Index(_) => Node::Array(BTreeMap::new()),
    }
}

fn conflict(prefix: &str) -> Error {
    Error::body_path(format!("conflicting types at {prefix}"))
}

/// Collapse the merge tree into a JSON value, checking array density
fn finalize(node: Node) -> Result<Value> {
    match node {
        Node::Leaf(value) => Ok(value),
        Node::Object(entries) => {
            let mut map = Map::new();
            for (key, child) in entries {
                map.insert(key, finalize(child)?);
            }
            Ok(Value::Object(map))
        }
        Node::Array(entries) => {
            let len = entries.len();
            for expected in 0..len {
                if !entries.contains_key(&expected) {
                    return Err(Error::body_path(format!(
                        "invalid body path: gap at i={expected}"
                    )));
                }
            }
            let mut items = Vec::with_capacity(len);
            for (_, child) in entries {
                items.push(finalize(child)?);
            }
            Ok(Value::Array(items))
        }
    }
}
