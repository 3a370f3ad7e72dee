//! Structural diff over serialized document trees.
//!
//! A pure function: given two `serde_json::Value`s it produces a [`Delta`]
//! describing what changed, or `None` when the trees are equal. Nothing in
//! here knows about documents specifically; the history store feeds it the
//! serialized trees of consecutive snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tuning knobs for [`diff`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// When `true`, equal values that changed position inside an array are
    /// reported as moves instead of a change per index. History diffs keep
    /// this off.
    pub detect_moves: bool,
    /// Strings at least this long on both sides are reported as an inline
    /// [`Delta::Text`] edit rather than a wholesale [`Delta::Changed`].
    pub text_diff_min_length: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            detect_moves: false,
            text_diff_min_length: 1,
        }
    }
}

/// One node of a structural diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Delta {
    /// Present on the right side only.
    Added(Value),
    /// Present on the left side only.
    Removed(Value),
    /// Replaced wholesale.
    Changed { from: Value, to: Value },
    /// Inline text edit between two strings.
    Text { from: String, to: String },
    /// Per-key changes inside an object.
    Object(BTreeMap<String, Delta>),
    /// Changes inside an array.
    Array(ArrayDelta),
}

/// Changes inside an array, keyed by index.
///
/// `changed` and `added` are keyed by right-side index, `removed` by
/// left-side index. `moved` is only populated when move detection is on.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ArrayDelta {
    pub changed: BTreeMap<usize, Delta>,
    pub added: BTreeMap<usize, Value>,
    pub removed: BTreeMap<usize, Value>,
    pub moved: Vec<ArrayMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayMove {
    pub from: usize,
    pub to: usize,
}

impl ArrayDelta {
    fn is_empty(&self) -> bool {
        self.changed.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
    }
}

/// Diff two serialized trees. `None` means equal.
pub fn diff(left: &Value, right: &Value, opts: &DiffOptions) -> Option<Delta> {
    if left == right {
        return None;
    }

    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            let mut entries = BTreeMap::new();
            for (key, lv) in l {
                match r.get(key) {
                    Some(rv) => {
                        if let Some(delta) = diff(lv, rv, opts) {
                            entries.insert(key.clone(), delta);
                        }
                    }
                    None => {
                        entries.insert(key.clone(), Delta::Removed(lv.clone()));
                    }
                }
            }
            for (key, rv) in r {
                if !l.contains_key(key) {
                    entries.insert(key.clone(), Delta::Added(rv.clone()));
                }
            }
            if entries.is_empty() {
                None
            } else {
                Some(Delta::Object(entries))
            }
        }
        (Value::Array(l), Value::Array(r)) => {
            let delta = if opts.detect_moves {
                diff_array_with_moves(l, r, opts)
            } else {
                diff_array_indexed(l, r, opts)
            };
            if delta.is_empty() {
                None
            } else {
                Some(Delta::Array(delta))
            }
        }
        (Value::String(l), Value::String(r))
            if l.chars().count() >= opts.text_diff_min_length
                && r.chars().count() >= opts.text_diff_min_length =>
        {
            Some(Delta::Text {
                from: l.clone(),
                to: r.clone(),
            })
        }
        _ => Some(Delta::Changed {
            from: left.clone(),
            to: right.clone(),
        }),
    }
}

/// Index-aligned array diff: common indices recurse, the longer side's tail
/// becomes additions or removals.
fn diff_array_indexed(left: &[Value], right: &[Value], opts: &DiffOptions) -> ArrayDelta {
    let mut delta = ArrayDelta::default();
    let common = left.len().min(right.len());

    for index in 0..common {
        if let Some(entry) = diff(&left[index], &right[index], opts) {
            delta.changed.insert(index, entry);
        }
    }
    for (index, value) in right.iter().enumerate().skip(common) {
        delta.added.insert(index, value.clone());
    }
    for (index, value) in left.iter().enumerate().skip(common) {
        delta.removed.insert(index, value.clone());
    }

    delta
}

/// Equality-matching array diff: items found verbatim on both sides pair up
/// (as moves when their index changed), leftovers at a shared index recurse,
/// the rest become additions and removals.
fn diff_array_with_moves(left: &[Value], right: &[Value], opts: &DiffOptions) -> ArrayDelta {
    let mut delta = ArrayDelta::default();
    let mut left_matched = vec![false; left.len()];
    let mut right_matched = vec![false; right.len()];

    for (from, value) in left.iter().enumerate() {
        let found = right
            .iter()
            .enumerate()
            .find(|(to, candidate)| !right_matched[*to] && *candidate == value);
        if let Some((to, _)) = found {
            left_matched[from] = true;
            right_matched[to] = true;
            if from != to {
                delta.moved.push(ArrayMove { from, to });
            }
        }
    }

    for index in 0..left.len().min(right.len()) {
        if left_matched[index] || right_matched[index] {
            continue;
        }
        left_matched[index] = true;
        right_matched[index] = true;
        if let Some(entry) = diff(&left[index], &right[index], opts) {
            delta.changed.insert(index, entry);
        }
    }

    for (index, value) in left.iter().enumerate() {
        if !left_matched[index] {
            delta.removed.insert(index, value.clone());
        }
    }
    for (index, value) in right.iter().enumerate() {
        if !right_matched[index] {
            delta.added.insert(index, value.clone());
        }
    }

    delta
}
