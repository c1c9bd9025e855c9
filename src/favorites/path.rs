//! Positional addressing into the favorites forest.
//!
//! A path is a sequence of child indices: `path[0]` indexes the top-level
//! items, `path[1]` that node's children, and so on. Paths describe position
//! only and go stale as soon as an earlier sibling is inserted or removed.

use super::node::Node;

/// Owned positional address of a node.
pub type NodePath = Vec<usize>;

/// Resolve `path` to a node. `None` if any index is out of range, an
/// intermediate node is a link, or the path is empty.
pub fn resolve<'a>(items: &'a [Node], path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = items.get(*first)?;
    for &index in rest {
        node = node.children()?.get(index)?;
    }
    Some(node)
}

/// Mutable twin of [`resolve`].
pub fn resolve_mut<'a>(items: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = items.get_mut(*first)?;
    for &index in rest {
        node = node.children_mut()?.get_mut(index)?;
    }
    Some(node)
}

/// Resolve the sibling list that contains `path` and the index within it.
///
/// The index is not range-checked so callers can address one-past-the-end
/// for appends.
pub fn resolve_parent<'a>(items: &'a [Node], path: &[usize]) -> Option<(&'a [Node], usize)> {
    let (&index, prefix) = path.split_last()?;
    if prefix.is_empty() {
        return Some((items, index));
    }
    let children = resolve(items, prefix)?.children()?;
    Some((children, index))
}

/// Mutable twin of [`resolve_parent`].
pub fn resolve_parent_mut<'a>(
    items: &'a mut Vec<Node>,
    path: &[usize],
) -> Option<(&'a mut Vec<Node>, usize)> {
    let (&index, prefix) = path.split_last()?;
    if prefix.is_empty() {
        return Some((items, index));
    }
    let children = resolve_mut(items, prefix)?.children_mut()?;
    Some((children, index))
}

pub fn paths_equal(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// True iff `candidate` lies strictly below `ancestor`.
pub fn is_descendant(candidate: &[usize], ancestor: &[usize]) -> bool {
    candidate.len() > ancestor.len() && candidate.starts_with(ancestor)
}

/// Recompute `target` after the node at `removed` has been spliced out.
///
/// Only a same-depth sibling removed before the target shifts it; every other
/// combination returns the target unchanged.
pub fn adjust_path_after_removal(target: &[usize], removed: &[usize]) -> NodePath {
    let mut adjusted = target.to_vec();
    if removed.is_empty() || removed.len() != target.len() {
        return adjusted;
    }
    let depth = removed.len() - 1;
    if removed[..depth] == target[..depth] && removed[depth] < target[depth] {
        adjusted[depth] -= 1;
    }
    adjusted
}

/// Follow a remembered path across the removal of the node at `removed`.
///
/// Unlike [`adjust_path_after_removal`] this also shifts deeper paths whose
/// ancestor was a later sibling of the removed node. `None` if `target` was
/// the removed node or lay inside it.
pub fn track_removal(target: &[usize], removed: &[usize]) -> Option<NodePath> {
    let Some((&index, prefix)) = removed.split_last() else {
        return Some(target.to_vec());
    };
    if target.starts_with(removed) {
        return None;
    }
    let mut tracked = target.to_vec();
    let depth = prefix.len();
    if tracked.len() > depth && tracked[..depth] == *prefix && index < tracked[depth] {
        tracked[depth] -= 1;
    }
    Some(tracked)
}

/// Follow a remembered path across an insertion that landed at `inserted`.
pub fn track_insertion(target: &[usize], inserted: &[usize]) -> NodePath {
    let mut tracked = target.to_vec();
    let Some((&index, prefix)) = inserted.split_last() else {
        return tracked;
    };
    let depth = prefix.len();
    if tracked.len() > depth && tracked[..depth] == *prefix && index <= tracked[depth] {
        tracked[depth] += 1;
    }
    tracked
}

/// Render a path as `[0, 2, 1]` for messages and logs.
pub fn format_path(path: &[usize]) -> String {
    format!("{:?}", path)
}
