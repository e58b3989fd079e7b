//! Path-addressed lookup, insertion, removal and traversal over a [`Group`] tree.
//!
//! A path is a sequence of group identifiers, optionally followed by a unit
//! identifier. Lookups return `None` when a segment does not resolve; insertions and
//! removals do the same and leave the tree untouched.
//!
//! ```rust
//! use xledit::tree::{create_group, create_unit, find_group, get_unit};
//! use xledit::types::{Group, Unit};
//!
//! let mut root = Group::root();
//! create_group(&mut root, &Group::new("menu", vec!["menu".into()]));
//! create_unit(&mut root, &Unit::new("open", vec!["menu".into()], "Open"));
//!
//! assert!(find_group(&root, &["menu"]).is_some());
//! assert_eq!(get_unit(&root, &["menu", "open"]).map(|u| u.source_text()), Some("Open"));
//! ```

use std::collections::VecDeque;

use crate::types::{Group, Unit};

/// A visited tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Unit(&'a Unit),
    Group(&'a Group),
}

impl Node<'_> {
    pub fn id(&self) -> &str {
        match self {
            Node::Unit(unit) => &unit.id,
            Node::Group(group) => &group.id,
        }
    }
}

/// Descends one segment at a time. An empty path returns `root` itself.
pub fn find_group<'a, S: AsRef<str>>(root: &'a Group, path: &[S]) -> Option<&'a Group> {
    path.iter().try_fold(root, |group, segment| {
        group.groups.iter().find(|g| g.id == segment.as_ref())
    })
}

pub fn find_group_mut<'a, S: AsRef<str>>(
    root: &'a mut Group,
    path: &[S],
) -> Option<&'a mut Group> {
    let mut current = root;
    for segment in path {
        current = current
            .groups
            .iter_mut()
            .find(|g| g.id == segment.as_ref())?;
    }
    Some(current)
}

/// Resolves all but the last segment as groups, then looks the last one up among
/// that group's units.
pub fn get_unit<'a, S: AsRef<str>>(root: &'a Group, path: &[S]) -> Option<&'a Unit> {
    let (id, groups) = path.split_last()?;
    find_group(root, groups)?
        .units
        .iter()
        .find(|unit| unit.id == id.as_ref())
}

pub fn get_unit_mut<'a, S: AsRef<str>>(root: &'a mut Group, path: &[S]) -> Option<&'a mut Unit> {
    let (id, groups) = path.split_last()?;
    find_group_mut(root, groups)?
        .units
        .iter_mut()
        .find(|unit| unit.id == id.as_ref())
}

/// Appends a clone of `template` at the position its path describes.
///
/// A group's path ends with its own identifier, so only the segments before it are
/// descended. Returns the inserted copy.
pub fn create_group<'a>(root: &'a mut Group, template: &Group) -> Option<&'a mut Group> {
    let parent_path = match template.path.split_last() {
        Some((_, parent)) => parent,
        None => &[],
    };
    let parent = find_group_mut(root, parent_path)?;
    parent.groups.push(template.clone());
    parent.groups.last_mut()
}

/// Appends a clone of `template` to the group its path names.
///
/// A unit's path does not contain its own identifier, so every segment is descended.
pub fn create_unit<'a>(root: &'a mut Group, template: &Unit) -> Option<&'a mut Unit> {
    let parent = find_group_mut(root, &template.path)?;
    parent.units.push(template.clone());
    parent.units.last_mut()
}

/// Detaches the group at `path` from its parent and returns it.
pub fn remove_group<S: AsRef<str>>(root: &mut Group, path: &[S]) -> Option<Group> {
    let (id, parent_path) = path.split_last()?;
    let parent = find_group_mut(root, parent_path)?;
    let index = parent.groups.iter().position(|g| g.id == id.as_ref())?;
    Some(parent.groups.remove(index))
}

/// Whether any unit in the subtree satisfies `predicate`. Stops at the first match.
pub fn have_unit<F>(group: &Group, mut predicate: F) -> bool
where
    F: FnMut(&Unit) -> bool,
{
    have_unit_in(group, &mut predicate)
}

fn have_unit_in<F>(group: &Group, predicate: &mut F) -> bool
where
    F: FnMut(&Unit) -> bool,
{
    group.units.iter().any(|unit| predicate(unit))
        || group.groups.iter().any(|nested| have_unit_in(nested, predicate))
}

/// Visits the whole subtree synchronously.
///
/// At each level the units come first, then every nested group, each followed
/// immediately by its own contents.
pub fn for_each<'a, F>(group: &'a Group, visitor: &mut F)
where
    F: FnMut(Node<'a>),
{
    for unit in &group.units {
        visitor(Node::Unit(unit));
    }
    for nested in &group.groups {
        visitor(Node::Group(nested));
        for_each(nested, visitor);
    }
}

/// Starts a deferred traversal of `root`. See [`Walk`].
pub fn walk(root: &Group) -> Walk<'_> {
    Walk::new(root)
}

/// The contents of one group, as produced by one [`Walk`] step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<'a> {
    pub group: &'a Group,
    /// The group's units followed by its nested groups, in document order.
    pub nodes: Vec<Node<'a>>,
}

/// Traversal that hands out one group's direct contents per step.
///
/// Descent into nested groups is queued rather than performed, so the caller decides
/// when the next step runs, and can stop at any point by not pumping any further or by
/// calling [`Walk::cancel`]. Nested groups are expanded in the order they were
/// discovered. The sequence is finite and [`Walk::restart`] rewinds it.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    root: &'a Group,
    pending: VecDeque<&'a Group>,
}

impl<'a> Walk<'a> {
    pub fn new(root: &'a Group) -> Self {
        Self {
            root,
            pending: VecDeque::from([root]),
        }
    }

    /// Rewinds to the beginning.
    pub fn restart(&mut self) {
        self.pending.clear();
        self.pending.push_back(self.root);
    }

    /// Drops every pending step; the walk is finished afterwards.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs one step, feeding its nodes to `visitor`. Returns `false` once the walk is
    /// finished.
    pub fn pump<F>(&mut self, visitor: &mut F) -> bool
    where
        F: FnMut(Node<'a>),
    {
        match self.next() {
            Some(step) => {
                step.nodes.into_iter().for_each(&mut *visitor);
                true
            }
            None => false,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.pending.pop_front()?;
        let mut nodes = Vec::with_capacity(group.units.len() + group.groups.len());
        nodes.extend(group.units.iter().map(Node::Unit));
        for nested in &group.groups {
            nodes.push(Node::Group(nested));
            self.pending.push_back(nested);
        }
        Some(Step { group, nodes })
    }
}
