// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptor trees.

extern crate alloc;

use alloc::vec::Vec;

use crate::{Attrs, Mark, MarkId};

/// A node in a descriptor tree.
#[derive(Clone, Debug)]
pub enum Node {
    /// A nested group.
    Group(Group),
    /// A leaf primitive.
    Mark(Mark),
}

impl From<Mark> for Node {
    fn from(value: Mark) -> Self {
        Self::Mark(value)
    }
}

impl From<Group> for Node {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

/// An ordered group of nodes.
///
/// Child order is draw order within equal `z_index`.
#[derive(Clone, Debug)]
pub struct Group {
    /// Stable identity.
    pub id: MarkId,
    /// Pass-through attributes for the group container.
    pub attrs: Attrs,
    /// Children in draw order.
    pub children: Vec<Node>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            attrs: Attrs::default(),
            children: Vec::new(),
        }
    }

    /// Sets the accessibility role of the container.
    pub fn with_role(mut self, role: impl Into<alloc::string::String>) -> Self {
        self.attrs.role = Some(role.into());
        self
    }

    /// Appends a child.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Returns an iterator over all marks in the tree, depth-first in draw order.
    pub fn marks(&self) -> Marks<'_> {
        Marks {
            stack: alloc::vec![self.children.iter()],
        }
    }

    /// Returns the number of marks in the tree.
    pub fn mark_count(&self) -> usize {
        self.marks().count()
    }

    /// Finds a mark by id.
    pub fn find(&self, id: MarkId) -> Option<&Mark> {
        self.marks().find(|m| m.id == id)
    }
}

impl Extend<Mark> for Group {
    fn extend<T: IntoIterator<Item = Mark>>(&mut self, iter: T) {
        self.children.extend(iter.into_iter().map(Node::Mark));
    }
}

/// Depth-first iterator over the marks of a [`Group`].
#[derive(Debug)]
pub struct Marks<'a> {
    stack: Vec<core::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Marks<'a> {
    type Item = &'a Mark;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Mark(m)) => return Some(m),
                Some(Node::Group(g)) => self.stack.push(g.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;

    use super::*;

    #[test]
    fn marks_iterates_depth_first_in_draw_order() {
        let mut inner = Group::new(MarkId::from_raw(10));
        inner.push(Mark::rect(MarkId::from_raw(2), Rect::ZERO));
        inner.push(Mark::rect(MarkId::from_raw(3), Rect::ZERO));

        let mut root = Group::new(MarkId::from_raw(1)).with_role("presentation");
        root.push(Mark::rect(MarkId::from_raw(1), Rect::ZERO));
        root.push(inner);
        root.extend([Mark::rect(MarkId::from_raw(4), Rect::ZERO)]);

        let ids: std::vec::Vec<u64> = root.marks().map(|m| m.id.0).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert_eq!(root.mark_count(), 4);
        assert!(root.find(MarkId::from_raw(3)).is_some());
        assert_eq!(root.attrs.role.as_deref(), Some("presentation"));
    }
}
