//! Structural queries over filter trees.
//!
//! These never evaluate anything; they only look at the shape of the tree.

use super::ast::{Filter, FilterKind};
use super::error::{FilterError, FilterResult};

/// Returns the first node of the given kind, searching depth-first in pre-order.
///
/// The root itself is considered, then compound children left to right and
/// the single child of `Not`.
pub fn find(filter: &Filter, kind: FilterKind) -> Option<&Filter> {
    if filter.kind() == kind {
        return Some(filter);
    }
    filter.children().iter().find_map(|child| find(child, kind))
}

/// Returns true if the tree contains a node of the given kind.
pub fn has_filter(filter: &Filter, kind: FilterKind) -> bool {
    find(filter, kind).is_some()
}

impl Filter {
    /// See [`find`].
    pub fn find(&self, kind: FilterKind) -> Option<&Filter> {
        find(self, kind)
    }

    /// See [`has_filter`].
    pub fn has_filter(&self, kind: FilterKind) -> bool {
        has_filter(self, kind)
    }

    /// Number of nodes on the longest root-to-leaf path. A lone rule has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Filter::depth).max().unwrap_or(0)
    }

    /// Checks that every `And`/`Or` node in the tree has at least one child.
    ///
    /// Trees built directly from the variants can hold empty compounds that
    /// the decoder rejects.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyCompound`] for the first empty compound found.
    pub fn validate(&self) -> FilterResult<()> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Filter::And(children) | Filter::Or(children) if children.is_empty() => {
                    return Err(FilterError::EmptyCompound {
                        tag: node.kind().tag(),
                    });
                }
                _ => stack.extend(node.children()),
            }
        }
        Ok(())
    }

    /// Iterates over the leaf rules of the tree in pre-order.
    ///
    /// `True` nodes are skipped.
    pub fn rules(&self) -> Rules<'_> {
        Rules { stack: vec![self] }
    }
}

/// Iterator returned by [`Filter::rules`].
#[derive(Debug)]
pub struct Rules<'a> {
    stack: Vec<&'a Filter>,
}

impl<'a> Iterator for Rules<'a> {
    type Item = &'a Filter;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.kind().is_rule() {
                return Some(node);
            }
            self.stack.extend(node.children().iter().rev());
        }
        None
    }
}
