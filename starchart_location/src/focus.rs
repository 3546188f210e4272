// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear focus cycling over an [`ObjectList`].

use crate::ObjectList;

/// Direction of a focus cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Towards higher indices, wrapping to the start.
    Forward,
    /// Towards lower indices, wrapping to the end.
    Backward,
}

impl Step {
    /// Maps a `forward` flag to a step.
    #[must_use]
    pub const fn from_forward(forward: bool) -> Self {
        if forward { Self::Forward } else { Self::Backward }
    }
}

/// Finds the next focus candidate after `origin`.
///
/// Advances first and checks afterwards, so `origin` itself is only
/// reconsidered after a full lap. At most `list.len()` rows are visited.
/// A row qualifies if it is a reference and, when `marked_only` is set, marked.
///
/// ```
/// use starchart_location::{ObjectList, Reference, focus::{Step, next_candidate}};
///
/// let mut list = ObjectList::new();
/// list.add_divider("Ships");
/// list.add_reference(Reference::ship(1), false);
/// list.add_reference(Reference::ship(2), true);
///
/// assert_eq!(next_candidate(&list, 1, Step::Forward, false), Some(2));
/// // Wraps past the end and skips the divider.
/// assert_eq!(next_candidate(&list, 2, Step::Forward, false), Some(1));
/// assert_eq!(next_candidate(&list, 2, Step::Forward, true), Some(2));
/// ```
#[must_use]
pub fn next_candidate(
    list: &ObjectList,
    origin: usize,
    step: Step,
    marked_only: bool,
) -> Option<usize> {
    let len = list.len();
    if len == 0 {
        return None;
    }

    let mut index = origin.min(len - 1);
    for _ in 0..len {
        index = match step {
            Step::Forward => (index + 1) % len,
            Step::Backward => index.checked_sub(1).unwrap_or(len - 1),
        };
        let item = list.get(index)?;
        if item.reference().is_some() && (item.is_marked() || !marked_only) {
            return Some(index);
        }
    }
    None
}
