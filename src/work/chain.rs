// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Linking work items into chains.
//!
//! Every item exclusively owns its successor, so appending walks the `next`
//! links iteratively to the true tail. A head that is already a partial
//! chain keeps its existing links; the new item goes after all of them.

use crate::work::Work;

/// Attach `next` after the last item reachable from `work` and return a
/// reference to the attached item.
pub fn append(work: &mut Work, next: Work) -> &mut Work {
    let mut cursor = &mut work.next;
    while let Some(successor) = cursor {
        cursor = &mut successor.next;
    }
    cursor.insert(Box::new(next))
}

/// Link `next` onto `work`. With no `work` there is nothing to link onto and
/// `next` itself is returned.
pub fn link(work: Option<Work>, next: Work) -> Work {
    match work {
        Some(mut head) => {
            append(&mut head, next);
            head
        }
        None => next,
    }
}

/// Turn an ordered sequence into a single chain, returning its head.
///
/// Item `i` is linked to item `i + 1`; an item that already carries a
/// `next` chain has the following item attached at that chain's tail.
/// Returns `None` for an empty sequence.
pub fn link_sequence(items: Vec<Work>) -> Option<Work> {
    let mut items = items.into_iter();
    let mut head = items.next()?;
    let mut tail = &mut head;
    for item in items {
        tail = append(tail, item);
    }
    Some(head)
}
