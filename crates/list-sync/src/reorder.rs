//! Order Renumbering
//!
//! Applies a completed drag to the loaded sequence and rewrites `order`
//! on as few items as possible so that sorting by `order` reproduces the
//! new array order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{is_strictly_ordered, Item};
use crate::error::{Result, SyncError};

/// A completed drag gesture
///
/// `destination` is `None` when the row was dropped outside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragMove {
    pub source: usize,
    pub destination: Option<usize>,
}

impl DragMove {
    pub fn new(source: usize, destination: Option<usize>) -> Self {
        Self { source, destination }
    }
}

/// Move one item and renumber it into place
///
/// Returns `Ok(false)` when the move is a no-op (no destination, or
/// source equals destination) and `Err(InvalidMove)` when an index is past
/// the end. The sequence is untouched in both cases.
///
/// Only the moved item gets a new `order`, unless its new neighbours leave
/// no representable gap; then the neighbours past it are shifted by `step`
/// until ordering is strict again.
///
/// The minimal renumbering assumes `items` arrives strictly ordered. Pages
/// appended from the server can tie with locally moved items; when that
/// shows up after the move, every out-of-place item is lifted above its
/// predecessor so array order and `order` agree again.
pub fn apply_move(items: &mut Vec<Item>, mv: DragMove, step: f64) -> Result<bool> {
    let Some(destination) = mv.destination else {
        return Ok(false);
    };
    let len = items.len();
    if mv.source >= len || destination >= len {
        return Err(SyncError::InvalidMove {
            from: mv.source,
            to: destination,
            len,
        });
    }
    if mv.source == destination {
        return Ok(false);
    }

    let moved = items.remove(mv.source);
    items.insert(destination, moved);

    if destination > mv.source {
        settle_after_predecessor(items, destination, step);
    } else {
        settle_before_successor(items, destination, step);
    }
    if !is_strictly_ordered(items) {
        let lifted = restore_strict_order(items, step);
        debug!(lifted, "renumbered items left out of order by earlier pages");
    }
    Ok(true)
}

/// Forward pass: lift each item that does not exceed its predecessor
fn restore_strict_order(items: &mut [Item], step: f64) -> usize {
    let mut lifted = 0;
    for k in 1..items.len() {
        let floor = items[k - 1].order;
        if items[k].order <= floor {
            items[k].order = floor + step;
            lifted += 1;
        }
    }
    lifted
}

/// Moved down the list: the item sits right after its new predecessor
fn settle_after_predecessor(items: &mut [Item], at: usize, step: f64) {
    let lower = items[at - 1].order;
    let stepped = lower + step;
    match items.get(at + 1).map(|next| next.order) {
        Some(upper) if stepped >= upper => match midpoint(lower, upper) {
            Some(mid) => items[at].order = mid,
            None => {
                items[at].order = stepped;
                for k in at + 1..items.len() {
                    let floor = items[k - 1].order;
                    if items[k].order > floor {
                        break;
                    }
                    items[k].order = floor + step;
                }
            }
        },
        _ => items[at].order = stepped,
    }
}

/// Moved up the list: the item sits right before its new successor
fn settle_before_successor(items: &mut [Item], at: usize, step: f64) {
    let upper = items[at + 1].order;
    let stepped = upper - step;
    let lower = if at > 0 { Some(items[at - 1].order) } else { None };
    match lower {
        Some(lower) if stepped <= lower => match midpoint(lower, upper) {
            Some(mid) => items[at].order = mid,
            None => {
                items[at].order = stepped;
                for k in (0..at).rev() {
                    let ceiling = items[k + 1].order;
                    if items[k].order < ceiling {
                        break;
                    }
                    items[k].order = ceiling - step;
                }
            }
        },
        _ => items[at].order = stepped,
    }
}

/// Strictly-inside midpoint, if the float gap still has room for one
fn midpoint(lower: f64, upper: f64) -> Option<f64> {
    let mid = lower + (upper - lower) / 2.0;
    (mid > lower && mid < upper).then_some(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(orders: &[(u64, f64)]) -> Vec<Item> {
        orders.iter().map(|&(value, order)| Item::new(value, order)).collect()
    }

    fn values(items: &[Item]) -> Vec<u64> {
        items.iter().map(|item| item.value).collect()
    }

    #[test]
    fn test_tied_orders_from_later_pages_are_repaired() {
        // item 5 arrived on a later page with the order item 4 was moved to
        let mut list = items(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 5.0), (5, 5.0)]);
        assert!(apply_move(&mut list, DragMove::new(0, Some(1)), 1.0).unwrap());

        assert_eq!(values(&list), vec![2, 1, 3, 4, 5]);
        assert_eq!(list[1].order, 2.5);
        assert_eq!(list[4].order, 6.0);
        assert!(is_strictly_ordered(&list));
    }

    #[test]
    fn test_move_to_end() {
        let mut list = items(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        assert!(apply_move(&mut list, DragMove::new(0, Some(2)), 1.0).unwrap());

        assert_eq!(values(&list), vec![2, 3, 1]);
        assert_eq!(list[0].order, 2.0);
        assert_eq!(list[1].order, 3.0);
        assert!(list[2].order > 3.0);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = items(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        assert!(apply_move(&mut list, DragMove::new(2, Some(0)), 1.0).unwrap());

        assert_eq!(values(&list), vec![3, 1, 2]);
        assert_eq!(list[0].order, 0.0);
        assert_eq!(list[1].order, 1.0);
        assert_eq!(list[2].order, 2.0);
    }

    #[test]
    fn test_move_into_tight_gap_uses_midpoint() {
        let mut list = items(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);
        apply_move(&mut list, DragMove::new(0, Some(2)), 1.0).unwrap();

        assert_eq!(values(&list), vec![2, 3, 1, 4]);
        assert_eq!(list[2].order, 3.5);
        assert_eq!(list[3].order, 4.0);
    }

    #[test]
    fn test_exhausted_gap_shifts_followers() {
        let next_after_one = f64::from_bits(1.0f64.to_bits() + 1);
        let mut list = items(&[(1, 0.0), (2, 1.0), (3, next_after_one), (4, 5.0)]);
        apply_move(&mut list, DragMove::new(0, Some(1)), 1.0).unwrap();

        assert_eq!(values(&list), vec![2, 1, 3, 4]);
        assert_eq!(list[1].order, 2.0);
        assert_eq!(list[2].order, 3.0);
        assert_eq!(list[3].order, 5.0);
        assert!(is_strictly_ordered(&list));
    }

    #[test]
    fn test_exhausted_gap_shifts_predecessors() {
        let just_below_four = f64::from_bits(4.0f64.to_bits() - 1);
        let mut list = items(&[(1, 0.0), (2, just_below_four), (3, 4.0), (4, 5.0)]);
        apply_move(&mut list, DragMove::new(3, Some(2)), 1.0).unwrap();

        assert_eq!(values(&list), vec![1, 2, 4, 3]);
        assert_eq!(list[2].order, 3.0);
        assert_eq!(list[1].order, 2.0);
        assert_eq!(list[0].order, 0.0);
        assert!(is_strictly_ordered(&list));
    }

    #[test]
    fn test_noop_moves() {
        let original = items(&[(1, 1.0), (2, 2.0)]);
        let mut list = original.clone();
        assert!(!apply_move(&mut list, DragMove::new(1, None), 1.0).unwrap());
        assert!(!apply_move(&mut list, DragMove::new(1, Some(1)), 1.0).unwrap());
        assert_eq!(list, original);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut list = items(&[(1, 1.0)]);
        let err = apply_move(&mut list, DragMove::new(0, Some(3)), 1.0).unwrap_err();
        assert_eq!(err, SyncError::InvalidMove { from: 0, to: 3, len: 1 });
        assert_eq!(list, items(&[(1, 1.0)]));
    }

    #[test]
    fn test_repeat_is_noop() {
        let mut list = items(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        apply_move(&mut list, DragMove::new(0, Some(2)), 1.0).unwrap();
        let after_first = list.clone();
        // the dragged row now sits at the destination
        assert!(!apply_move(&mut list, DragMove::new(2, Some(2)), 1.0).unwrap());
        assert_eq!(list, after_first);
    }

    fn ordered_list() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(1u32..5, 1..40).prop_map(|gaps| {
            let mut order = 0.0;
            gaps.into_iter()
                .enumerate()
                .map(|(i, gap)| {
                    order += f64::from(gap);
                    Item::new(i as u64, order)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_array_order_matches_sort_order(
            list in ordered_list(),
            source in any::<prop::sample::Index>(),
            destination in any::<prop::sample::Index>(),
        ) {
            let mut list = list;
            let before = list.clone();
            let source = source.index(list.len());
            let destination = destination.index(list.len());

            apply_move(&mut list, DragMove::new(source, Some(destination)), 1.0).unwrap();

            prop_assert!(is_strictly_ordered(&list));
            prop_assert_eq!(list[destination].value, before[source].value);
            // integer gaps always leave room, so only the dragged item changes
            for item in list.iter().filter(|item| item.value != before[source].value) {
                let original = before.iter().find(|b| b.value == item.value).unwrap();
                prop_assert_eq!(item.order, original.order);
            }
        }
    }
}
