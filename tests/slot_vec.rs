use std::{cell::Cell, rc::Rc};

use ::slot_vec::{RangeError, SlotVec, slot_vec};

#[test]
fn push_grows_by_doubling() {
    let mut vec: SlotVec<i32> = SlotVec::new();
    assert_eq!(vec.capacity(), 0);

    for i in 1..=10 {
        vec.push(i * i);
    }

    assert_eq!(vec.len(), 10);
    assert_eq!(vec.capacity(), 16);
    assert_eq!(vec, [1, 4, 9, 16, 25, 36, 49, 64, 81, 100]);
}

#[test]
fn capacity_sequence() {
    let mut vec: SlotVec<u8> = SlotVec::new();
    let mut observed = vec![vec.capacity()];

    for i in 0..17 {
        vec.push(i);

        if Some(&vec.capacity()) != observed.last() {
            observed.push(vec.capacity());
        }
    }

    assert_eq!(observed, [0, 8, 16, 32]);
}

#[test]
fn with_capacity_is_exact() {
    let vec: SlotVec<i32> = SlotVec::with_capacity(13);
    assert_eq!(vec.capacity(), 13);
    assert!(vec.is_empty());

    let vec: SlotVec<i32> = SlotVec::with_capacity(0);
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn at_reports_the_index() {
    let vec = slot_vec![10, 20, 30];

    assert_eq!(vec.at(0), Ok(&10));
    assert_eq!(vec.at(2), Ok(&30));

    let error = vec.at(3).unwrap_err();
    assert_eq!(error.index(), 3);
    assert_eq!(error.to_string(), "range error: index 3 is out of range");
}

#[test]
fn at_mut_reports_the_index() {
    let mut vec = slot_vec![10, 20, 30];

    *vec.at_mut(1).unwrap() = 25;
    assert_eq!(vec, [10, 25, 30]);

    let expected = vec.at(7).unwrap_err();
    assert_eq!(vec.at_mut(7), Err(expected));

    let empty: SlotVec<i32> = SlotVec::new();
    assert_eq!(empty.at(0).unwrap_err().index(), 0);
}

#[test]
fn range_error_is_an_error() {
    fn assert_error<E: std::error::Error>() {}
    assert_error::<RangeError>();
}

#[test]
fn pop_is_lifo() {
    let mut vec = slot_vec![1, 2, 3];

    assert_eq!(vec.pop(), Some(3));
    assert_eq!(vec.pop(), Some(2));
    assert_eq!(vec.pop(), Some(1));
    assert_eq!(vec.pop(), None);
    assert_eq!(vec.pop(), None);
}

#[test]
fn reserve_is_relative_and_never_shrinks() {
    let mut vec: SlotVec<i32> = SlotVec::new();

    vec.reserve(10);
    assert_eq!(vec.capacity(), 10);

    vec.reserve(2);
    assert_eq!(vec.capacity(), 10);

    vec.push(1);
    vec.reserve(10);
    assert_eq!(vec.capacity(), 20);
}

#[test]
fn reserve_from_empty_rounds_up_to_minimum() {
    let mut vec: SlotVec<i32> = SlotVec::new();
    vec.reserve(3);
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn shrink_to_fit() {
    let mut vec: SlotVec<i32> = SlotVec::with_capacity(100);
    vec.extend_from_slice(&[1, 2, 3]);

    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 3);
    assert_eq!(vec, [1, 2, 3]);

    // shrinking to the same capacity is a no-op
    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 3);

    vec.clear();
    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 0);
}

#[test]
fn assign_replaces_contents() {
    let mut vec = slot_vec![1, 2, 3];
    vec.assign(5, -1);

    assert_eq!(vec, [-1, -1, -1, -1, -1]);
    assert!(vec.capacity() >= 5);
}

#[test]
fn assign_from_iterator() {
    let mut vec = slot_vec![1, 2, 3];
    vec.assign_from((0..4).map(|i| i * 10));
    assert_eq!(vec, [0, 10, 20, 30]);

    vec.assign_from(std::iter::empty());
    assert!(vec.is_empty());
}

#[test]
fn insert_shifts_right() {
    let mut vec = slot_vec![1, 3, 4];

    vec.insert(1, 2);
    assert_eq!(vec, [1, 2, 3, 4]);

    vec.insert(4, 5);
    assert_eq!(vec, [1, 2, 3, 4, 5]);

    vec.insert(0, 0);
    assert_eq!(vec, [0, 1, 2, 3, 4, 5]);
}

#[test]
#[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")]
fn insert_past_len_panics() {
    let mut vec = slot_vec![1, 2, 3];
    vec.insert(4, 0);
}

#[test]
fn insert_slice_grows_to_the_larger_of_double_and_fit() {
    let mut vec = SlotVec::from_elem(-1, 5);
    assert_eq!(vec.capacity(), 5);

    vec.insert_slice(2, &[100, 200, 300]);

    assert_eq!(vec, [-1, -1, 100, 200, 300, -1, -1, -1]);
    assert_eq!(vec.capacity(), 10);
}

#[test]
fn insert_slice_edges() {
    let mut vec = slot_vec![1, 2];

    vec.insert_slice(2, &[3, 4]);
    assert_eq!(vec, [1, 2, 3, 4]);

    vec.insert_slice(0, &[-1, 0]);
    assert_eq!(vec, [-1, 0, 1, 2, 3, 4]);

    let before = vec.capacity();
    vec.insert_slice(3, &[]);
    assert_eq!(vec, [-1, 0, 1, 2, 3, 4]);
    assert_eq!(vec.capacity(), before);
}

#[test]
fn remove_shifts_left() {
    let mut vec = slot_vec![1, 2, 3, 4];

    assert_eq!(vec.remove(0), 1);
    assert_eq!(vec, [2, 3, 4]);

    assert_eq!(vec.remove(2), 4);
    assert_eq!(vec, [2, 3]);
}

#[test]
#[should_panic(expected = "removal index (is 2) should be < len (is 2)")]
fn remove_past_len_panics() {
    let mut vec = slot_vec![1, 2];
    vec.remove(2);
}

#[test]
fn swap_remove_takes_from_the_back() {
    let mut vec = slot_vec![1, 2, 3, 4];

    assert_eq!(vec.swap_remove(0), 1);
    assert_eq!(vec, [4, 2, 3]);

    assert_eq!(vec.swap_remove(2), 3);
    assert_eq!(vec, [4, 2]);
}

#[test]
fn drain_removes_a_range() {
    let mut vec = slot_vec![1, 4, 9, 16, 25];

    let removed: Vec<i32> = vec.drain(0..2).collect();
    assert_eq!(removed, [1, 4]);
    assert_eq!(vec, [9, 16, 25]);

    let removed: Vec<i32> = vec.drain(1..).collect();
    assert_eq!(removed, [16, 25]);
    assert_eq!(vec, [9]);

    let removed: Vec<i32> = vec.drain(..).rev().collect();
    assert_eq!(removed, [9]);
    assert!(vec.is_empty());
}

#[test]
fn drain_dropped_midway_moves_the_tail_back() {
    let mut vec = slot_vec![1, 2, 3, 4, 5];

    let mut drain = vec.drain(1..4);
    assert_eq!(drain.next(), Some(2));
    drop(drain);

    assert_eq!(vec, [1, 5]);
}

#[test]
fn drain_empty_range_is_a_no_op() {
    let mut vec = slot_vec![1, 2, 3];
    assert_eq!(vec.drain(2..2).next(), None);
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
#[should_panic(expected = "out of range")]
fn drain_past_len_panics() {
    let mut vec = slot_vec![1, 2, 3];
    vec.drain(1..5);
}

#[test]
fn truncate_and_clear() {
    let counter = Rc::new(Cell::new(0));
    let mut vec = SlotVec::new();

    for _ in 0..5 {
        vec.push(DropCounter(counter.clone()));
    }

    vec.truncate(2);
    assert_eq!(vec.len(), 2);
    assert_eq!(counter.get(), 3);

    vec.truncate(4);
    assert_eq!(vec.len(), 2);
    assert_eq!(counter.get(), 3);

    vec.clear();
    assert!(vec.is_empty());
    assert_eq!(counter.get(), 5);
}

#[test]
fn dropping_the_vector_drops_the_live_prefix() {
    let counter = Rc::new(Cell::new(0));

    {
        let mut vec = SlotVec::with_capacity(10);
        for _ in 0..4 {
            vec.push(DropCounter(counter.clone()));
        }
    }

    assert_eq!(counter.get(), 4);
}

#[test]
fn resize_in_both_directions() {
    let mut vec = slot_vec![1, 2];

    vec.resize(4, 9);
    assert_eq!(vec, [1, 2, 9, 9]);

    vec.resize(1, 9);
    assert_eq!(vec, [1]);

    vec.resize(0, 9);
    assert!(vec.is_empty());
}

#[test]
fn resize_with_calls_in_order() {
    let mut vec = slot_vec![0];
    let mut next = 0;

    vec.resize_with(4, || {
        next += 1;
        next
    });

    assert_eq!(vec, [0, 1, 2, 3]);

    vec.resize_with(2, || unreachable!());
    assert_eq!(vec, [0, 1]);
}

#[test]
fn try_resize_with_matches_the_panicking_flavor() {
    let mut vec = slot_vec![0];
    let mut next = 0;

    vec.try_resize_with(4, || {
        next += 1;
        next
    })
    .unwrap();

    assert_eq!(vec, [0, 1, 2, 3]);

    vec.try_resize_with(2, || unreachable!()).unwrap();
    assert_eq!(vec, [0, 1]);
}

#[test]
fn swap_with_exchanges_contents() {
    let mut a = SlotVec::from(["one".to_string(), "two".to_string(), "three".to_string()]);
    let mut b = SlotVec::from(["ONE".to_string(), "TWO".to_string(), "THREE".to_string()]);

    a.swap_with(&mut b);

    assert_eq!(a, ["ONE", "TWO", "THREE"]);
    assert_eq!(b, ["one", "two", "three"]);
}

#[test]
fn split_off() {
    let mut vec = slot_vec![1, 2, 3, 4, 5];
    let tail = vec.split_off(2);

    assert_eq!(vec, [1, 2]);
    assert_eq!(tail, [3, 4, 5]);

    let rest = vec.split_off(2);
    assert_eq!(vec, [1, 2]);
    assert!(rest.is_empty());
}

#[test]
fn clone_is_independent() {
    let mut vec = slot_vec![1, 2, 3];
    let copy = vec.clone();

    vec.push(4);

    assert_eq!(vec, [1, 2, 3, 4]);
    assert_eq!(copy, [1, 2, 3]);
    assert_eq!(copy.capacity(), 3);
}

#[test]
fn clone_from_replaces_contents() {
    let source = slot_vec![7, 8];
    let mut target = slot_vec![1, 2, 3, 4];

    target.clone_from(&source);
    assert_eq!(target, [7, 8]);
}

#[test]
fn comparison_is_lexicographic() {
    let a = slot_vec![1, 2, 3];
    let b = slot_vec![1, 2, 4];
    let c = slot_vec![1, 2];

    assert!(a < b);
    assert!(c < a);
    assert!(b > c);
    assert_eq!(a, slot_vec![1, 2, 3]);
    assert_ne!(a, b);
}

#[test]
fn equality_across_shapes() {
    let vec = slot_vec![1, 2, 3];

    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec, &[1, 2, 3][..]);
    assert_eq!([1, 2, 3][..], vec);
    assert_eq!(vec[..], [1, 2, 3][..]);
}

#[test]
fn into_iter_from_both_ends() {
    let vec = slot_vec![1, 2, 3, 4];
    let mut iter = vec.into_iter();

    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), [2, 3]);
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next(), Some(3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn into_iter_drops_what_was_not_yielded() {
    let counter = Rc::new(Cell::new(0));
    let mut vec = SlotVec::new();

    for _ in 0..5 {
        vec.push(DropCounter(counter.clone()));
    }

    let mut iter = vec.into_iter();
    drop(iter.next());
    drop(iter.next());
    assert_eq!(counter.get(), 2);

    drop(iter);
    assert_eq!(counter.get(), 5);
}

#[test]
fn iteration_by_reference() {
    let mut vec = slot_vec![1, 2, 3];

    let sum: i32 = (&vec).into_iter().sum();
    assert_eq!(sum, 6);

    for value in &mut vec {
        *value *= 2;
    }

    assert_eq!(vec, [2, 4, 6]);
}

#[test]
fn extend_and_collect() {
    let mut vec: SlotVec<i32> = (0..3).collect();
    assert_eq!(vec, [0, 1, 2]);

    vec.extend(3..5);
    assert_eq!(vec, [0, 1, 2, 3, 4]);

    vec.extend([&5, &6]);
    assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn macro_forms() {
    let empty: SlotVec<i32> = slot_vec![];
    assert!(empty.is_empty());

    let filled = slot_vec![7; 3];
    assert_eq!(filled, [7, 7, 7]);

    let listed = slot_vec![1, 2, 3];
    assert_eq!(listed, [1, 2, 3]);

    let in_global = slot_vec![in ::slot_vec::alloc::Global; 1, 2];
    assert_eq!(in_global, [1, 2]);

    let tried = slot_vec![try in ::slot_vec::alloc::Global; 0; 4].unwrap();
    assert_eq!(tried, [0, 0, 0, 0]);
}

#[test]
fn zero_sized_elements_never_allocate() {
    let mut vec: SlotVec<()> = SlotVec::new();
    assert_eq!(vec.capacity(), usize::MAX);
    assert_eq!(vec.max_size(), usize::MAX);

    for _ in 0..1000 {
        vec.push(());
    }

    assert_eq!(vec.len(), 1000);
    assert_eq!(vec.pop(), Some(()));
    assert_eq!(vec.into_iter().rev().count(), 999);
}

#[test]
fn max_size_is_derived_from_the_allocator() {
    let vec: SlotVec<i32> = SlotVec::new();
    assert_eq!(vec.max_size(), isize::MAX as usize / 4);
}

#[test]
fn try_methods_report_success() {
    let mut vec: SlotVec<i32> = SlotVec::try_with_capacity(4).unwrap();
    vec.try_push(1).unwrap();
    vec.try_reserve(10).unwrap();
    vec.try_extend_from_slice(&[2, 3]).unwrap();
    vec.try_insert(0, 0).unwrap();
    vec.try_resize(6, 9).unwrap();
    vec.try_shrink_to_fit().unwrap();

    assert_eq!(vec, [0, 1, 2, 3, 9, 9]);
    assert_eq!(vec.capacity(), 6);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_past_len_panics() {
    let vec = slot_vec![1, 2, 3];
    let _ = vec[3];
}

#[test]
fn debug_formats_as_a_slice() {
    let vec = slot_vec![1, 2, 3];
    assert_eq!(format!("{vec:?}"), "[1, 2, 3]");
}

struct DropCounter(Rc<Cell<u32>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
