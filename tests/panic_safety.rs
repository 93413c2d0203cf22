//! Unwinding in the middle of a cloning operation must leave the vector
//! with a sound live prefix and no leaks.

use std::{
    cell::Cell,
    panic::{AssertUnwindSafe, catch_unwind},
    rc::Rc,
};

use slot_vec::SlotVec;

#[derive(Debug)]
struct Tracked {
    id: i32,
    state: Rc<State>,
}

#[derive(Debug, Default)]
struct State {
    drops: Cell<usize>,
    clones_left: Cell<usize>,
}

impl State {
    fn allow_clones(&self, count: usize) {
        self.clones_left.set(count);
    }
}

fn tracked(state: &Rc<State>, id: i32) -> Tracked {
    Tracked {
        id,
        state: state.clone(),
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let left = self.state.clones_left.get();

        if left == 0 {
            panic!("clone limit reached");
        }

        self.state.clones_left.set(left - 1);

        Tracked {
            id: self.id,
            state: self.state.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.state.drops.set(self.state.drops.get() + 1);
    }
}

#[test]
fn from_elem_unwinds_without_leaking() {
    let state = Rc::new(State::default());
    state.allow_clones(2);

    let value = tracked(&state, 7);
    let result = catch_unwind(AssertUnwindSafe(|| SlotVec::from_elem(value, 5)));

    assert!(result.is_err());
    // the two constructed clones plus the consumed original
    assert_eq!(state.drops.get(), 3);
}

#[test]
fn extend_from_slice_keeps_the_cloned_prefix() {
    let state = Rc::new(State::default());
    let mut vec = SlotVec::new();

    for i in 0..2 {
        vec.push(tracked(&state, i));
    }

    let values = [tracked(&state, 10), tracked(&state, 11), tracked(&state, 12)];
    state.allow_clones(1);

    let result = catch_unwind(AssertUnwindSafe(|| vec.extend_from_slice(&values)));
    assert!(result.is_err());

    let ids: Vec<i32> = vec.iter().map(|value| value.id).collect();
    assert_eq!(ids, [0, 1, 10]);

    drop(vec);
    drop(values);
    assert_eq!(state.drops.get(), 6);
}

#[test]
fn insert_slice_closes_the_gap() {
    let state = Rc::new(State::default());
    let mut vec = SlotVec::new();

    for i in 0..5 {
        vec.push(tracked(&state, i));
    }

    let values = [tracked(&state, 10), tracked(&state, 11)];
    state.allow_clones(1);

    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_slice(2, &values)));
    assert!(result.is_err());

    // the tail moved back down behind the one clone that succeeded
    let ids: Vec<i32> = vec.iter().map(|value| value.id).collect();
    assert_eq!(ids, [0, 1, 10, 2, 3, 4]);

    drop(vec);
    drop(values);
    assert_eq!(state.drops.get(), 8);
}

#[test]
fn clone_leaves_the_original_intact() {
    let state = Rc::new(State::default());
    let mut vec = SlotVec::new();

    for i in 0..4 {
        vec.push(tracked(&state, i));
    }

    state.allow_clones(2);

    let result = catch_unwind(AssertUnwindSafe(|| vec.clone()));
    assert!(result.is_err());

    // only the partial copy was dropped
    assert_eq!(state.drops.get(), 2);
    assert_eq!(vec.len(), 4);

    let ids: Vec<i32> = vec.iter().map(|value| value.id).collect();
    assert_eq!(ids, [0, 1, 2, 3]);
}

#[test]
fn resize_unwinds_without_leaking() {
    let state = Rc::new(State::default());
    let mut vec = SlotVec::new();

    vec.push(tracked(&state, 0));

    state.allow_clones(3);
    let value = tracked(&state, 1);

    let result = catch_unwind(AssertUnwindSafe(|| vec.resize(6, value)));
    assert!(result.is_err());

    // the three constructed clones stayed in the vector
    assert_eq!(vec.len(), 4);
    assert_eq!(state.drops.get(), 1);

    drop(vec);
    assert_eq!(state.drops.get(), 5);
}
