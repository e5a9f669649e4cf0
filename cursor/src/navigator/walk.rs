// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Lazy walks away from a navigator's point.
//!
//! A walk owns its own tracking engine (a sibling of the navigator it started from),
//! and it steps that engine *before* handing out the element it was on:
//!
//! ```text
//! nodes_after_and_self() on [a, b, c], starting at a
//!
//!   yield a ─ walker already on b ─ caller removes a ─ walker follows b to index 0
//!   yield b ─ walker already on c
//!   yield c ─ walker can't move, walk ends after c
//! ```
//!
//! So the caller can remove the node it was just given without derailing the walk.

use super::{Navigator, NavigatorEngine, TrackingEngine};
use crate::TrackingMode;
use std::{fmt::{Debug, Formatter},
          iter::FusedIterator,
          marker::PhantomData};

struct Walker<T> {
    engine: Option<Box<dyn NavigatorEngine<T>>>,
    step: isize,
}

impl<T: 'static> Walker<T> {
    fn new(from: &dyn NavigatorEngine<T>, first: isize, step: isize) -> Self {
        let engine = from
            .offset(first)
            .ok()
            .map(|it| TrackingEngine::wrap(it, TrackingMode::Positive));
        Self { engine, step }
    }

    /// An untracked engine on the walker's point, then step the walker.
    fn next_engine(&mut self) -> Option<Box<dyn NavigatorEngine<T>>> {
        let walker = self.engine.as_mut()?;
        let Ok(yielded) = walker.offset(0) else {
            self.engine = None;
            return None;
        };
        if walker.move_by(self.step).is_err() {
            self.engine = None;
        }
        Some(yielded)
    }
}

/// Values away from a navigator's point, nearest first. See [`Navigator::after`].
pub struct Values<T> {
    walker: Walker<T>,
}

impl<T: Clone + 'static> Values<T> {
    pub(crate) fn new(from: &dyn NavigatorEngine<T>, first: isize, step: isize) -> Self {
        Self {
            walker: Walker::new(from, first, step),
        }
    }
}

impl<T: Clone + 'static> Iterator for Values<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let engine = self.walker.next_engine()?;
        let mut value = None;
        engine.visit(0, &mut |it| value = Some(it.clone())).ok()?;
        value
    }
}

impl<T: Clone + 'static> FusedIterator for Values<T> {}

impl<T> Debug for Values<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Values")
            .field("step", &self.walker.step)
            .field("done", &self.walker.engine.is_none())
            .finish()
    }
}

/// Navigators on the elements away from a navigator's point, nearest first. Each one
/// has the capability of the navigator the walk started from.
pub struct Nodes<N, T> {
    walker: Walker<T>,
    _facade: PhantomData<fn() -> N>,
}

impl<N: Navigator<T>, T: Clone + 'static> Nodes<N, T> {
    pub(crate) fn new(from: &dyn NavigatorEngine<T>, first: isize, step: isize) -> Self {
        Self {
            walker: Walker::new(from, first, step),
            _facade: PhantomData,
        }
    }
}

impl<N: Navigator<T>, T: Clone + 'static> Iterator for Nodes<N, T> {
    type Item = N;

    fn next(&mut self) -> Option<N> { self.walker.next_engine().map(N::from_engine) }
}

impl<N: Navigator<T>, T: Clone + 'static> FusedIterator for Nodes<N, T> {}

impl<N, T> Debug for Nodes<N, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nodes")
            .field("step", &self.walker.step)
            .field("done", &self.walker.engine.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Navigator, SharedLinkedSeq, SharedList, assert_eq2, read_navigator};

    #[test]
    fn test_values_both_ways() {
        let nav = read_navigator(vec![1, 2, 3, 4], 1).unwrap();
        assert_eq2!(nav.after().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq2!(nav.after_and_self().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq2!(nav.before().collect::<Vec<_>>(), vec![1]);
        assert_eq2!(nav.before_and_self().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_values_at_the_ends_are_empty() {
        let nav = read_navigator(vec!['x'], 0).unwrap();
        assert_eq2!(nav.after().next(), None);
        assert_eq2!(nav.before().next(), None);
        assert_eq2!(nav.after_and_self().collect::<String>(), "x");
    }

    #[test]
    fn test_removing_yielded_list_nodes() {
        let list = SharedList::from(vec![1, 2, 3, 4, 5, 6]);
        let nav = list.navigator(0).unwrap();
        for mut node in nav.nodes_after_and_self() {
            if node.current().unwrap() % 2 == 0 {
                node.remove().unwrap();
            }
        }
        assert_eq2!(list.to_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn test_removing_yielded_linked_nodes_backward() {
        let seq = (1..=5).collect::<SharedLinkedSeq<_>>();
        let nav = seq.navigator_at(seq.last().unwrap()).unwrap();
        let seen = nav
            .nodes_before_and_self()
            .map(|mut node| {
                let value = node.current().unwrap();
                if value > 2 {
                    node.remove().unwrap();
                }
                value
            })
            .collect::<Vec<_>>();
        assert_eq2!(seen, vec![5, 4, 3, 2, 1]);
        assert_eq2!(seq.to_vec(), vec![1, 2]);
    }
}
