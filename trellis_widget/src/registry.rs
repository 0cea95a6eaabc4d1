// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name-keyed registry shared by widget classes and geometry managers.

use alloc::{borrow::ToOwned, rc::Rc, string::String, vec::Vec};
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Maps a name to every descriptor registered under it, most recent last.
///
/// Registering a name twice shadows the earlier descriptor instead of replacing it, so
/// lookups always see the most recent registration.
pub(crate) struct Registry<T: ?Sized> {
    entries: HashMap<String, SmallVec<[Rc<T>; 1]>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(name, stack)| (name.as_str(), stack.len()))
            .collect();
        names.sort_unstable();
        f.debug_map().entries(names).finish()
    }
}

impl<T: ?Sized> Registry<T> {
    pub(crate) fn register(&mut self, name: &str, item: Rc<T>) {
        if let Some(stack) = self.entries.get_mut(name) {
            stack.push(item);
        } else {
            self.entries.insert(name.to_owned(), smallvec::smallvec![item]);
        }
    }

    /// Exact, case-sensitive match on the name content.
    pub(crate) fn lookup(&self, name: &str) -> Option<Rc<T>> {
        self.entries.get(name).and_then(|stack| stack.last()).cloned()
    }
}
