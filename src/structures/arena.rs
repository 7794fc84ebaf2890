use std::ops::{Index, IndexMut};

/// Stable handle to a slot in an [`Arena`].
///
/// Handles are plain indices: comparing or hashing them never touches user
/// code, which is what lets edge sets be edited without failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    /// Slot index behind the handle
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

enum Slot<T> {
    Occupied(T),
    Vacant,
}

/// Slot arena with free-list reuse.
/// - Alloc: reuse the most recently released slot, else push
/// - Release: hands the value back and marks the slot vacant
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store a value and return its handle.
    #[inline]
    pub fn alloc(&mut self, value: T) -> NodeKey {
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Slot::Occupied(value);
                NodeKey(idx)
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeKey(self.slots.len() - 1)
            }
        }
    }

    /// Take the value out of its slot. Releasing a vacant slot returns `None`.
    pub fn release(&mut self, key: NodeKey) -> Option<T> {
        let slot = self.slots.get_mut(key.0)?;
        match std::mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(value) => {
                self.free.push(key.0);
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant => None,
        }
    }

    /// Borrow a live value.
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&T> {
        match self.slots.get(key.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow a live value.
    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        match self.slots.get_mut(key.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no value is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over live values with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Occupied(value) => Some((NodeKey(idx), value)),
            Slot::Vacant => None,
        })
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeKey> for Arena<T> {
    type Output = T;

    fn index(&self, key: NodeKey) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("dangling arena handle {:?}", key),
        }
    }
}

impl<T> IndexMut<NodeKey> for Arena<T> {
    fn index_mut(&mut self, key: NodeKey) -> &mut T {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("dangling arena handle {:?}", key),
        }
    }
}
