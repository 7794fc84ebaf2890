//! Reversible edits composed into all-or-nothing transactions
//!
//! A [`Transaction`] borrows the state it edits and records, for every edit
//! that succeeded, the action that reverses it. Committing clears the log.
//! Dropping an uncommitted transaction (an early `?` return included) replays
//! the recorded undo actions newest first.
//!
//! Undo actions cannot fail: they are plain `FnOnce(&mut S)` closures, and
//! callers must only record inverses that are infallible for the state they
//! edit (removing an entry at a known position, releasing a known slot).

/// Undo action recorded for one edit.
type Undo<'s, S> = Box<dyn FnOnce(&mut S) + 's>;

/// Scoped transaction over `S`.
pub struct Transaction<'s, S> {
    state: &'s mut S,
    undo: Vec<Undo<'s, S>>,
}

impl<'s, S> Transaction<'s, S> {
    /// Open a transaction over `state`.
    pub fn new(state: &'s mut S) -> Self {
        Self {
            state,
            undo: Vec::new(),
        }
    }

    /// Run an edit that cannot fail. The edit returns its value together with
    /// the action that reverses it.
    pub fn apply<T, U>(&mut self, edit: impl FnOnce(&mut S) -> (T, U)) -> T
    where
        U: FnOnce(&mut S) + 's,
    {
        let (value, undo) = edit(&mut *self.state);
        self.undo.push(Box::new(undo));
        value
    }

    /// Run an edit that may fail. On failure nothing is recorded for this
    /// edit and the error is handed back; the caller returning it drops the
    /// transaction, which reverses the earlier edits.
    pub fn try_apply<T, U, E>(
        &mut self,
        edit: impl FnOnce(&mut S) -> Result<(T, U), E>,
    ) -> Result<T, E>
    where
        U: FnOnce(&mut S) + 's,
    {
        let (value, undo) = edit(&mut *self.state)?;
        self.undo.push(Box::new(undo));
        Ok(value)
    }

    /// Keep every edit.
    pub fn commit(mut self) {
        self.undo.clear();
    }
}

impl<S> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if self.undo.is_empty() {
            return;
        }
        tracing::trace!(edits = self.undo.len(), "rolling back transaction");
        while let Some(undo) = self.undo.pop() {
            undo(&mut *self.state);
        }
    }
}
