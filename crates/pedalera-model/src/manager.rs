//! The top-level bank collection and observer registration point.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bank::Bank;
use crate::error::ModelError;
use crate::observable::{Change, ListEvent, ObservableList};
use crate::observer::{ModelObserver, ObserverHandle};

/// Owns the ordered bank list and the one registered observer.
///
/// Registering an observer here cascades the shared handle down through
/// every bank, pedalboard, and effect, so one registration covers the whole
/// graph. Registration is an unguarded assignment: the previous observer, if
/// any, is simply dropped from the slot.
#[derive(Debug)]
pub struct BoardManager {
    banks: ObservableList<Bank>,
    observer: ObserverHandle,
}

impl Default for BoardManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardManager {
    /// Creates an empty manager with no observer.
    pub fn new() -> Self {
        Self {
            banks: ObservableList::new("banks"),
            observer: ObserverHandle::none(),
        }
    }

    /// Registers `observer` as the one subscriber for the whole graph.
    pub fn register(&mut self, observer: Rc<RefCell<dyn ModelObserver>>) {
        self.set_observer(ObserverHandle::new(observer));
    }

    /// Replaces the observer slot, cascading the handle into every bank.
    pub fn set_observer(&mut self, observer: ObserverHandle) {
        for bank in self.banks.iter_mut() {
            bank.set_observer(observer.clone());
        }
        self.observer = observer;
    }

    /// The ordered banks list.
    pub fn banks(&self) -> &ObservableList<Bank> {
        &self.banks
    }

    /// The bank at `index`, or `None` if out of range.
    pub fn bank(&self, index: usize) -> Option<&Bank> {
        self.banks.get(index)
    }

    /// Mutable access to the bank at `index`.
    pub fn bank_mut(&mut self, index: usize) -> Option<&mut Bank> {
        self.banks.get_mut(index)
    }

    /// Appends a bank, returning its index.
    pub fn append(&mut self, mut bank: Bank) -> usize {
        bank.set_observer(self.observer.clone());
        let event = self.banks.push(bank);
        let index = event.index;
        self.emit_at(index, Change::Created, None);
        index
    }

    /// Replaces the bank at `index`, returning the previous occupant with
    /// its observer slot cleared.
    pub fn replace(&mut self, index: usize, mut bank: Bank) -> Result<Bank, ModelError> {
        self.banks.check_index(index)?;
        bank.set_observer(self.observer.clone());
        let event = self.banks.replace(index, bank)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut old) = old else { unreachable!() };
        old.set_observer(ObserverHandle::none());
        self.emit_at(index, Change::Updated, Some(&old));
        Ok(old)
    }

    /// Removes the bank at `index`. The removed bank's observer slot is
    /// cleared before the DELETED event fires.
    pub fn remove(&mut self, index: usize) -> Result<Bank, ModelError> {
        let event = self.banks.remove(index)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut bank) = old else { unreachable!() };
        bank.set_observer(ObserverHandle::none());
        let observer = self.observer.clone();
        observer.notify(|o| o.on_bank_updated(&bank, Change::Deleted, index, self, None));
        Ok(bank)
    }

    fn emit_at(&self, index: usize, change: Change, old: Option<&Bank>) {
        if let Some(bank) = self.banks.get(index) {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_bank_updated(bank, change, index, self, old));
        }
    }
}
