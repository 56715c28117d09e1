//! Banks: ordered collections of pedalboards.

use crate::error::ModelError;
use crate::observable::{Change, ListEvent, ObservableList};
use crate::observer::ObserverHandle;
use crate::pedalboard::Pedalboard;

/// An ordered collection of pedalboards.
///
/// A pedalboard belongs to at most one bank at a time: insertion moves the
/// value into the bank's list, removal moves it back out. The observer
/// handle cascades into inserted pedalboards (and their effects) so that
/// nested mutations keep reporting to the one registered subscriber.
#[derive(Debug)]
pub struct Bank {
    name: String,
    pedalboards: ObservableList<Pedalboard>,
    observer: ObserverHandle,
}

impl Bank {
    /// Creates an empty bank.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pedalboards: ObservableList::new("pedalboards"),
            observer: ObserverHandle::none(),
        }
    }

    /// The bank's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the bank.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The ordered pedalboards list.
    pub fn pedalboards(&self) -> &ObservableList<Pedalboard> {
        &self.pedalboards
    }

    /// The pedalboard at `index`, or `None` if out of range.
    pub fn pedalboard(&self, index: usize) -> Option<&Pedalboard> {
        self.pedalboards.get(index)
    }

    /// Mutable access to the pedalboard at `index`.
    pub fn pedalboard_mut(&mut self, index: usize) -> Option<&mut Pedalboard> {
        self.pedalboards.get_mut(index)
    }

    /// Appends a pedalboard, returning its index.
    pub fn append(&mut self, mut pedalboard: Pedalboard) -> usize {
        pedalboard.set_observer(self.observer.clone());
        let event = self.pedalboards.push(pedalboard);
        let index = event.index;
        self.emit_at(index, Change::Created, None);
        index
    }

    /// Replaces the pedalboard at `index`, returning the previous occupant
    /// with its observer slot cleared.
    pub fn replace(&mut self, index: usize, mut pedalboard: Pedalboard) -> Result<Pedalboard, ModelError> {
        self.pedalboards.check_index(index)?;
        pedalboard.set_observer(self.observer.clone());
        let event = self.pedalboards.replace(index, pedalboard)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut old) = old else { unreachable!() };
        old.set_observer(ObserverHandle::none());
        self.emit_at(index, Change::Updated, Some(&old));
        Ok(old)
    }

    /// Removes the pedalboard at `index`, shifting later pedalboards down by
    /// one. The removed pedalboard's observer slot is cleared before the
    /// DELETED event fires.
    pub fn remove(&mut self, index: usize) -> Result<Pedalboard, ModelError> {
        let event = self.pedalboards.remove(index)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut pedalboard) = old else { unreachable!() };
        pedalboard.set_observer(ObserverHandle::none());
        let observer = self.observer.clone();
        observer.notify(|o| o.on_pedalboard_updated(&pedalboard, Change::Deleted, index, self, None));
        Ok(pedalboard)
    }

    /// Removes every pedalboard, returning them in their original order.
    pub fn clear(&mut self) -> Vec<Pedalboard> {
        let mut removed = Vec::with_capacity(self.pedalboards.len());
        while !self.pedalboards.is_empty() {
            let index = self.pedalboards.len() - 1;
            match self.remove(index) {
                Ok(pedalboard) => removed.push(pedalboard),
                Err(_) => break,
            }
        }
        removed.reverse();
        removed
    }

    /// Replaces the observer slot, cascading the handle into every
    /// pedalboard and effect below.
    pub fn set_observer(&mut self, observer: ObserverHandle) {
        for pedalboard in self.pedalboards.iter_mut() {
            pedalboard.set_observer(observer.clone());
        }
        self.observer = observer;
    }

    /// The current observer slot.
    pub fn observer(&self) -> &ObserverHandle {
        &self.observer
    }

    fn emit_at(&self, index: usize, change: Change, old: Option<&Pedalboard>) {
        if let Some(pedalboard) = self.pedalboards.get(index) {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_pedalboard_updated(pedalboard, change, index, self, old));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_last_element_is_the_appended_one() {
        let mut bank = Bank::new("Bank 1");
        let index = bank.append(Pedalboard::new("pb1"));
        assert_eq!(index, 0);
        assert_eq!(bank.append(Pedalboard::new("pb2")), 1);
        assert_eq!(bank.pedalboard(1).unwrap().name(), "pb2");
    }

    #[test]
    fn replace_returns_previous_occupant() {
        let mut bank = Bank::new("Bank 1");
        let _ = bank.append(Pedalboard::new("old"));

        let old = bank.replace(0, Pedalboard::new("new")).unwrap();
        assert_eq!(old.name(), "old");
        assert_eq!(bank.pedalboard(0).unwrap().name(), "new");
    }

    #[test]
    fn remove_shifts_later_pedalboards_down() {
        let mut bank = Bank::new("Bank 1");
        let _ = bank.append(Pedalboard::new("a"));
        let _ = bank.append(Pedalboard::new("b"));

        let removed = bank.remove(0).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(bank.pedalboards().len(), 1);
        assert_eq!(bank.pedalboard(0).unwrap().name(), "b");
    }

    #[test]
    fn out_of_range_operations_fail_without_mutation() {
        let mut bank = Bank::new("Bank 1");
        assert!(bank.remove(0).is_err());
        assert!(bank.replace(0, Pedalboard::new("x")).is_err());
        assert!(bank.pedalboards().is_empty());
    }
}
