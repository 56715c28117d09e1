//! Observer protocol for structural changes.
//!
//! External code (a UI, a persistence layer, an audio engine driver) learns
//! about structural changes by registering a [`ModelObserver`] through
//! [`BoardManager::set_observer`](crate::BoardManager::set_observer) (or
//! directly on a standalone entity). Exactly one observer slot exists per
//! entity; replacing it is an unguarded assignment. Absence of an observer is
//! not an error: an empty [`ObserverHandle`] simply skips dispatch.
//!
//! Every callback runs synchronously, after the mutation is fully applied,
//! so observers can re-read the origin entity's state. Broadcasting to more
//! than one subscriber is the observer's own responsibility; see
//! [`FanoutObserver`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::bank::Bank;
use crate::connection::Connection;
use crate::effect::Effect;
use crate::manager::BoardManager;
use crate::observable::Change;
use crate::pedalboard::Pedalboard;
use crate::port::Port;

/// Capability notified of CREATED/UPDATED/DELETED structural changes.
///
/// All methods have no-op defaults, so an observer only overrides the
/// callbacks it cares about. `old` is the displaced element and is `Some`
/// only for [`Change::Updated`].
pub trait ModelObserver {
    /// A bank was appended to, replaced in, or removed from a manager.
    fn on_bank_updated(
        &mut self,
        _bank: &Bank,
        _change: Change,
        _index: usize,
        _origin: &BoardManager,
        _old: Option<&Bank>,
    ) {
    }

    /// A pedalboard was appended to, replaced in, or removed from a bank.
    fn on_pedalboard_updated(
        &mut self,
        _pedalboard: &Pedalboard,
        _change: Change,
        _index: usize,
        _origin: &Bank,
        _old: Option<&Pedalboard>,
    ) {
    }

    /// An effect was appended to, replaced in, or removed from a pedalboard.
    fn on_effect_updated(
        &mut self,
        _effect: &Effect,
        _change: Change,
        _index: usize,
        _origin: &Pedalboard,
        _old: Option<&Effect>,
    ) {
    }

    /// An effect's active flag was flipped.
    fn on_effect_status_toggled(&mut self, _effect: &Effect) {}

    /// A connection was added to or removed from a pedalboard's set.
    fn on_connection_updated(
        &mut self,
        _connection: &Connection,
        _change: Change,
        _index: usize,
        _origin: &Pedalboard,
    ) {
    }

    /// A port was added to or removed from one of an effect's port lists.
    fn on_port_updated(
        &mut self,
        _port: &Port,
        _change: Change,
        _index: usize,
        _origin: &Effect,
        _old: Option<&Port>,
    ) {
    }
}

/// Shared, optional observer slot.
///
/// Cloning the handle shares the underlying observer; the same handle is
/// cascaded from a manager down through banks, pedalboards, and effects so
/// that every entity dispatches to the one registered subscriber.
#[derive(Clone, Default)]
pub struct ObserverHandle(Option<Rc<RefCell<dyn ModelObserver>>>);

impl ObserverHandle {
    /// Wraps an observer in a handle.
    pub fn new(observer: Rc<RefCell<dyn ModelObserver>>) -> Self {
        Self(Some(observer))
    }

    /// The empty slot: dispatch is skipped entirely.
    pub fn none() -> Self {
        Self(None)
    }

    /// Returns `true` if an observer is registered.
    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    /// Runs `f` against the registered observer, if any.
    pub(crate) fn notify(&self, f: impl FnOnce(&mut dyn ModelObserver)) {
        if let Some(observer) = &self.0 {
            f(&mut *observer.borrow_mut());
        }
    }
}

impl fmt::Debug for ObserverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_some() {
            f.write_str("ObserverHandle(attached)")
        } else {
            f.write_str("ObserverHandle(none)")
        }
    }
}

/// Observer that forwards every callback to a list of subscribers, in
/// registration order.
///
/// The model itself holds one observer slot per entity; fan-out to several
/// subscribers is layered on top with this type.
#[derive(Default)]
pub struct FanoutObserver {
    targets: Vec<Rc<RefCell<dyn ModelObserver>>>,
}

impl FanoutObserver {
    /// Creates an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber at the end of the dispatch order.
    pub fn add(&mut self, target: Rc<RefCell<dyn ModelObserver>>) {
        self.targets.push(target);
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl ModelObserver for FanoutObserver {
    fn on_bank_updated(
        &mut self,
        bank: &Bank,
        change: Change,
        index: usize,
        origin: &BoardManager,
        old: Option<&Bank>,
    ) {
        for target in &self.targets {
            target
                .borrow_mut()
                .on_bank_updated(bank, change, index, origin, old);
        }
    }

    fn on_pedalboard_updated(
        &mut self,
        pedalboard: &Pedalboard,
        change: Change,
        index: usize,
        origin: &Bank,
        old: Option<&Pedalboard>,
    ) {
        for target in &self.targets {
            target
                .borrow_mut()
                .on_pedalboard_updated(pedalboard, change, index, origin, old);
        }
    }

    fn on_effect_updated(
        &mut self,
        effect: &Effect,
        change: Change,
        index: usize,
        origin: &Pedalboard,
        old: Option<&Effect>,
    ) {
        for target in &self.targets {
            target
                .borrow_mut()
                .on_effect_updated(effect, change, index, origin, old);
        }
    }

    fn on_effect_status_toggled(&mut self, effect: &Effect) {
        for target in &self.targets {
            target.borrow_mut().on_effect_status_toggled(effect);
        }
    }

    fn on_connection_updated(
        &mut self,
        connection: &Connection,
        change: Change,
        index: usize,
        origin: &Pedalboard,
    ) {
        for target in &self.targets {
            target
                .borrow_mut()
                .on_connection_updated(connection, change, index, origin);
        }
    }

    fn on_port_updated(
        &mut self,
        port: &Port,
        change: Change,
        index: usize,
        origin: &Effect,
        old: Option<&Port>,
    ) {
        for target in &self.targets {
            target
                .borrow_mut()
                .on_port_updated(port, change, index, origin, old);
        }
    }
}
