//! Pedalboards: one complete signal-routing configuration.
//!
//! A pedalboard owns an ordered effects list and an ordered connection set.
//! Member effects are stamped with a fresh [`EffectId`] on insertion;
//! removing or replacing an effect clears the outgoing effect's id and
//! cascade-removes every connection touching it, so the invariant "every
//! connection endpoint resolves to a member effect or the system boundary"
//! holds between any two calls.
//!
//! Two connection APIs exist:
//!
//! - [`connect`](Pedalboard::connect) / [`disconnect`](Pedalboard::disconnect)
//!   is the convenience pair. It refuses links where *both* endpoints are
//!   system ports, because such links carry no hint of which pedalboard the
//!   caller means to route through.
//! - [`add_connection`](Pedalboard::add_connection) /
//!   [`remove_connection`](Pedalboard::remove_connection) mutates the set
//!   directly and permits system-to-system links (e.g. a hardware monitor
//!   loop routed through this board).
//!
//! The connection set has mathematical set semantics: adding an identical
//! connection twice is a silent no-op and emits no event.

use crate::connection::{Connection, EffectTarget, PortRef};
use crate::effect::{Effect, EffectId};
use crate::error::ModelError;
use crate::observable::{Change, ListEvent, ObservableList};
use crate::observer::ObserverHandle;
use crate::port::PortDirection;

/// An ordered collection of effects plus a set of connections among their
/// ports.
#[derive(Debug)]
pub struct Pedalboard {
    name: String,
    effects: ObservableList<Effect>,
    connections: Vec<Connection>,
    next_effect_id: u32,
    observer: ObserverHandle,
}

impl Pedalboard {
    /// Creates an empty pedalboard.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: ObservableList::new("effects"),
            connections: Vec::new(),
            next_effect_id: 0,
            observer: ObserverHandle::none(),
        }
    }

    /// The pedalboard's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the pedalboard.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // --- Effects ---

    /// The ordered effects list.
    pub fn effects(&self) -> &ObservableList<Effect> {
        &self.effects
    }

    /// The effect at `index`, or `None` if out of range.
    pub fn effect(&self, index: usize) -> Option<&Effect> {
        self.effects.get(index)
    }

    /// Mutable access to the effect at `index` (for toggling, port edits).
    pub fn effect_mut(&mut self, index: usize) -> Option<&mut Effect> {
        self.effects.get_mut(index)
    }

    /// Looks a member effect up by its stamped id.
    pub fn effect_by_id(&self, id: EffectId) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id() == Some(id))
    }

    /// The current position of the member effect with `id`.
    pub fn effect_index(&self, id: EffectId) -> Option<usize> {
        self.effects.iter().position(|e| e.id() == Some(id))
    }

    /// Appends an effect, stamping a fresh id and propagating the observer.
    ///
    /// System effects are not members of any pedalboard and are rejected.
    pub fn append(&mut self, mut effect: Effect) -> Result<EffectId, ModelError> {
        if effect.is_system() {
            return Err(ModelError::SystemEffectNotMember);
        }
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        effect.set_id(Some(id));
        effect.set_observer(self.observer.clone());
        let event = self.effects.push(effect);
        #[cfg(feature = "tracing")]
        tracing::debug!("effect_add: '{}' {id} at {}", self.name, event.index);
        self.emit_effect_at(event.index, Change::Created, None);
        Ok(id)
    }

    /// Replaces the effect at `index`.
    ///
    /// The incoming effect gets a fresh id; the outgoing effect's id is
    /// cleared, its connections are cascade-removed (one DELETED connection
    /// event each, after the UPDATED effect event), and it is returned.
    pub fn replace(&mut self, index: usize, mut effect: Effect) -> Result<Effect, ModelError> {
        self.effects.check_index(index)?;
        if effect.is_system() {
            return Err(ModelError::SystemEffectNotMember);
        }
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        effect.set_id(Some(id));
        effect.set_observer(self.observer.clone());
        let event = self.effects.replace(index, effect)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut old) = old else { unreachable!() };
        let old_id = old.id();
        old.set_id(None);
        old.set_observer(ObserverHandle::none());
        #[cfg(feature = "tracing")]
        tracing::debug!("effect_replace: '{}' {id} at {index}", self.name);
        self.emit_effect_at(index, Change::Updated, Some(&old));
        if let Some(old_id) = old_id {
            self.remove_connections_of(old_id);
        }
        Ok(old)
    }

    /// Removes the effect at `index`, shifting later effects down by one.
    ///
    /// The removed effect's id is cleared before the DELETED event fires;
    /// its connections are cascade-removed afterwards. The effect is
    /// returned and may be held (undo) or re-inserted.
    pub fn remove(&mut self, index: usize) -> Result<Effect, ModelError> {
        let event = self.effects.remove(index)?;
        let ListEvent { index, old, .. } = event;
        let Some(mut effect) = old else { unreachable!() };
        let id = effect.id();
        effect.set_id(None);
        effect.set_observer(ObserverHandle::none());
        #[cfg(feature = "tracing")]
        tracing::debug!("effect_remove: '{}' at {index}", self.name);
        {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_effect_updated(&effect, Change::Deleted, index, self, None));
        }
        if let Some(id) = id {
            self.remove_connections_of(id);
        }
        Ok(effect)
    }

    /// Removes every effect (and with them, every member connection),
    /// returning the effects in their original order.
    pub fn clear(&mut self) -> Vec<Effect> {
        let mut removed = Vec::with_capacity(self.effects.len());
        while !self.effects.is_empty() {
            let index = self.effects.len() - 1;
            match self.remove(index) {
                Ok(effect) => removed.push(effect),
                Err(_) => break,
            }
        }
        removed.reverse();
        removed
    }

    // --- Connections ---

    /// The connection set, in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connects an output port to an input port.
    ///
    /// Refuses with [`ModelError::NotConnectable`] when both endpoints are
    /// system ports; use [`add_connection`](Self::add_connection) for those.
    /// Adding an identical connection twice is a silent no-op.
    pub fn connect(&mut self, output: PortRef, input: PortRef) -> Result<(), ModelError> {
        if output.is_system() && input.is_system() {
            return Err(ModelError::NotConnectable);
        }
        let connection = Connection::new(output, input)?;
        self.add_connection(connection)
    }

    /// Removes the connection between an output port and an input port.
    ///
    /// Same endpoint restriction as [`connect`](Self::connect). Fails with
    /// [`ModelError::NotConnected`] if no such connection exists.
    pub fn disconnect(&mut self, output: PortRef, input: PortRef) -> Result<(), ModelError> {
        if output.is_system() && input.is_system() {
            return Err(ModelError::NotConnectable);
        }
        let connection = Connection::new(output, input)?;
        self.remove_connection(&connection)
    }

    /// Adds a connection to the set directly.
    ///
    /// Validates that member endpoints resolve to current members carrying
    /// the named symbol in the matching port list. A duplicate of an
    /// existing connection is absorbed silently (no mutation, no event).
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), ModelError> {
        self.validate_connection(&connection)?;
        if self.connections.contains(&connection) {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("connect: '{}' {connection}", self.name);
        self.connections.push(connection);
        let index = self.connections.len() - 1;
        if let Some(connection) = self.connections.last() {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_connection_updated(connection, Change::Created, index, self));
        }
        Ok(())
    }

    /// Removes a connection from the set directly.
    pub fn remove_connection(&mut self, connection: &Connection) -> Result<(), ModelError> {
        let Some(index) = self.connections.iter().position(|c| c == connection) else {
            return Err(ModelError::NotConnected(connection.clone()));
        };
        let removed = self.connections.remove(index);
        #[cfg(feature = "tracing")]
        tracing::debug!("disconnect: '{}' {removed}", self.name);
        let observer = self.observer.clone();
        observer.notify(|o| o.on_connection_updated(&removed, Change::Deleted, index, self));
        Ok(())
    }

    // --- Observer plumbing ---

    /// Replaces the observer slot, cascading the handle into every member
    /// effect.
    pub fn set_observer(&mut self, observer: ObserverHandle) {
        for effect in self.effects.iter_mut() {
            effect.set_observer(observer.clone());
        }
        self.observer = observer;
    }

    /// The current observer slot.
    pub fn observer(&self) -> &ObserverHandle {
        &self.observer
    }

    // --- Internals ---

    fn emit_effect_at(&self, index: usize, change: Change, old: Option<&Effect>) {
        if let Some(effect) = self.effects.get(index) {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_effect_updated(effect, change, index, self, old));
        }
    }

    /// Drops every connection touching the member id, one DELETED event per
    /// connection, preserving the relative order of survivors.
    fn remove_connections_of(&mut self, id: EffectId) {
        let mut index = 0;
        while index < self.connections.len() {
            if self.connections[index].touches(id) {
                let removed = self.connections.remove(index);
                #[cfg(feature = "tracing")]
                tracing::debug!("disconnect: '{}' {removed} (cascade)", self.name);
                let observer = self.observer.clone();
                observer
                    .notify(|o| o.on_connection_updated(&removed, Change::Deleted, index, self));
            } else {
                index += 1;
            }
        }
    }

    fn validate_connection(&self, connection: &Connection) -> Result<(), ModelError> {
        self.validate_endpoint(connection.output(), PortDirection::Output)?;
        self.validate_endpoint(connection.input(), PortDirection::Input)?;
        Ok(())
    }

    fn validate_endpoint(
        &self,
        endpoint: &PortRef,
        direction: PortDirection,
    ) -> Result<(), ModelError> {
        match endpoint.target() {
            // System port symbols belong to the audio driver; the model
            // cannot enumerate them and accepts them as given.
            EffectTarget::System => Ok(()),
            EffectTarget::Member(id) => {
                let effect = self
                    .effect_by_id(id)
                    .ok_or(ModelError::EffectNotFound(id))?;
                if effect
                    .ports(direction, endpoint.signal())
                    .index_of(endpoint.symbol())
                    .is_none()
                {
                    return Err(ModelError::UnknownSymbol {
                        direction,
                        signal: endpoint.signal(),
                        symbol: endpoint.symbol().to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}
