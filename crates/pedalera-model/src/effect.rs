//! Effects: processing units exposing ordered port lists.
//!
//! An effect owns four port sequences (audio in/out, MIDI in/out) and is
//! polymorphic over two kinds: plugin-backed effects, whose ports come from
//! externally resolved plugin metadata, and system boundary effects, whose
//! ports represent fixed hardware channels. The kind tag alone governs the
//! connection rules; there is no other behavioral divergence.
//!
//! A member effect carries the [`EffectId`] its pedalboard stamped on
//! insertion. Ids are assigned sequentially per pedalboard and never reused,
//! so a connection referencing an id can never silently rebind to a later
//! insertion.

use std::fmt;

use crate::connection::PortRef;
use crate::error::ModelError;
use crate::observable::{Change, ListEvent};
use crate::observer::ObserverHandle;
use crate::port::{Port, PortDirection, PortList, SignalKind};

/// Pedalboard-scoped stable identifier of a member effect.
///
/// Stamped on insertion, cleared on removal; `None` on a detached effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(pub(crate) u32);

impl EffectId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EffectId({})", self.0)
    }
}

/// The kind of an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectKind {
    /// Backed by an external plugin, identified by URI.
    Plugin {
        /// Plugin identifier (e.g. an LV2 URI).
        uri: String,
    },
    /// System boundary effect: its ports are hardware channels. Exists
    /// independently of any single pedalboard.
    System,
}

/// A processing unit in the routing graph.
#[derive(Debug)]
pub struct Effect {
    id: Option<EffectId>,
    name: String,
    kind: EffectKind,
    active: bool,
    audio_inputs: PortList,
    audio_outputs: PortList,
    midi_inputs: PortList,
    midi_outputs: PortList,
    observer: ObserverHandle,
}

impl Effect {
    /// Creates a plugin-backed effect with no ports.
    ///
    /// Ports are added afterwards from the plugin's resolved metadata, in
    /// the order the metadata lists them.
    pub fn plugin(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: EffectKind::Plugin { uri: uri.into() },
            active: true,
            audio_inputs: PortList::new(),
            audio_outputs: PortList::new(),
            midi_inputs: PortList::new(),
            midi_outputs: PortList::new(),
            observer: ObserverHandle::none(),
        }
    }

    /// Creates a system boundary effect from hardware channel symbols.
    ///
    /// Capture jacks feed signal into the graph, so they materialize as
    /// audio *outputs*; playback jacks drain the graph, so they materialize
    /// as audio *inputs*.
    pub fn system(
        name: impl Into<String>,
        capture: &[&str],
        playback: &[&str],
    ) -> Result<Self, ModelError> {
        let mut effect = Self {
            id: None,
            name: name.into(),
            kind: EffectKind::System,
            active: true,
            audio_inputs: PortList::new(),
            audio_outputs: PortList::new(),
            midi_inputs: PortList::new(),
            midi_outputs: PortList::new(),
            observer: ObserverHandle::none(),
        };
        for symbol in capture {
            effect.add_port(Port::new(*symbol, PortDirection::Output, SignalKind::Audio))?;
        }
        for symbol in playback {
            effect.add_port(Port::new(*symbol, PortDirection::Input, SignalKind::Audio))?;
        }
        Ok(effect)
    }

    // --- Identity and kind ---

    /// The id stamped by the owning pedalboard, or `None` when detached.
    pub fn id(&self) -> Option<EffectId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: Option<EffectId>) {
        self.id = id;
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The effect kind.
    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    /// The plugin URI, if this is a plugin-backed effect.
    pub fn uri(&self) -> Option<&str> {
        match &self.kind {
            EffectKind::Plugin { uri } => Some(uri),
            EffectKind::System => None,
        }
    }

    /// Returns `true` for system boundary effects, which exist independently
    /// of any single pedalboard.
    pub fn is_system(&self) -> bool {
        matches!(self.kind, EffectKind::System)
    }

    // --- Active status ---

    /// Whether the effect is currently active (not bypassed).
    pub fn active(&self) -> bool {
        self.active
    }

    /// Sets the active flag, notifying the observer on an actual change.
    ///
    /// Setting the current value again is a silent no-op. System effects are
    /// always active and refuse.
    pub fn set_active(&mut self, active: bool) -> Result<(), ModelError> {
        if self.is_system() {
            return Err(ModelError::SystemEffectImmutable);
        }
        if self.active == active {
            return Ok(());
        }
        self.active = active;
        #[cfg(feature = "tracing")]
        tracing::debug!("effect_toggle: '{}' active={}", self.name, self.active);
        let observer = self.observer.clone();
        observer.notify(|o| o.on_effect_status_toggled(self));
        Ok(())
    }

    /// Flips the active flag, returning the new state.
    pub fn toggle(&mut self) -> Result<bool, ModelError> {
        let target = !self.active;
        self.set_active(target)?;
        Ok(target)
    }

    // --- Ports ---

    /// Audio input ports, in order.
    pub fn audio_inputs(&self) -> &PortList {
        &self.audio_inputs
    }

    /// Audio output ports, in order.
    pub fn audio_outputs(&self) -> &PortList {
        &self.audio_outputs
    }

    /// MIDI input ports, in order.
    pub fn midi_inputs(&self) -> &PortList {
        &self.midi_inputs
    }

    /// MIDI output ports, in order.
    pub fn midi_outputs(&self) -> &PortList {
        &self.midi_outputs
    }

    /// The port list matching a direction-and-signal pair.
    pub fn ports(&self, direction: PortDirection, signal: SignalKind) -> &PortList {
        match (direction, signal) {
            (PortDirection::Input, SignalKind::Audio) => &self.audio_inputs,
            (PortDirection::Output, SignalKind::Audio) => &self.audio_outputs,
            (PortDirection::Input, SignalKind::Midi) => &self.midi_inputs,
            (PortDirection::Output, SignalKind::Midi) => &self.midi_outputs,
        }
    }

    fn ports_mut(&mut self, direction: PortDirection, signal: SignalKind) -> &mut PortList {
        match (direction, signal) {
            (PortDirection::Input, SignalKind::Audio) => &mut self.audio_inputs,
            (PortDirection::Output, SignalKind::Audio) => &mut self.audio_outputs,
            (PortDirection::Input, SignalKind::Midi) => &mut self.midi_inputs,
            (PortDirection::Output, SignalKind::Midi) => &mut self.midi_outputs,
        }
    }

    /// Appends a port to the list matching its direction-and-signal tag.
    ///
    /// Returns the new port's index. Fails without mutating if the symbol
    /// already exists in that list.
    pub fn add_port(&mut self, port: Port) -> Result<usize, ModelError> {
        let direction = port.direction();
        let signal = port.signal();
        let event = self.ports_mut(direction, signal).push(port)?;
        let index = event.index;
        #[cfg(feature = "tracing")]
        tracing::debug!("port_add: '{}' {signal} {direction} [{index}]", self.name);
        if let Some(port) = self.ports(direction, signal).get(index) {
            let observer = self.observer.clone();
            observer.notify(|o| o.on_port_updated(port, Change::Created, index, self, None));
        }
        Ok(index)
    }

    /// Removes the port at `index` from the matching list, shifting later
    /// ports down by one.
    pub fn remove_port(
        &mut self,
        direction: PortDirection,
        signal: SignalKind,
        index: usize,
    ) -> Result<Port, ModelError> {
        let event = self.ports_mut(direction, signal).remove(index)?;
        let ListEvent { index, old, .. } = event;
        let Some(port) = old else { unreachable!() };
        #[cfg(feature = "tracing")]
        tracing::debug!("port_remove: '{}' {signal} {direction} [{index}]", self.name);
        let observer = self.observer.clone();
        observer.notify(|o| o.on_port_updated(&port, Change::Deleted, index, self, None));
        Ok(port)
    }

    // --- Port references ---

    /// Builds a [`PortRef`] locating one of this effect's ports.
    ///
    /// Fails with [`ModelError::UnknownSymbol`] if the symbol does not exist
    /// in the matching list, and with [`ModelError::DetachedEffect`] if this
    /// is a plugin effect not currently attached to a pedalboard (system
    /// effects are referenced without an id).
    pub fn port_ref(
        &self,
        direction: PortDirection,
        signal: SignalKind,
        symbol: &str,
    ) -> Result<PortRef, ModelError> {
        if self.ports(direction, signal).index_of(symbol).is_none() {
            return Err(ModelError::UnknownSymbol {
                direction,
                signal,
                symbol: symbol.to_string(),
            });
        }
        if self.is_system() {
            return Ok(PortRef::system(signal, symbol));
        }
        match self.id {
            Some(id) => Ok(PortRef::member(id, signal, symbol)),
            None => Err(ModelError::DetachedEffect),
        }
    }

    /// Reference to an audio input port.
    pub fn input_ref(&self, symbol: &str) -> Result<PortRef, ModelError> {
        self.port_ref(PortDirection::Input, SignalKind::Audio, symbol)
    }

    /// Reference to an audio output port.
    pub fn output_ref(&self, symbol: &str) -> Result<PortRef, ModelError> {
        self.port_ref(PortDirection::Output, SignalKind::Audio, symbol)
    }

    /// Reference to a MIDI input port.
    pub fn midi_input_ref(&self, symbol: &str) -> Result<PortRef, ModelError> {
        self.port_ref(PortDirection::Input, SignalKind::Midi, symbol)
    }

    /// Reference to a MIDI output port.
    pub fn midi_output_ref(&self, symbol: &str) -> Result<PortRef, ModelError> {
        self.port_ref(PortDirection::Output, SignalKind::Midi, symbol)
    }

    // --- Observer plumbing ---

    /// Replaces the observer slot. Cascaded from the owning pedalboard on
    /// attach and cleared on removal.
    pub fn set_observer(&mut self, observer: ObserverHandle) {
        self.observer = observer;
    }

    /// The current observer slot.
    pub fn observer(&self) -> &ObserverHandle {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ModelObserver;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        toggles: Vec<(String, bool)>,
        ports: Vec<(String, Change, usize)>,
    }

    impl ModelObserver for Recorder {
        fn on_effect_status_toggled(&mut self, effect: &Effect) {
            self.toggles.push((effect.name().to_string(), effect.active()));
        }

        fn on_port_updated(
            &mut self,
            port: &Port,
            change: Change,
            index: usize,
            _origin: &Effect,
            _old: Option<&Port>,
        ) {
            self.ports.push((port.symbol().to_string(), change, index));
        }
    }

    fn observed(effect: &mut Effect) -> Rc<RefCell<Recorder>> {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        effect.set_observer(ObserverHandle::new(recorder.clone()));
        recorder
    }

    #[test]
    fn system_maps_capture_to_outputs_and_playback_to_inputs() {
        let system =
            Effect::system("system", &["capture_1", "capture_2"], &["playback_1"]).unwrap();
        assert!(system.is_system());
        assert_eq!(
            system.audio_outputs().symbols().collect::<Vec<_>>(),
            vec!["capture_1", "capture_2"]
        );
        assert_eq!(
            system.audio_inputs().symbols().collect::<Vec<_>>(),
            vec!["playback_1"]
        );
    }

    #[test]
    fn toggle_flips_active_and_notifies_once() {
        let mut effect = Effect::plugin("urn:test", "Test");
        let recorder = observed(&mut effect);

        assert!(effect.active());
        assert!(!effect.toggle().unwrap());
        assert!(effect.toggle().unwrap());
        assert_eq!(
            recorder.borrow().toggles,
            vec![("Test".to_string(), false), ("Test".to_string(), true)]
        );
    }

    #[test]
    fn set_active_to_current_value_emits_nothing() {
        let mut effect = Effect::plugin("urn:test", "Test");
        let recorder = observed(&mut effect);

        effect.set_active(true).unwrap();
        assert!(recorder.borrow().toggles.is_empty());
    }

    #[test]
    fn system_effect_refuses_toggle() {
        let mut system = Effect::system("system", &["capture_1"], &[]).unwrap();
        assert_eq!(system.toggle().unwrap_err(), ModelError::SystemEffectImmutable);
        assert!(system.active());
    }

    #[test]
    fn add_port_emits_created_with_new_index() {
        let mut effect = Effect::plugin("urn:test", "Test");
        let recorder = observed(&mut effect);

        let index = effect
            .add_port(Port::new("in_l", PortDirection::Input, SignalKind::Audio))
            .unwrap();
        assert_eq!(index, 0);
        let index = effect
            .add_port(Port::new("in_r", PortDirection::Input, SignalKind::Audio))
            .unwrap();
        assert_eq!(index, 1);

        assert_eq!(
            recorder.borrow().ports,
            vec![
                ("in_l".to_string(), Change::Created, 0),
                ("in_r".to_string(), Change::Created, 1)
            ]
        );
    }

    #[test]
    fn duplicate_port_symbol_fails_without_event() {
        let mut effect = Effect::plugin("urn:test", "Test");
        let _ = effect
            .add_port(Port::new("in_l", PortDirection::Input, SignalKind::Audio))
            .unwrap();
        let recorder = observed(&mut effect);

        let err = effect
            .add_port(Port::new("in_l", PortDirection::Input, SignalKind::Audio))
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateSymbol("in_l".to_string()));
        assert!(recorder.borrow().ports.is_empty());
    }

    #[test]
    fn remove_port_shifts_sibling_indices() {
        let mut effect = Effect::plugin("urn:test", "Test");
        for symbol in ["a", "b", "c"] {
            let _ = effect
                .add_port(Port::new(symbol, PortDirection::Output, SignalKind::Audio))
                .unwrap();
        }

        let removed = effect
            .remove_port(PortDirection::Output, SignalKind::Audio, 0)
            .unwrap();
        assert_eq!(removed.symbol(), "a");
        assert_eq!(effect.audio_outputs().index_of("b"), Some(0));
        assert_eq!(effect.audio_outputs().index_of("c"), Some(1));
    }

    #[test]
    fn port_ref_on_detached_plugin_effect_fails() {
        let mut effect = Effect::plugin("urn:test", "Test");
        let _ = effect
            .add_port(Port::new("out_l", PortDirection::Output, SignalKind::Audio))
            .unwrap();

        assert_eq!(
            effect.output_ref("out_l").unwrap_err(),
            ModelError::DetachedEffect
        );
        assert!(matches!(
            effect.output_ref("nope").unwrap_err(),
            ModelError::UnknownSymbol { .. }
        ));
    }

    #[test]
    fn port_ref_on_system_effect_needs_no_id() {
        let system = Effect::system("system", &["capture_1"], &["playback_1"]).unwrap();
        let capture = system.output_ref("capture_1").unwrap();
        assert!(capture.is_system());
        assert_eq!(capture.symbol(), "capture_1");
    }
}
