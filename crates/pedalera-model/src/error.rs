//! Error types for model mutations.
//!
//! Every error is a synchronous return-path failure: a rejected operation
//! leaves the graph exactly as it was and emits no observer event.

use thiserror::Error;

use crate::connection::Connection;
use crate::effect::EffectId;
use crate::port::{PortDirection, SignalKind};

/// Errors that can occur while mutating or querying the routing graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Index-based get/set/delete with an invalid position.
    #[error("index {index} out of range for {what} of length {len}")]
    IndexOutOfRange {
        /// Which collection was addressed (e.g. `"effects"`, `"pedalboards"`).
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the collection at the time of the call.
        len: usize,
    },

    /// A port sequence was indexed by an unknown symbolic key.
    #[error("no {signal} {direction} port with symbol '{symbol}'")]
    UnknownSymbol {
        /// Direction of the searched port list.
        direction: PortDirection,
        /// Signal kind of the searched port list.
        signal: SignalKind,
        /// The symbol that failed to resolve.
        symbol: String,
    },

    /// Both endpoints are system ports. Such links have no unambiguous owning
    /// pedalboard, so the convenience pair refuses; use
    /// [`Pedalboard::add_connection`](crate::Pedalboard::add_connection) /
    /// [`Pedalboard::remove_connection`](crate::Pedalboard::remove_connection)
    /// on the target pedalboard directly.
    #[error("both endpoints are system ports; mutate the pedalboard's connection set directly")]
    NotConnectable,

    /// Audio and MIDI ports cannot be joined by one connection.
    #[error("audio and midi ports cannot be connected")]
    SignalMismatch,

    /// A connection endpoint names an effect that is not a member of the
    /// pedalboard being mutated.
    #[error("{0} is not a member of this pedalboard")]
    EffectNotFound(EffectId),

    /// Disconnect was asked to remove a connection that does not exist.
    #[error("not connected: {0}")]
    NotConnected(Connection),

    /// A port with this symbol already exists in the addressed port list.
    #[error("port symbol '{0}' already exists in this list")]
    DuplicateSymbol(String),

    /// System effects exist independently of any pedalboard and cannot be
    /// inserted into a pedalboard's member list.
    #[error("system effects exist outside any pedalboard and cannot be added as members")]
    SystemEffectNotMember,

    /// System effects are always active; their status cannot be toggled.
    #[error("system effects are always active")]
    SystemEffectImmutable,

    /// A port reference was requested from a plugin effect that is not
    /// currently attached to a pedalboard.
    #[error("effect is not attached to a pedalboard")]
    DetachedEffect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::PortRef;
    use crate::effect::EffectId;

    // --- Display formatting ---

    #[test]
    fn index_out_of_range_display() {
        let err = ModelError::IndexOutOfRange {
            what: "effects",
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "index 4 out of range for effects of length 2"
        );
    }

    #[test]
    fn unknown_symbol_display() {
        let err = ModelError::UnknownSymbol {
            direction: PortDirection::Input,
            signal: SignalKind::Midi,
            symbol: "midi_in".to_string(),
        };
        assert_eq!(err.to_string(), "no midi input port with symbol 'midi_in'");
    }

    #[test]
    fn effect_not_found_display() {
        let err = ModelError::EffectNotFound(EffectId(7));
        assert_eq!(err.to_string(), "EffectId(7) is not a member of this pedalboard");
    }

    #[test]
    fn not_connected_display() {
        let connection = Connection::new(
            PortRef::system(SignalKind::Audio, "capture_1"),
            PortRef::member(EffectId(0), SignalKind::Audio, "in_l"),
        )
        .unwrap();
        let msg = ModelError::NotConnected(connection).to_string();
        assert!(msg.starts_with("not connected:"), "got: {msg}");
        assert!(msg.contains("capture_1"), "got: {msg}");
    }
}
