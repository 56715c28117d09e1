//! Connections: directed edges from an output port to an input port.
//!
//! A connection is value-equal plain data. Endpoints are located by
//! `(effect, signal, symbol)` rather than by live reference, which keeps the
//! type hashable and usable as a set member without identity tracking, and
//! keeps the graph safe to mutate without back-pointer bookkeeping.

use std::fmt;

use crate::effect::EffectId;
use crate::error::ModelError;
use crate::port::SignalKind;

/// Which effect a [`PortRef`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    /// A member effect of the owning pedalboard, by stamped id.
    Member(EffectId),
    /// The system boundary effect (hardware capture/playback), which lives
    /// outside the pedalboard's member list and its index space.
    System,
}

/// Locates one port on one effect.
///
/// The port's direction is implied by which side of a [`Connection`] the
/// reference sits on; the symbol is resolved against the matching
/// direction-and-signal port list when the connection is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortRef {
    target: EffectTarget,
    signal: SignalKind,
    symbol: String,
}

impl PortRef {
    /// A reference to a port on a member effect.
    pub fn member(effect: EffectId, signal: SignalKind, symbol: impl Into<String>) -> Self {
        Self {
            target: EffectTarget::Member(effect),
            signal,
            symbol: symbol.into(),
        }
    }

    /// A reference to a port on the system boundary effect.
    pub fn system(signal: SignalKind, symbol: impl Into<String>) -> Self {
        Self {
            target: EffectTarget::System,
            signal,
            symbol: symbol.into(),
        }
    }

    /// The effect this reference points into.
    pub fn target(&self) -> EffectTarget {
        self.target
    }

    /// The signal kind of the referenced port.
    pub fn signal(&self) -> SignalKind {
        self.signal
    }

    /// The referenced port's symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns `true` if the reference points at the system boundary effect.
    pub fn is_system(&self) -> bool {
        matches!(self.target, EffectTarget::System)
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            EffectTarget::Member(id) => write!(f, "{id}:{}", self.symbol),
            EffectTarget::System => write!(f, "system:{}", self.symbol),
        }
    }
}

/// A directed edge from an output port to an input port.
///
/// Two connections are equal iff their endpoints are equal; the pedalboard's
/// connection set relies on this for duplicate absorption.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    output: PortRef,
    input: PortRef,
}

impl Connection {
    /// Builds a connection from `output` to `input`.
    ///
    /// Fails with [`ModelError::SignalMismatch`] if the endpoints carry
    /// different signal kinds.
    pub fn new(output: PortRef, input: PortRef) -> Result<Self, ModelError> {
        if output.signal() != input.signal() {
            return Err(ModelError::SignalMismatch);
        }
        Ok(Self { output, input })
    }

    /// The producing endpoint.
    pub fn output(&self) -> &PortRef {
        &self.output
    }

    /// The consuming endpoint.
    pub fn input(&self) -> &PortRef {
        &self.input
    }

    /// The signal kind carried by this connection.
    pub fn signal(&self) -> SignalKind {
        self.output.signal()
    }

    /// Returns `true` if either endpoint points at the member effect `id`.
    pub fn touches(&self, id: EffectId) -> bool {
        self.output.target() == EffectTarget::Member(id)
            || self.input.target() == EffectTarget::Member(id)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.output, self.input)
    }
}
