//! Bank document format and the projection between it and the live graph.
//!
//! A bank document is a plain serde tree. Cross-references are expressed as
//! integer indices into ancestor sequences, never as embedded copies: a
//! connection endpoint names its effect by position in the pedalboard's
//! effects array and its port by symbol (plus the port's position within its
//! list, informational). The system boundary effect lives outside that index
//! space and is referenced by the `"system"` marker instead.
//!
//! Plugin effects are serialized as their URI plus the active flag only; the
//! plugin metadata registry re-supplies names and port lists at decode time,
//! so the document stays compact and the registry stays authoritative.
//!
//! Decoding rebuilds the graph by replaying appends and connection adds
//! through the model API, so every structural rule is re-validated on load.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "name": "Bank 1",
//!   "pedalboards": [{
//!     "name": "Rocksmith",
//!     "effects": [
//!       {"plugin": "http://calf.sourceforge.net/plugins/Reverb", "name": "Calf Reverb", "active": true}
//!     ],
//!     "connections": [{
//!       "signal": "audio",
//!       "output": {"effect": "system", "symbol": "capture_1"},
//!       "input": {"effect": 0, "symbol": "in_l", "index": 0}
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use pedalera_model::{
    Bank, Connection, Effect, EffectId, EffectTarget, Pedalboard, PortDirection, PortRef,
    SignalKind,
};
use pedalera_registry::PluginRegistry;

use crate::error::PersistError;

/// Serialized form of a [`Bank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDocument {
    /// Bank name.
    pub name: String,
    /// Serialized pedalboards, in order.
    #[serde(default)]
    pub pedalboards: Vec<PedalboardDocument>,
}

/// Serialized form of a [`Pedalboard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedalboardDocument {
    /// Pedalboard name.
    pub name: String,
    /// Serialized member effects, in order.
    #[serde(default)]
    pub effects: Vec<EffectDocument>,
    /// Serialized connections, in insertion order.
    #[serde(default)]
    pub connections: Vec<ConnectionDocument>,
}

/// Serialized form of a member [`Effect`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDocument {
    /// Plugin URI; the registry resolves it back to metadata on load.
    pub plugin: String,
    /// Informational display name. The registry is authoritative on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the effect is active (not bypassed).
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Serialized form of a [`Connection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDocument {
    /// `"audio"` or `"midi"`.
    pub signal: String,
    /// Producing endpoint.
    pub output: EndpointDocument,
    /// Consuming endpoint.
    pub input: EndpointDocument,
}

/// Serialized form of one connection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDocument {
    /// Effect position in the pedalboard's effects array, or the `"system"`
    /// marker for the boundary effect.
    pub effect: EndpointEffect,
    /// Port symbol within the endpoint's direction-and-signal list.
    pub symbol: String,
    /// Port position within its list at save time. Informational; the
    /// symbol is authoritative on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// The effect slot of an endpoint: an index into the ordinary member space,
/// or the out-of-band system marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointEffect {
    /// Position of a member effect in the pedalboard's effects array.
    Member(usize),
    /// The `"system"` marker.
    System(String),
}

// --- Encoding ---

/// Projects a bank into its serialized document.
pub fn encode_bank(bank: &Bank) -> Result<BankDocument, PersistError> {
    Ok(BankDocument {
        name: bank.name().to_string(),
        pedalboards: bank
            .pedalboards()
            .iter()
            .map(encode_pedalboard)
            .collect::<Result<_, _>>()?,
    })
}

/// Projects a pedalboard into its serialized document.
pub fn encode_pedalboard(pedalboard: &Pedalboard) -> Result<PedalboardDocument, PersistError> {
    let effects = pedalboard
        .effects()
        .iter()
        .map(encode_effect)
        .collect::<Result<_, _>>()?;
    let connections = pedalboard
        .connections()
        .iter()
        .map(|connection| encode_connection(pedalboard, connection))
        .collect::<Result<_, _>>()?;
    Ok(PedalboardDocument {
        name: pedalboard.name().to_string(),
        effects,
        connections,
    })
}

fn encode_effect(effect: &Effect) -> Result<EffectDocument, PersistError> {
    let Some(uri) = effect.uri() else {
        // Pedalboards reject system effects as members, so every member
        // carries a plugin URI.
        return Err(PersistError::Malformed(
            "member effect without a plugin uri".to_string(),
        ));
    };
    Ok(EffectDocument {
        plugin: uri.to_string(),
        name: Some(effect.name().to_string()),
        active: effect.active(),
    })
}

fn encode_connection(
    pedalboard: &Pedalboard,
    connection: &Connection,
) -> Result<ConnectionDocument, PersistError> {
    Ok(ConnectionDocument {
        signal: connection.signal().to_string(),
        output: encode_endpoint(pedalboard, connection.output(), PortDirection::Output)?,
        input: encode_endpoint(pedalboard, connection.input(), PortDirection::Input)?,
    })
}

fn encode_endpoint(
    pedalboard: &Pedalboard,
    endpoint: &PortRef,
    direction: PortDirection,
) -> Result<EndpointDocument, PersistError> {
    match endpoint.target() {
        EffectTarget::System => Ok(EndpointDocument {
            effect: EndpointEffect::System("system".to_string()),
            symbol: endpoint.symbol().to_string(),
            index: None,
        }),
        EffectTarget::Member(id) => {
            let Some(effect_index) = pedalboard.effect_index(id) else {
                return Err(PersistError::DanglingEndpoint(endpoint.to_string()));
            };
            let port_index = pedalboard
                .effect(effect_index)
                .and_then(|e| {
                    e.ports(direction, endpoint.signal())
                        .index_of(endpoint.symbol())
                })
                .ok_or_else(|| PersistError::DanglingEndpoint(endpoint.to_string()))?;
            Ok(EndpointDocument {
                effect: EndpointEffect::Member(effect_index),
                symbol: endpoint.symbol().to_string(),
                index: Some(port_index),
            })
        }
    }
}

// --- Decoding ---

/// Rebuilds a bank from its serialized document.
///
/// Effects are re-materialized through `registry`; every append and
/// connection add replays through the model API so structural validation
/// re-runs.
pub fn decode_bank(
    document: &BankDocument,
    registry: &PluginRegistry,
) -> Result<Bank, PersistError> {
    let mut bank = Bank::new(&document.name);
    for pedalboard_document in &document.pedalboards {
        bank.append(decode_pedalboard(pedalboard_document, registry)?);
    }
    Ok(bank)
}

/// Rebuilds a pedalboard from its serialized document.
pub fn decode_pedalboard(
    document: &PedalboardDocument,
    registry: &PluginRegistry,
) -> Result<Pedalboard, PersistError> {
    let mut pedalboard = Pedalboard::new(&document.name);

    let mut ids = Vec::with_capacity(document.effects.len());
    for effect_document in &document.effects {
        let effect = registry
            .create(&effect_document.plugin)
            .ok_or_else(|| PersistError::UnknownPlugin(effect_document.plugin.clone()))?;
        let id = pedalboard.append(effect)?;
        if !effect_document.active {
            let index = pedalboard.effects().len() - 1;
            if let Some(effect) = pedalboard.effect_mut(index) {
                effect.set_active(false)?;
            }
        }
        ids.push(id);
    }

    for connection_document in &document.connections {
        let signal = decode_signal(&connection_document.signal)?;
        let output = decode_endpoint(&connection_document.output, &ids, signal)?;
        let input = decode_endpoint(&connection_document.input, &ids, signal)?;
        let connection = Connection::new(output, input)?;
        pedalboard.add_connection(connection)?;
    }

    Ok(pedalboard)
}

fn decode_signal(signal: &str) -> Result<SignalKind, PersistError> {
    match signal {
        "audio" => Ok(SignalKind::Audio),
        "midi" => Ok(SignalKind::Midi),
        other => Err(PersistError::Malformed(format!(
            "unknown signal kind '{other}'"
        ))),
    }
}

fn decode_endpoint(
    document: &EndpointDocument,
    ids: &[EffectId],
    signal: SignalKind,
) -> Result<PortRef, PersistError> {
    match &document.effect {
        EndpointEffect::System(marker) => {
            if marker != "system" {
                return Err(PersistError::Malformed(format!(
                    "unknown effect marker '{marker}'"
                )));
            }
            Ok(PortRef::system(signal, document.symbol.as_str()))
        }
        EndpointEffect::Member(index) => {
            let id = ids.get(*index).ok_or_else(|| {
                PersistError::Malformed(format!("effect index {index} out of range"))
            })?;
            Ok(PortRef::member(*id, signal, document.symbol.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVERB: &str = "http://calf.sourceforge.net/plugins/Reverb";
    const FILTER: &str = "http://calf.sourceforge.net/plugins/Filter";

    fn small_bank(registry: &PluginRegistry) -> Bank {
        let mut pedalboard = Pedalboard::new("pb");
        let reverb = pedalboard.append(registry.create(REVERB).unwrap()).unwrap();
        let filter = pedalboard.append(registry.create(FILTER).unwrap()).unwrap();

        let system = Effect::system("system", &["capture_1"], &["playback_1"]).unwrap();
        let capture = system.output_ref("capture_1").unwrap();
        let reverb_in = pedalboard
            .effect_by_id(reverb)
            .unwrap()
            .input_ref("in_l")
            .unwrap();
        pedalboard.connect(capture, reverb_in).unwrap();

        let reverb_out = pedalboard
            .effect_by_id(reverb)
            .unwrap()
            .output_ref("out_l")
            .unwrap();
        let filter_in = pedalboard
            .effect_by_id(filter)
            .unwrap()
            .input_ref("in_l")
            .unwrap();
        pedalboard.connect(reverb_out, filter_in).unwrap();

        let mut bank = Bank::new("Bank 1");
        bank.append(pedalboard);
        bank
    }

    #[test]
    fn member_endpoints_are_encoded_as_indices() {
        let registry = PluginRegistry::new();
        let bank = small_bank(&registry);

        let document = encode_bank(&bank).unwrap();
        let connection = &document.pedalboards[0].connections[1];
        assert_eq!(connection.output.effect, EndpointEffect::Member(0));
        assert_eq!(connection.output.symbol, "out_l");
        assert_eq!(connection.output.index, Some(0));
        assert_eq!(connection.input.effect, EndpointEffect::Member(1));
    }

    #[test]
    fn system_endpoints_use_the_marker() {
        let registry = PluginRegistry::new();
        let bank = small_bank(&registry);

        let document = encode_bank(&bank).unwrap();
        let connection = &document.pedalboards[0].connections[0];
        assert_eq!(
            connection.output.effect,
            EndpointEffect::System("system".to_string())
        );
        assert_eq!(connection.output.index, None);
    }

    #[test]
    fn decode_rebuilds_the_same_shape() {
        let registry = PluginRegistry::new();
        let bank = small_bank(&registry);

        let document = encode_bank(&bank).unwrap();
        let decoded = decode_bank(&document, &registry).unwrap();

        assert_eq!(decoded.name(), "Bank 1");
        assert_eq!(decoded.pedalboards().len(), 1);
        let pedalboard = decoded.pedalboard(0).unwrap();
        assert_eq!(pedalboard.effects().len(), 2);
        assert_eq!(pedalboard.connections().len(), 2);

        // Re-encoding must reproduce the document exactly.
        assert_eq!(encode_bank(&decoded).unwrap(), document);
    }

    #[test]
    fn inactive_effects_survive_the_round_trip() {
        let registry = PluginRegistry::new();
        let mut bank = small_bank(&registry);
        bank.pedalboard_mut(0)
            .unwrap()
            .effect_mut(0)
            .unwrap()
            .set_active(false)
            .unwrap();

        let document = encode_bank(&bank).unwrap();
        assert!(!document.pedalboards[0].effects[0].active);

        let decoded = decode_bank(&document, &registry).unwrap();
        assert!(!decoded.pedalboard(0).unwrap().effect(0).unwrap().active());
        assert!(decoded.pedalboard(0).unwrap().effect(1).unwrap().active());
    }

    #[test]
    fn unknown_plugin_is_a_typed_error() {
        let document: BankDocument = serde_json::from_str(
            r#"{"name": "B", "pedalboards": [{"name": "P", "effects": [{"plugin": "urn:gone"}]}]}"#,
        )
        .unwrap();

        let err = decode_bank(&document, &PluginRegistry::new()).unwrap_err();
        assert!(matches!(err, PersistError::UnknownPlugin(uri) if uri == "urn:gone"));
    }

    #[test]
    fn unknown_effect_marker_is_malformed() {
        let document: BankDocument = serde_json::from_str(
            r#"{
                "name": "B",
                "pedalboards": [{
                    "name": "P",
                    "effects": [],
                    "connections": [{
                        "signal": "audio",
                        "output": {"effect": "driver", "symbol": "capture_1"},
                        "input": {"effect": "system", "symbol": "playback_1"}
                    }]
                }]
            }"#,
        )
        .unwrap();

        let err = decode_bank(&document, &PluginRegistry::new()).unwrap_err();
        assert!(matches!(err, PersistError::Malformed(_)));
    }

    #[test]
    fn out_of_range_effect_index_is_malformed() {
        let document: BankDocument = serde_json::from_str(
            r#"{
                "name": "B",
                "pedalboards": [{
                    "name": "P",
                    "effects": [],
                    "connections": [{
                        "signal": "audio",
                        "output": {"effect": 3, "symbol": "out_l"},
                        "input": {"effect": "system", "symbol": "playback_1"}
                    }]
                }]
            }"#,
        )
        .unwrap();

        let err = decode_bank(&document, &PluginRegistry::new()).unwrap_err();
        assert!(matches!(err, PersistError::Malformed(_)));
    }

    #[test]
    fn missing_active_defaults_to_true() {
        let document: BankDocument = serde_json::from_str(&format!(
            r#"{{"name": "B", "pedalboards": [{{"name": "P", "effects": [{{"plugin": "{REVERB}"}}]}}]}}"#
        ))
        .unwrap();

        let decoded = decode_bank(&document, &PluginRegistry::new()).unwrap();
        assert!(decoded.pedalboard(0).unwrap().effect(0).unwrap().active());
    }
}
