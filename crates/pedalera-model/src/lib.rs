//! Pedalera Model - the routing-graph data model for pedalboard management.
//!
//! This crate models a graph of audio/MIDI processing effects organized into
//! pedalboards and banks. It is a structural/control-plane model: it tracks
//! which effects exist, how their ports are wired, and who owns what, and it
//! reports every structural change to a registered observer. It does not
//! process audio.
//!
//! # Core Abstractions
//!
//! ## Entities
//!
//! - [`BoardManager`] - top-level ordered collection of banks and the observer
//!   registration point
//! - [`Bank`] - ordered collection of pedalboards
//! - [`Pedalboard`] - ordered collection of effects plus a set of connections
//! - [`Effect`] - a processing unit (plugin-backed or system) exposing ports
//! - [`Port`] / [`PortList`] - named terminals, ordered and symbol-addressable
//! - [`Connection`] - a directed edge from an output port to an input port
//!
//! ## Mutation & Notification
//!
//! - [`ObservableList`] - ordered, index-addressable container; every
//!   successful mutation produces exactly one [`ListEvent`]
//! - [`ModelObserver`] - capability trait receiving CREATED/UPDATED/DELETED
//!   callbacks after each applied mutation
//! - [`ObserverHandle`] - optional shared observer slot; absence means skip
//!   notification
//!
//! # Ownership Model
//!
//! Entities are owned by their parent collections: a pedalboard lives inside
//! exactly one bank's list, an effect inside exactly one pedalboard's list.
//! Instead of live parent pointers, member effects carry a pedalboard-scoped
//! [`EffectId`] stamped on insertion and cleared on removal; connections
//! locate their endpoints by `(effect, signal, symbol)` value via [`PortRef`].
//! Port indices are derived by position lookup, never stored, so they stay
//! correct after reordering.
//!
//! System (hardware) effects exist outside any pedalboard and are referenced
//! by connections through the [`EffectTarget::System`] marker.
//!
//! # Threading
//!
//! The model is single-threaded by design. Observer callbacks run
//! synchronously inside the mutating call, after the mutation is fully
//! applied. The shared observer slot is `Rc<RefCell<..>>`, so the entity
//! types are deliberately not `Send`/`Sync`; callers needing cross-thread
//! mutation must provide their own exclusion and confinement.
//!
//! # Example
//!
//! ```rust
//! use pedalera_model::{Bank, Effect, Pedalboard, Port, PortDirection, SignalKind};
//!
//! let mut pedalboard = Pedalboard::new("Rocksmith");
//!
//! let mut reverb = Effect::plugin("http://calf.sourceforge.net/plugins/Reverb", "Calf Reverb");
//! reverb.add_port(Port::new("in_l", PortDirection::Input, SignalKind::Audio)).unwrap();
//! reverb.add_port(Port::new("out_l", PortDirection::Output, SignalKind::Audio)).unwrap();
//! let reverb = pedalboard.append(reverb).unwrap();
//!
//! let system = Effect::system("system", &["capture_1"], &["playback_1"]).unwrap();
//! let capture = system.output_ref("capture_1").unwrap();
//! let rev_in = pedalboard.effect_by_id(reverb).unwrap().input_ref("in_l").unwrap();
//! pedalboard.connect(capture, rev_in).unwrap();
//!
//! let mut bank = Bank::new("Bank 1");
//! bank.append(pedalboard);
//! assert_eq!(bank.pedalboards().len(), 1);
//! ```

pub mod bank;
pub mod connection;
pub mod effect;
pub mod error;
pub mod manager;
pub mod observable;
pub mod observer;
pub mod pedalboard;
pub mod port;

pub use bank::Bank;
pub use connection::{Connection, EffectTarget, PortRef};
pub use effect::{Effect, EffectId, EffectKind};
pub use error::ModelError;
pub use manager::BoardManager;
pub use observable::{Change, ListEvent, ObservableList};
pub use observer::{FanoutObserver, ModelObserver, ObserverHandle};
pub use pedalboard::Pedalboard;
pub use port::{Port, PortDirection, PortList, SignalKind};
