//! Plugin metadata registry and effect factory for pedalera.
//!
//! This crate is the model's plugin metadata provider: for a given plugin
//! URI it supplies the ordered audio/MIDI input and output symbols to
//! materialize as ports when an [`Effect`] is constructed. The model only
//! needs this at effect-construction time; afterwards the graph carries the
//! ports itself.
//!
//! # Features
//!
//! - **Plugin Discovery**: list all known plugins with metadata
//! - **Factory Pattern**: materialize an [`Effect`] by URI at runtime
//! - **Category System**: plugins organized by type (reverb, filter, etc.)
//! - **External Registration**: [`register()`](PluginRegistry::register)
//!   admits descriptors produced by an external scanner (e.g. an LV2 world
//!   walk)
//!
//! # Example
//!
//! ```rust
//! use pedalera_registry::{PluginCategory, PluginRegistry};
//!
//! let registry = PluginRegistry::new();
//!
//! // List all plugins
//! for plugin in registry.all() {
//!     println!("{}: {}", plugin.uri, plugin.name);
//! }
//!
//! // Materialize an effect by URI
//! let reverb = registry
//!     .create("http://calf.sourceforge.net/plugins/Reverb")
//!     .unwrap();
//! assert_eq!(reverb.audio_inputs().len(), 2);
//!
//! // Filter by category
//! for plugin in registry.in_category(PluginCategory::TimeBased) {
//!     println!("time-based: {}", plugin.name);
//! }
//! ```

use pedalera_model::{Effect, Port, PortDirection, SignalKind};

/// Category of plugin for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginCategory {
    /// Dynamics processing (compressor, limiter, gate)
    Dynamics,
    /// Distortion and saturation effects
    Distortion,
    /// Modulation effects (chorus, flanger, phaser, vibrato)
    Modulation,
    /// Time-based effects (delay, reverb)
    TimeBased,
    /// Filter effects (lowpass, highpass, etc.)
    Filter,
    /// MIDI utilities and event processors
    Midi,
    /// Utility plugins (gain, routing helpers)
    Utility,
}

impl PluginCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            PluginCategory::Dynamics => "Dynamics",
            PluginCategory::Distortion => "Distortion",
            PluginCategory::Modulation => "Modulation",
            PluginCategory::TimeBased => "Time-Based",
            PluginCategory::Filter => "Filter",
            PluginCategory::Midi => "MIDI",
            PluginCategory::Utility => "Utility",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            PluginCategory::Dynamics => {
                "Compressors, limiters, gates, and other dynamics processors"
            }
            PluginCategory::Distortion => {
                "Distortion, overdrive, saturation, and waveshaping effects"
            }
            PluginCategory::Modulation => {
                "Chorus, flanger, phaser, vibrato, and other modulation effects"
            }
            PluginCategory::TimeBased => "Delay, reverb, and other time-based effects",
            PluginCategory::Filter => "Lowpass, highpass, bandpass, and other filter effects",
            PluginCategory::Midi => "MIDI event filters, converters, and utilities",
            PluginCategory::Utility => "Gain stages and routing helpers",
        }
    }
}

/// Describes a plugin known to the registry.
///
/// The four symbol lists are ordered exactly as the plugin exposes its
/// ports; the factory materializes ports in this order, which is also the
/// order serialized bank documents index into.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// Unique plugin identifier (e.g. an LV2 URI).
    pub uri: String,
    /// Human-readable name.
    pub name: String,
    /// Category for organization.
    pub category: PluginCategory,
    /// Audio input port symbols, in port order.
    pub audio_inputs: Vec<String>,
    /// Audio output port symbols, in port order.
    pub audio_outputs: Vec<String>,
    /// MIDI input port symbols, in port order.
    pub midi_inputs: Vec<String>,
    /// MIDI output port symbols, in port order.
    pub midi_outputs: Vec<String>,
}

impl PluginDescriptor {
    /// Creates a descriptor with no ports.
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        category: PluginCategory,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            category,
            audio_inputs: Vec::new(),
            audio_outputs: Vec::new(),
            midi_inputs: Vec::new(),
            midi_outputs: Vec::new(),
        }
    }

    /// Sets the audio input symbols.
    pub fn with_audio_inputs(mut self, symbols: &[&str]) -> Self {
        self.audio_inputs = symbols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the audio output symbols.
    pub fn with_audio_outputs(mut self, symbols: &[&str]) -> Self {
        self.audio_outputs = symbols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the MIDI input symbols.
    pub fn with_midi_inputs(mut self, symbols: &[&str]) -> Self {
        self.midi_inputs = symbols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the MIDI output symbols.
    pub fn with_midi_outputs(mut self, symbols: &[&str]) -> Self {
        self.midi_outputs = symbols.iter().map(|s| (*s).to_string()).collect();
        self
    }
}

/// Registry of all known plugins.
///
/// Provides a centralized way to discover plugin metadata and materialize
/// effects by URI. A set of well-known LV2 plugins is registered on
/// construction; external scanners add more through
/// [`register()`](Self::register).
pub struct PluginRegistry {
    entries: Vec<PluginDescriptor>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Creates a registry with the built-in plugin table registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(6),
        };
        registry.register_builtin_plugins();
        registry
    }

    /// Creates a registry with no descriptors at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn register_builtin_plugins(&mut self) {
        self.register(
            PluginDescriptor::new(
                "http://calf.sourceforge.net/plugins/Reverb",
                "Calf Reverb",
                PluginCategory::TimeBased,
            )
            .with_audio_inputs(&["in_l", "in_r"])
            .with_audio_outputs(&["out_l", "out_r"]),
        );

        self.register(
            PluginDescriptor::new(
                "http://calf.sourceforge.net/plugins/Filter",
                "Calf Filter",
                PluginCategory::Filter,
            )
            .with_audio_inputs(&["in_l", "in_r"])
            .with_audio_outputs(&["out_l", "out_r"]),
        );

        self.register(
            PluginDescriptor::new(
                "http://calf.sourceforge.net/plugins/VintageDelay",
                "Calf Vintage Delay",
                PluginCategory::TimeBased,
            )
            .with_audio_inputs(&["in_l", "in_r"])
            .with_audio_outputs(&["out_l", "out_r"]),
        );

        self.register(
            PluginDescriptor::new(
                "http://calf.sourceforge.net/plugins/Compressor",
                "Calf Compressor",
                PluginCategory::Dynamics,
            )
            .with_audio_inputs(&["in_l", "in_r"])
            .with_audio_outputs(&["out_l", "out_r"]),
        );

        self.register(
            PluginDescriptor::new(
                "http://guitarix.sourceforge.net/plugins/gx_distortion_#_distortion_",
                "GxDistortion",
                PluginCategory::Distortion,
            )
            .with_audio_inputs(&["in"])
            .with_audio_outputs(&["out"]),
        );

        self.register(
            PluginDescriptor::new(
                "http://gareus.org/oss/lv2/midifilter#cctonote",
                "CC2Note",
                PluginCategory::Midi,
            )
            .with_midi_inputs(&["midiin"])
            .with_midi_outputs(&["midiout"]),
        );
    }

    /// Registers a descriptor. A descriptor with an already-registered URI
    /// replaces the previous one.
    pub fn register(&mut self, descriptor: PluginDescriptor) {
        if let Some(existing) = self.entries.iter_mut().find(|d| d.uri == descriptor.uri) {
            *existing = descriptor;
        } else {
            self.entries.push(descriptor);
        }
    }

    /// Looks a descriptor up by URI.
    pub fn get(&self, uri: &str) -> Option<&PluginDescriptor> {
        self.entries.iter().find(|d| d.uri == uri)
    }

    /// All registered descriptors, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.entries.iter()
    }

    /// Descriptors in the given category.
    pub fn in_category(&self, category: PluginCategory) -> impl Iterator<Item = &PluginDescriptor> {
        self.entries.iter().filter(move |d| d.category == category)
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materializes an effect for `uri`, ports in descriptor order.
    ///
    /// Returns `None` for an unknown URI, or for a malformed descriptor
    /// (duplicate symbols within one port list).
    pub fn create(&self, uri: &str) -> Option<Effect> {
        let descriptor = self.get(uri)?;
        let mut effect = Effect::plugin(&descriptor.uri, &descriptor.name);
        for symbol in &descriptor.audio_inputs {
            effect
                .add_port(Port::new(symbol, PortDirection::Input, SignalKind::Audio))
                .ok()?;
        }
        for symbol in &descriptor.audio_outputs {
            effect
                .add_port(Port::new(symbol, PortDirection::Output, SignalKind::Audio))
                .ok()?;
        }
        for symbol in &descriptor.midi_inputs {
            effect
                .add_port(Port::new(symbol, PortDirection::Input, SignalKind::Midi))
                .ok()?;
        }
        for symbol in &descriptor.midi_outputs {
            effect
                .add_port(Port::new(symbol, PortDirection::Output, SignalKind::Midi))
                .ok()?;
        }
        Some(effect)
    }
}
