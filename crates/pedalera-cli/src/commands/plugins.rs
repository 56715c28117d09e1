//! `pedalera plugins` - list the plugin registry.

use anyhow::bail;
use clap::Args;

use pedalera_registry::{PluginCategory, PluginDescriptor, PluginRegistry};

/// Arguments for the `plugins` command.
#[derive(Args)]
pub struct PluginsArgs {
    /// Only list plugins in this category (dynamics, distortion, modulation,
    /// time-based, filter, midi, utility)
    #[arg(long)]
    pub category: Option<String>,
}

/// Runs the `plugins` command.
pub fn run(args: PluginsArgs) -> anyhow::Result<()> {
    let registry = PluginRegistry::new();

    let plugins: Vec<&PluginDescriptor> = match &args.category {
        Some(name) => {
            let category = parse_category(name)?;
            registry.in_category(category).collect()
        }
        None => registry.all().collect(),
    };

    println!("{} plugins:", plugins.len());
    for plugin in plugins {
        println!("  {} [{}]", plugin.name, plugin.category.name());
        println!("    uri: {}", plugin.uri);
        println!(
            "    audio: {} in / {} out, midi: {} in / {} out",
            plugin.audio_inputs.len(),
            plugin.audio_outputs.len(),
            plugin.midi_inputs.len(),
            plugin.midi_outputs.len(),
        );
    }

    Ok(())
}

fn parse_category(name: &str) -> anyhow::Result<PluginCategory> {
    let category = match name.to_lowercase().as_str() {
        "dynamics" => PluginCategory::Dynamics,
        "distortion" => PluginCategory::Distortion,
        "modulation" => PluginCategory::Modulation,
        "time-based" | "timebased" => PluginCategory::TimeBased,
        "filter" => PluginCategory::Filter,
        "midi" => PluginCategory::Midi,
        "utility" => PluginCategory::Utility,
        other => bail!("unknown category '{other}'"),
    };
    Ok(category)
}
