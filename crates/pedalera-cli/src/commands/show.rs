//! `pedalera show` - print the structure of a bank file.

use anyhow::anyhow;
use clap::Args;

use pedalera_persistence::{load_bank, paths};
use pedalera_registry::PluginRegistry;

/// Arguments for the `show` command.
#[derive(Args)]
pub struct ShowArgs {
    /// Bank file, or a bank name resolved against the user banks directory
    pub bank: String,
}

/// Runs the `show` command.
pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let path = paths::find_bank(&args.bank)
        .ok_or_else(|| anyhow!("no bank file or stored bank named '{}'", args.bank))?;

    let registry = PluginRegistry::new();
    let bank = load_bank(&path, &registry)?;

    println!("bank: {}", bank.name());
    for (pb_index, pedalboard) in bank.pedalboards().iter().enumerate() {
        println!(
            "  [{pb_index}] {} ({} effects, {} connections)",
            pedalboard.name(),
            pedalboard.effects().len(),
            pedalboard.connections().len(),
        );
        for (fx_index, effect) in pedalboard.effects().iter().enumerate() {
            let status = if effect.active() { "" } else { " (bypassed)" };
            println!("    [{fx_index}] {}{status}", effect.name());
            println!(
                "        audio {} in / {} out, midi {} in / {} out",
                effect.audio_inputs().len(),
                effect.audio_outputs().len(),
                effect.midi_inputs().len(),
                effect.midi_outputs().len(),
            );
        }
        for connection in pedalboard.connections() {
            println!("    {connection}");
        }
    }

    Ok(())
}
