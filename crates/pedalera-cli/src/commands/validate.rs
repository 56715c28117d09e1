//! `pedalera validate` - check that a bank file loads cleanly.

use anyhow::{Context, anyhow};
use clap::Args;

use pedalera_persistence::{load_bank, paths};
use pedalera_registry::PluginRegistry;

/// Arguments for the `validate` command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Bank file, or a bank name resolved against the user banks directory
    pub bank: String,
}

/// Runs the `validate` command.
///
/// Loading replays every append and connection through the model API, so a
/// successful load means the document satisfies the structural rules against
/// the current plugin registry.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let path = paths::find_bank(&args.bank)
        .ok_or_else(|| anyhow!("no bank file or stored bank named '{}'", args.bank))?;

    let registry = PluginRegistry::new();
    tracing::debug!(path = %path.display(), "validating bank file");
    let bank = load_bank(&path, &registry)
        .with_context(|| format!("bank file '{}' failed validation", path.display()))?;

    let effects: usize = bank.pedalboards().iter().map(|p| p.effects().len()).sum();
    let connections: usize = bank
        .pedalboards()
        .iter()
        .map(|p| p.connections().len())
        .sum();

    println!(
        "ok: '{}' ({} pedalboards, {} effects, {} connections)",
        bank.name(),
        bank.pedalboards().len(),
        effects,
        connections,
    );
    Ok(())
}
