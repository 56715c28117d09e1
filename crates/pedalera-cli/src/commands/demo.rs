//! `pedalera demo` - write an example bank file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use pedalera_model::{Bank, Effect, Pedalboard};
use pedalera_persistence::save_bank;
use pedalera_registry::PluginRegistry;

const REVERB: &str = "http://calf.sourceforge.net/plugins/Reverb";
const FILTER: &str = "http://calf.sourceforge.net/plugins/Filter";

/// Arguments for the `demo` command.
#[derive(Args)]
pub struct DemoArgs {
    /// Output path for the demo bank
    #[arg(default_value = "demo_bank.json")]
    pub output: PathBuf,
}

/// Runs the `demo` command: writes a stereo capture -> reverb -> filter ->
/// reverb chain with a monitor line back to playback.
pub fn run(args: DemoArgs) -> anyhow::Result<()> {
    let registry = PluginRegistry::new();
    let bank = demo_bank(&registry)?;

    save_bank(&bank, &args.output)
        .with_context(|| format!("could not write '{}'", args.output.display()))?;
    println!("wrote demo bank to '{}'", args.output.display());
    Ok(())
}

fn demo_bank(registry: &PluginRegistry) -> anyhow::Result<Bank> {
    let system = Effect::system(
        "system",
        &["capture_1", "capture_2"],
        &["playback_1", "playback_2"],
    )?;

    let mut pedalboard = Pedalboard::new("Rocksmith");
    let create = |uri: &str| {
        registry
            .create(uri)
            .with_context(|| format!("registry is missing '{uri}'"))
    };
    let reverb = pedalboard.append(create(REVERB)?)?;
    let filter = pedalboard.append(create(FILTER)?)?;
    let reverb2 = pedalboard.append(create(REVERB)?)?;

    let out = |id, symbol: &str| {
        pedalboard
            .effect_by_id(id)
            .context("effect vanished")?
            .output_ref(symbol)
            .map_err(anyhow::Error::from)
    };
    let inp = |id, symbol: &str| {
        pedalboard
            .effect_by_id(id)
            .context("effect vanished")?
            .input_ref(symbol)
            .map_err(anyhow::Error::from)
    };

    let wiring = [
        (system.output_ref("capture_1")?, inp(reverb, "in_l")?),
        (out(reverb, "out_l")?, inp(filter, "in_l")?),
        (out(reverb, "out_r")?, inp(filter, "in_l")?),
        (out(filter, "out_l")?, inp(reverb2, "in_l")?),
        (out(reverb, "out_l")?, inp(reverb2, "in_l")?),
        (out(reverb, "out_l")?, system.input_ref("playback_1")?),
    ];
    for (output, input) in wiring {
        pedalboard.connect(output, input)?;
    }

    let mut bank = Bank::new("Bank 1");
    bank.append(pedalboard);
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedalera_persistence::load_bank;

    #[test]
    fn demo_bank_has_the_advertised_shape() {
        let registry = PluginRegistry::new();
        let bank = demo_bank(&registry).unwrap();

        let pedalboard = bank.pedalboard(0).unwrap();
        assert_eq!(pedalboard.effects().len(), 3);
        assert_eq!(pedalboard.connections().len(), 6);
    }

    #[test]
    fn demo_command_writes_a_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("demo.json");

        run(DemoArgs {
            output: output.clone(),
        })
        .unwrap();

        let registry = PluginRegistry::new();
        let bank = load_bank(&output, &registry).unwrap();
        assert_eq!(bank.name(), "Bank 1");
    }
}
