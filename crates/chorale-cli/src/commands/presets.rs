//! Preset management commands.
//!
//! Provides commands to list, show, save, and delete chorus presets.

use super::common::{ParamArgs, load_preset, print_preset_values};
use chorale_config::{
    Preset, ensure_user_presets_dir, factory_presets, is_factory_preset, list_user_presets,
    preset_file_name, preset_name_from_path, system_presets_dir, user_config_dir,
    user_presets_dir, validate_preset,
};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Start from an existing preset instead of the defaults
        #[arg(long)]
        from: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Write to this file instead of the user presets directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            from,
            params,
            description,
            output,
            force,
        } => save_preset(SaveRequest {
            name: &name,
            from: from.as_deref(),
            params: &params,
            description: description.as_deref(),
            output,
            force,
        }),
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: chorale presets save <name> --rate 0.5 --mix 0.4\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:20} - {desc}");
                    }
                    Err(e) => {
                        tracing::debug!(path = %path.display(), "{e}");
                        println!("  {name:20} - (error loading)");
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Parameters:");
    print_preset_values(&preset);
    println!();

    match validate_preset(&preset) {
        Ok(()) => println!("All values in range."),
        Err(e) => println!("Warning: {e} (values are clamped when applied)"),
    }
    println!();

    println!("TOML:");
    print!("{}", preset.to_toml()?);

    Ok(())
}

struct SaveRequest<'a> {
    name: &'a str,
    from: Option<&'a str>,
    params: &'a ParamArgs,
    description: Option<&'a str>,
    output: Option<PathBuf>,
    force: bool,
}

fn save_preset(request: SaveRequest<'_>) -> anyhow::Result<()> {
    let mut preset = match request.from {
        Some(source) => {
            let mut base = load_preset(source)?;
            base.name = request.name.to_string();
            base
        }
        None => Preset::new(request.name),
    };
    if let Some(desc) = request.description {
        preset.description = Some(desc.to_string());
    }
    request.params.apply_to(&mut preset)?;
    validate_preset(&preset)?;

    let preset_path = match request.output {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(preset_file_name(request.name)),
    };

    if preset_path.exists() && !request.force {
        anyhow::bail!(
            "Preset '{}' already exists at {}. Use --force to overwrite.",
            request.name,
            preset_path.display()
        );
    }

    preset.save(&preset_path)?;

    println!(
        "Saved preset '{}' to {}",
        request.name,
        preset_path.display()
    );
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!(
            "Cannot delete factory preset '{}'. Factory presets are built-in.",
            name
        );
    }

    let preset_path = user_presets_dir().join(preset_file_name(name));

    if !preset_path.exists() {
        anyhow::bail!("User preset '{}' not found.", name);
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{}'.", name);
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{name}'.");

    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());

    Ok(())
}
