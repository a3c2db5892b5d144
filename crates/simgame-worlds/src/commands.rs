//! Subcommand implementations on top of the world library.

use std::path::Path;

use simgame_config::WorldgenConfig;
use simgame_worldgen::names::{generate_world_name, random_seed_word};
use simgame_worldgen::{Overlay, World, WorldParams, WorldStore, generate, render_overlay};

use crate::cli::GenerateArgs;
use crate::error::AppError;
use crate::export::write_png;

/// Merge command-line values over configured defaults, filling name and
/// seed randomly when neither source provides them.
pub fn resolve_params(args: &GenerateArgs, defaults: &WorldgenConfig) -> WorldParams {
    let mut rng = rand::rng();
    let name = args
        .name
        .clone()
        .or_else(|| defaults.name.clone())
        .unwrap_or_else(|| generate_world_name(&mut rng));
    let seed_ascii = args
        .seed
        .clone()
        .or_else(|| defaults.seed.clone())
        .unwrap_or_else(|| random_seed_word(&mut rng).to_string());

    WorldParams {
        name,
        seed_ascii,
        dimension: args.dimension.unwrap_or(defaults.dimension),
        num_continents: args.continents.unwrap_or(defaults.num_continents),
        percent_land: args.land.unwrap_or(defaults.percent_land),
        region_size: args.region_size.unwrap_or(defaults.region_size),
    }
}

/// Generate, save, and optionally export every overlay.
pub fn generate_world(
    store: &WorldStore,
    params: WorldParams,
    overlay_dir: Option<&Path>,
) -> Result<World, AppError> {
    let world = generate(params)?;
    let path = store.save(&world)?;
    println!("Saved {} to {}", world.name(), path.display());

    if let Some(dir) = overlay_dir {
        std::fs::create_dir_all(dir).map_err(|source| AppError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for overlay in Overlay::ALL {
            let out = dir.join(format!("{}-{}.png", world.name(), overlay.name()));
            write_png(&render_overlay(&world, overlay), &out)?;
            tracing::info!(overlay = overlay.name(), path = %out.display(), "Wrote overlay");
        }
    }

    let stats = world.stats();
    println!(
        "{} ({}x{}, seed {:?}): {:.1}% land, {} lake tiles, {} river tiles",
        world.name(),
        world.extent().width,
        world.extent().height,
        world.params().seed_ascii,
        stats.land_fraction * 100.0,
        stats.lake_tiles,
        stats.river_tiles
    );
    Ok(world)
}

pub fn list_worlds(store: &WorldStore) -> Result<Vec<String>, AppError> {
    let names = store.list()?;
    if names.is_empty() {
        println!("No saved worlds in {}", store.worlds_dir().display());
    }
    for name in &names {
        println!("{name}");
    }
    Ok(names)
}

pub fn delete_world(store: &WorldStore, name: &str) -> Result<(), AppError> {
    store.delete(name)?;
    println!("Deleted {name}");
    Ok(())
}

pub fn export_overlay(
    store: &WorldStore,
    name: &str,
    overlay: Overlay,
    out: &Path,
) -> Result<(), AppError> {
    let world = store.load(name)?;
    write_png(&render_overlay(&world, overlay), out)?;
    println!("Wrote {overlay} overlay of {name} to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_args(name: &str) -> GenerateArgs {
        GenerateArgs {
            name: Some(name.into()),
            seed: Some("Coffee".into()),
            dimension: Some(64),
            continents: Some(2),
            land: Some(50.0),
            region_size: Some(16),
            overlays: None,
        }
    }

    #[test]
    fn test_args_override_config() {
        let defaults = WorldgenConfig {
            name: Some("Configured".into()),
            seed: Some("Granite".into()),
            ..Default::default()
        };
        let params = resolve_params(
            &GenerateArgs {
                dimension: Some(128),
                ..Default::default()
            },
            &defaults,
        );
        assert_eq!(params.name, "Configured");
        assert_eq!(params.seed_ascii, "Granite");
        assert_eq!(params.dimension, 128);
        assert_eq!(params.num_continents, defaults.num_continents);
    }

    #[test]
    fn test_missing_name_and_seed_are_filled() {
        let params = resolve_params(&GenerateArgs::default(), &WorldgenConfig::default());
        assert!(!params.name.is_empty());
        assert!(!params.seed_ascii.is_empty());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_generate_list_export_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = WorldStore::new(dir.path());
        let overlays = dir.path().join("png");
        let params = resolve_params(&small_args("Atlas"), &WorldgenConfig::default());

        generate_world(&store, params, Some(&overlays)).unwrap();
        for overlay in Overlay::ALL {
            assert!(overlays.join(format!("Atlas-{}.png", overlay.name())).is_file());
        }
        assert_eq!(list_worlds(&store).unwrap(), vec!["Atlas"]);

        let out = dir.path().join("height.png");
        export_overlay(&store, "Atlas", Overlay::HeightMap, &out).unwrap();
        assert!(out.is_file());

        delete_world(&store, "Atlas").unwrap();
        assert!(list_worlds(&store).unwrap().is_empty());
        assert!(matches!(
            delete_world(&store, "Atlas"),
            Err(AppError::World(simgame_worldgen::WorldError::NotFound(_)))
        ));
    }
}
