//! Save, list, load, and delete worlds through a throwaway save directory.

use std::fs;

use simgame_worldgen::{
    Overlay, World, WorldError, WorldFormatError, WorldParams, WorldStore, encode_world,
    generate, get_overlay,
};

fn coffee() -> World {
    generate(WorldParams {
        name: "Coffee World".into(),
        seed_ascii: "Coffee".into(),
        dimension: 64,
        num_continents: 2,
        percent_land: 50.0,
        region_size: 16,
    })
    .unwrap()
}

#[test]
fn test_e5_save_list_load_resave() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    let world = coffee();

    let path = store.save(&world).unwrap();
    assert_eq!(store.list().unwrap(), vec!["Coffee World".to_string()]);

    let loaded = store.load("Coffee World").unwrap();
    assert_eq!(loaded.tiles(), world.tiles());
    assert_eq!(loaded.regions(), world.regions());
    assert_eq!(loaded.plates(), world.plates());
    assert_eq!(loaded.ocean_level(), world.ocean_level());
    assert_eq!(loaded, world);

    let first = fs::read(&path).unwrap();
    store.save(&loaded).unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second, "re-save changed the file");
    assert_eq!(first, encode_world(&world));
}

#[test]
fn test_e6_corrupt_magic() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    let path = store.save(&coffee()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[0] = b'X';
    fs::write(&path, &bytes).unwrap();

    let err = store.load("Coffee World").unwrap_err();
    assert!(
        matches!(err, WorldError::Format(WorldFormatError::InvalidMagic)),
        "got {err}"
    );
}

#[test]
fn test_unknown_version_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    let path = store.save(&coffee()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[4] = 9;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        store.load("Coffee World"),
        Err(WorldError::Format(WorldFormatError::UnsupportedVersion(9)))
    ));
}

#[test]
fn test_loaded_world_renders_identically() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    let world = coffee();
    store.save(&world).unwrap();
    let loaded = store.load("Coffee World").unwrap();
    for overlay in Overlay::ALL {
        assert_eq!(get_overlay(&loaded, overlay), get_overlay(&world, overlay), "{overlay}");
    }
}

#[test]
fn test_delete_then_list_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    store.save(&coffee()).unwrap();
    store.delete("Coffee World").unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(store.load("Coffee World"), Err(WorldError::NotFound(_))));
}

#[test]
fn test_save_rejects_path_like_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorldStore::new(dir.path());
    let mut world_params = coffee().params().clone();
    world_params.name = "../outside".into();
    let world = generate(world_params).unwrap();
    assert!(matches!(store.save(&world), Err(WorldError::InvalidArgument(_))));
    assert!(!dir.path().join("outside").exists());
}
