use std::path::PathBuf;
use tilesmith_tiled::{load_tileset, TilesetDocument};
use tilesmith_wang::{WangPosition, WangSetType};

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets/tiles")
        .join(name)
}

fn load(name: &str) -> TilesetDocument {
    load_tileset(asset(name)).unwrap()
}

#[test]
fn test_summer() {
    let doc = load("summer.tsx");
    assert_eq!(doc.tileset.tile_count, 256);
    assert_eq!(doc.tileset.columns, 16);
    assert_eq!(doc.tileset.rows(), 16);
    assert_eq!(doc.base_dir(), asset("summer.tsx").parent());

    assert_eq!(doc.wang_sets.len(), 1);
    let dirt = &doc.wang_sets[0];
    assert_eq!(dirt.name, "dirt");
    assert_eq!(dirt.set_type, WangSetType::Corner);
    assert_eq!(dirt.colors.len(), 3);
    assert_eq!(dirt.tiles.len(), 35);
    assert_eq!(dirt.color_index("grass"), Some(2));
    assert_eq!(dirt.color(1).and_then(|c| c.tile), Some(52));

    // Corner sets never use edge slots
    for tile in &dirt.tiles {
        assert!(tile.wang_id.uses_only(WangSetType::Corner));
        assert_eq!(tile.wang_id.color_at(WangPosition::Top), 0);
    }
}

#[test]
fn test_wooden_fence() {
    let doc = load("wooden_fence.tsx");
    assert_eq!(doc.tileset.tile_count, 96);
    assert_eq!(doc.tileset.rows(), 8);

    let fence = doc.wang_set("fence").unwrap();
    assert_eq!(fence.set_type, WangSetType::Edge);
    assert_eq!(fence.colors.len(), 1);
    assert_eq!(fence.colors[0].tile, None);
    assert_eq!(fence.tiles.len(), 15);
    assert!(fence.unused_colors().is_empty());
}

#[test]
fn test_flooring_and_deeproot() {
    let flooring = load("Flooring_summer.tsx");
    let path = flooring.wang_set("path").unwrap();
    assert_eq!(path.colors.len(), 4);
    assert!(path.colors.iter().any(|c| c.name.is_empty()));

    let deeproot = load("deeproot.tsx");
    let tile = deeproot.wang_set("tile").unwrap();
    assert_eq!(tile.colors.len(), 2);
    assert!(tile.colors.iter().any(|c| c.tile.is_none()));
}

#[test]
fn test_every_wang_id_round_trips() {
    for name in ["summer.tsx", "wooden_fence.tsx", "Flooring_summer.tsx", "deeproot.tsx"] {
        let doc = load(name);
        for set in &doc.wang_sets {
            for tile in &set.tiles {
                let text = tile.wang_id.to_string();
                assert_eq!(text.parse::<tilesmith_wang::WangId>().unwrap(), tile.wang_id);
            }
        }
    }
}

#[test]
fn test_json_export() {
    let doc = load("wooden_fence.tsx");
    let json = serde_json::to_string(&doc).unwrap();
    let back: TilesetDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
