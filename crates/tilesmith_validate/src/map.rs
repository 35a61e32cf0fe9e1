//! Map checks: tileset ordering and GID ranges

use crate::{IssueKind, ValidationReport};
use std::collections::BTreeSet;
use tilesmith_core::strip_flip_flags;
use tilesmith_tiled::LoadedMap;
use tracing::debug;

/// Check a map against the tilesets it references.
///
/// `label` names the map in issue locations, usually its file path.
pub fn validate_map(label: &str, loaded: &LoadedMap) -> ValidationReport {
    let map = &loaded.map;
    let mut report = ValidationReport::new();

    let mut previous = 0;
    for (index, entry) in map.tilesets.iter().enumerate() {
        if entry.first_gid == 0 {
            report.add(
                IssueKind::InvalidFirstGid,
                label,
                format!("tileset #{index} has firstgid 0"),
            );
        } else if entry.first_gid <= previous {
            report.add(
                IssueKind::InvalidFirstGid,
                label,
                format!(
                    "tileset #{index} firstgid {} is not above the previous {}",
                    entry.first_gid, previous
                ),
            );
        }
        previous = previous.max(entry.first_gid);
    }

    for doc in &loaded.tilesets {
        let tileset = &doc.tileset;
        if (tileset.tile_width, tileset.tile_height) != (map.tile_width, map.tile_height) {
            report.add(
                IssueKind::TileSizeMismatch,
                label,
                format!(
                    "tileset {} has {}x{} tiles but the map uses {}x{}",
                    doc.label(),
                    tileset.tile_width,
                    tileset.tile_height,
                    map.tile_width,
                    map.tile_height
                ),
            );
        }
    }

    for layer in &map.layers {
        let location = format!("{label}: layer '{}'", layer.name);
        // Each bad GID is reported once per layer
        let gids: BTreeSet<u32> = layer
            .gids
            .iter()
            .map(|gid| strip_flip_flags(*gid))
            .filter(|gid| *gid != 0)
            .collect();
        for gid in gids {
            let Some((index, local)) = map.resolve_gid(gid) else {
                report.add(
                    IssueKind::UnresolvedGid,
                    &location,
                    format!("gid {gid} does not belong to any tileset"),
                );
                continue;
            };
            if let Some(doc) = loaded.tilesets.get(index) {
                if !doc.tileset.contains_tile(local) {
                    report.add(
                        IssueKind::GidOutOfRange,
                        &location,
                        format!(
                            "gid {gid} is tile {local} of {}, which has {} tiles",
                            doc.label(),
                            doc.tileset.tile_count
                        ),
                    );
                }
            }
        }
    }

    debug!(
        "Validated map {}: {} errors, {} warnings",
        label,
        report.errors().count(),
        report.warnings().count()
    );
    report
}
