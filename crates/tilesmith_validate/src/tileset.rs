//! Tileset and Wang set checks

use crate::{IssueKind, ValidateOptions, ValidationReport};
use std::collections::HashSet;
use std::path::Path;
use tilesmith_core::Tileset;
use tilesmith_tiled::TilesetDocument;
use tilesmith_wang::{WangPosition, WangSet};
use tracing::debug;

/// Check a tileset and all of its Wang sets
pub fn validate_tileset(doc: &TilesetDocument, options: &ValidateOptions) -> ValidationReport {
    let label = doc.label();
    let mut report = ValidationReport::new();

    check_grid(&label, &doc.tileset, &mut report);
    if options.check_images {
        check_image_file(&label, doc, options, &mut report);
    }

    let mut names = HashSet::new();
    for set in &doc.wang_sets {
        if !names.insert(set.name.as_str()) {
            report.add(
                IssueKind::DuplicateWangSet,
                &label,
                format!("wang set name '{}' is used more than once", set.name),
            );
        }
        check_wang_set(&label, &doc.tileset, set, &mut report);
    }

    debug!(
        "Validated tileset {}: {} errors, {} warnings",
        label,
        report.errors().count(),
        report.warnings().count()
    );
    report
}

fn check_grid(label: &str, tileset: &Tileset, report: &mut ValidationReport) {
    if tileset.tile_width == 0 || tileset.tile_height == 0 {
        report.add(
            IssueKind::InvalidTileSize,
            label,
            format!(
                "tile size {}x{} must be non-zero",
                tileset.tile_width, tileset.tile_height
            ),
        );
        return;
    }

    let Some(image) = &tileset.image else {
        return;
    };
    if tileset.columns == 0 {
        report.add(
            IssueKind::MissingColumns,
            label,
            format!("image '{}' is set but columns is 0", image.source),
        );
        return;
    }
    // Size not written to the file
    if image.width == 0 && image.height == 0 {
        return;
    }

    let fit_columns = tileset.grid_columns_for(image.width);
    let fit_rows = tileset.grid_rows_for(image.height);
    if tileset.columns > fit_columns {
        report.add(
            IssueKind::ImageTooSmall,
            label,
            format!(
                "{} columns do not fit in the {}px wide image (room for {})",
                tileset.columns, image.width, fit_columns
            ),
        );
    }
    let capacity = u64::from(tileset.columns.min(fit_columns)) * u64::from(fit_rows);
    if u64::from(tileset.tile_count) > capacity {
        report.add(
            IssueKind::TileCountExceedsGrid,
            label,
            format!(
                "tilecount {} exceeds the {} tiles the {}x{} image holds",
                tileset.tile_count, capacity, image.width, image.height
            ),
        );
    }
}

fn check_image_file(
    label: &str,
    doc: &TilesetDocument,
    options: &ValidateOptions,
    report: &mut ValidationReport,
) {
    let Some(image) = &doc.tileset.image else {
        return;
    };
    let base_dir = doc.base_dir().unwrap_or(Path::new(""));
    let candidates = doc
        .tileset
        .image_candidates(base_dir, &options.search_paths);

    let Some(path) = candidates.iter().find(|path| path.is_file()) else {
        let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        report.add(
            IssueKind::ImageMissing,
            label,
            format!(
                "image '{}' not found (looked at {})",
                image.source,
                searched.join(", ")
            ),
        );
        return;
    };

    match image::image_dimensions(path) {
        Ok((width, height)) => {
            debug!("Image {} is {}x{}", path.display(), width, height);
            let declared_unknown = image.width == 0 && image.height == 0;
            if !declared_unknown && (width, height) != (image.width, image.height) {
                report.add(
                    IssueKind::ImageSizeMismatch,
                    label,
                    format!(
                        "image {} is {}x{} but the tileset declares {}x{}",
                        path.display(),
                        width,
                        height,
                        image.width,
                        image.height
                    ),
                );
            }
        }
        Err(e) => report.add(
            IssueKind::ImageUnreadable,
            label,
            format!("cannot read image {}: {}", path.display(), e),
        ),
    }
}

fn check_wang_set(label: &str, tileset: &Tileset, set: &WangSet, report: &mut ValidationReport) {
    let location = format!("{label}: wangset '{}'", set.name);
    let color_count = set.colors.len();

    if let Some(tile) = set.tile {
        if !tileset.contains_tile(tile) {
            report.add(
                IssueKind::SetTileOutOfRange,
                &location,
                format!(
                    "representative tile {} is outside the tileset ({} tiles)",
                    tile, tileset.tile_count
                ),
            );
        }
    }

    for (i, color) in set.colors.iter().enumerate() {
        let index = u8::try_from(i + 1).unwrap_or(u8::MAX);
        let name = color.display_name(index);
        if color.name.is_empty() {
            report.add(
                IssueKind::UnnamedColor,
                &location,
                format!("color {name} has no name"),
            );
        }
        if let Some(tile) = color.tile {
            if !tileset.contains_tile(tile) {
                report.add(
                    IssueKind::ColorTileOutOfRange,
                    &location,
                    format!(
                        "color {name} uses tile {} outside the tileset ({} tiles)",
                        tile, tileset.tile_count
                    ),
                );
            }
        }
        if !color.probability.is_finite() || color.probability < 0.0 {
            report.add(
                IssueKind::InvalidProbability,
                &location,
                format!("color {name} has invalid probability {}", color.probability),
            );
        }
    }

    let mut seen = HashSet::new();
    for tile in &set.tiles {
        let tile_location = format!("{location} tile {}", tile.tile_id);
        if !seen.insert(tile.tile_id) {
            report.add(
                IssueKind::DuplicateWangTile,
                &tile_location,
                "tile is listed more than once",
            );
        }
        if !tileset.contains_tile(tile.tile_id) {
            report.add(
                IssueKind::TileOutOfRange,
                &tile_location,
                format!(
                    "tile id is outside the tileset ({} tiles)",
                    tileset.tile_count
                ),
            );
        }

        let unknown: Vec<String> = tile
            .wang_id
            .colors()
            .into_iter()
            .filter(|color| usize::from(*color) > color_count)
            .map(|color| color.to_string())
            .collect();
        if !unknown.is_empty() {
            report.add(
                IssueKind::UnknownColor,
                &tile_location,
                format!(
                    "wangid {} uses color {} but only {} colors are declared",
                    tile.wang_id,
                    unknown.join(", "),
                    color_count
                ),
            );
        }

        let inactive = tile.wang_id.inactive_positions(set.set_type);
        if !inactive.is_empty() {
            let names: Vec<&str> = inactive.iter().map(|pos| pos.name()).collect();
            report.add(
                IssueKind::InactivePosition,
                &tile_location,
                format!(
                    "{} set has colors on unused positions: {}",
                    set.set_type,
                    names.join(", ")
                ),
            );
        }

        let active: &[WangPosition] = set.set_type.active_positions();
        if active.iter().all(|pos| tile.wang_id.color_at(*pos) == 0) {
            report.add(
                IssueKind::EmptyWangId,
                &tile_location,
                "no color on any active position",
            );
        }
    }

    for color in set.unused_colors() {
        let name = set
            .color(color)
            .map(|c| c.display_name(color))
            .unwrap_or_else(|| format!("#{color}"));
        report.add(
            IssueKind::UnusedColor,
            &location,
            format!("color {name} is not used by any tile"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilesmith_tiled::parse_tileset;

    fn check(xml: &str) -> ValidationReport {
        validate_tileset(&parse_tileset(xml).unwrap(), &ValidateOptions::default())
    }

    fn corner_set(body: &str) -> String {
        format!(
            r##"<tileset name="t" tilewidth="32" tileheight="32" tilecount="16" columns="4">
 <image source="t.png" width="128" height="128"/>
 <wangsets>
  <wangset name="ground" type="corner" tile="-1">
   <wangcolor name="dirt" color="#ff0000" tile="0" probability="1"/>
   <wangcolor name="grass" color="#00ff00" tile="1" probability="1"/>
   {body}
  </wangset>
 </wangsets>
</tileset>"##
        )
    }

    #[test]
    fn test_clean_tileset() {
        let report = check(&corner_set(
            r#"<wangtile tileid="0" wangid="0,1,0,1,0,1,0,1"/>
               <wangtile tileid="1" wangid="0,2,0,2,0,2,0,2"/>
               <wangtile tileid="2" wangid="0,1,0,2,0,1,0,2"/>"#,
        ));
        assert!(report.is_clean(), "{:?}", report.issues());
    }

    #[test]
    fn test_tile_out_of_range() {
        let report = check(&corner_set(
            r#"<wangtile tileid="0" wangid="0,1,0,1,0,2,0,2"/>
               <wangtile tileid="16" wangid="0,1,0,1,0,2,0,2"/>"#,
        ));
        let issues: Vec<_> = report.of_kind(IssueKind::TileOutOfRange).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "t: wangset 'ground' tile 16");
        assert!(!report.is_ok());
    }

    #[test]
    fn test_unknown_color() {
        let report = check(&corner_set(
            r#"<wangtile tileid="0" wangid="0,1,0,2,0,3,0,1"/>"#,
        ));
        let issue = report.of_kind(IssueKind::UnknownColor).next().unwrap();
        assert!(issue.is_error());
        assert!(issue.message.contains("color 3"));
        assert!(issue.message.contains("only 2 colors"));
    }

    #[test]
    fn test_wang_tile_warnings() {
        let report = check(&corner_set(
            r#"<wangtile tileid="0" wangid="1,1,0,1,0,1,0,1"/>
               <wangtile tileid="0" wangid="0,0,0,0,0,0,0,0"/>"#,
        ));
        assert!(report.has(IssueKind::InactivePosition));
        assert!(report.has(IssueKind::EmptyWangId));
        assert!(report.has(IssueKind::DuplicateWangTile));
        // grass is never referenced
        let unused: Vec<_> = report.of_kind(IssueKind::UnusedColor).collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].message.contains("grass"));
        assert!(!report.is_ok());
    }

    #[test]
    fn test_color_checks() {
        let xml = r##"<tileset name="t" tilewidth="32" tileheight="32" tilecount="4" columns="2">
 <wangsets>
  <wangset name="w" type="edge" tile="9">
   <wangcolor name="" color="#ff0000" tile="8" probability="-1"/>
   <wangtile tileid="1" wangid="1,0,1,0,1,0,1,0"/>
  </wangset>
  <wangset name="w" type="edge" tile="-1"/>
 </wangsets>
</tileset>"##;
        let report = check(xml);
        assert!(report.has(IssueKind::SetTileOutOfRange));
        assert!(report.has(IssueKind::ColorTileOutOfRange));
        assert!(report.has(IssueKind::InvalidProbability));
        assert!(report.has(IssueKind::UnnamedColor));
        assert!(report.has(IssueKind::DuplicateWangSet));
        let unnamed = report.of_kind(IssueKind::UnnamedColor).next().unwrap();
        assert_eq!(unnamed.message, "color #1 has no name");
    }

    #[test]
    fn test_grid_checks() {
        let narrow = check(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="16" columns="4">
                <image source="t.png" width="96" height="128"/>
            </tileset>"#,
        );
        assert!(narrow.has(IssueKind::ImageTooSmall));
        assert!(narrow.has(IssueKind::TileCountExceedsGrid));

        let too_many = check(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="20" columns="4">
                <image source="t.png" width="128" height="128"/>
            </tileset>"#,
        );
        assert!(!too_many.has(IssueKind::ImageTooSmall));
        assert!(too_many.has(IssueKind::TileCountExceedsGrid));

        let no_columns = check(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="16" columns="0">
                <image source="t.png" width="128" height="128"/>
            </tileset>"#,
        );
        assert!(no_columns.has(IssueKind::MissingColumns));

        let huge = check(
            r#"<tileset name="t" tilewidth="1" tileheight="1" tilecount="1" columns="70000">
                <image source="t.png" width="70000" height="70000"/>
            </tileset>"#,
        );
        assert!(huge.is_clean(), "{:?}", huge.issues());

        let spaced_out = check(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="4" columns="2" spacing="4294967290">
                <image source="t.png" width="64" height="64"/>
            </tileset>"#,
        );
        assert!(spaced_out.has(IssueKind::ImageTooSmall));

        let zero = check(r#"<tileset name="t" tilewidth="0" tileheight="32"/>"#);
        assert!(zero.has(IssueKind::InvalidTileSize));

        let spaced = check(
            r#"<tileset name="t" tilewidth="16" tileheight="16" tilecount="4" columns="2" spacing="2" margin="1">
                <image source="t.png" width="36" height="36"/>
            </tileset>"#,
        );
        assert!(spaced.is_clean(), "{:?}", spaced.issues());
    }

    #[test]
    fn test_image_file_checks() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(128, 64)
            .save(dir.path().join("t.png"))
            .unwrap();

        let mut doc = parse_tileset(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="16" columns="4">
                <image source="t.png" width="128" height="128"/>
            </tileset>"#,
        )
        .unwrap();
        doc.path = Some(dir.path().join("t.tsx"));
        let options = ValidateOptions {
            check_images: true,
            ..Default::default()
        };

        let report = validate_tileset(&doc, &options);
        let mismatch = report.of_kind(IssueKind::ImageSizeMismatch).next().unwrap();
        assert!(mismatch.message.contains("128x64"));

        // Not checked unless asked
        assert!(validate_tileset(&doc, &ValidateOptions::default()).is_clean());

        doc.path = Some(dir.path().join("sub/t.tsx"));
        let report = validate_tileset(&doc, &options);
        assert!(report.has(IssueKind::ImageMissing));
        assert!(report.is_ok());

        let search = ValidateOptions {
            check_images: true,
            search_paths: vec![dir.path().to_path_buf()],
        };
        let report = validate_tileset(&doc, &search);
        assert!(!report.has(IssueKind::ImageMissing));
        assert!(report.has(IssueKind::ImageSizeMismatch));
    }

    #[test]
    fn test_unreadable_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.png"), b"not a png").unwrap();
        let mut doc = parse_tileset(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="1" columns="1">
                <image source="t.png" width="32" height="32"/>
            </tileset>"#,
        )
        .unwrap();
        doc.path = Some(dir.path().join("t.tsx"));
        let options = ValidateOptions {
            check_images: true,
            ..Default::default()
        };
        assert!(validate_tileset(&doc, &options).has(IssueKind::ImageUnreadable));
    }
}
