//! The `validate`, `inspect` and `export` commands

use crate::args::ValidateArgs;
use crate::config::{Config, ConfigError};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tilesmith_tiled::{load_map_with_tilesets, load_tileset, TiledError, TilesetDocument};
use tilesmith_validate::{validate_map, validate_tileset, ValidateOptions, ValidationReport};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tiled(#[from] TiledError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Outcome of a `validate` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Files that could not be read or parsed
    pub failed_loads: usize,
    pub passed: bool,
}

/// Validate every path, printing one line per issue and a summary line
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<ValidateSummary, CliError> {
    let config = Config::load(args.config.as_deref())?;
    let deny_warnings = args.deny_warnings || config.validate.deny_warnings;
    let mut options = config.validate_options();
    options.check_images |= args.check_images;

    let files = collect_files(&args.paths)?;
    let mut report = ValidationReport::new();
    let mut failed_loads = 0;
    let mut checked_tilesets = HashSet::new();

    for file in &files {
        let result = if has_extension(file, "tmx") {
            check_map(file, &options, &mut checked_tilesets)
        } else {
            check_tileset_file(file, &options, &mut checked_tilesets)
        };
        match result {
            Ok(file_report) => report.merge(file_report),
            Err(e) => {
                error!("{}: {}", file.display(), e);
                writeln!(out, "error: {}: {}", file.display(), e)?;
                failed_loads += 1;
            }
        }
    }

    for issue in report.issues() {
        writeln!(out, "{issue}")?;
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    let passed = failed_loads == 0 && report.into_result(deny_warnings).is_ok();
    writeln!(
        out,
        "{} file(s) checked: {} error(s), {} warning(s){}",
        files.len(),
        errors + failed_loads,
        warnings,
        if passed { "" } else { " - FAILED" }
    )?;
    info!("Validated {} file(s)", files.len());

    Ok(ValidateSummary {
        files: files.len(),
        errors,
        warnings,
        failed_loads,
        passed,
    })
}

/// Expand directories (non-recursively) into their `.tsx` and `.tmx` files
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let entries = std::fs::read_dir(path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            let file = entry.path();
            if file.is_file() && (has_extension(&file, "tsx") || has_extension(&file, "tmx")) {
                found.push(file);
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Key used to skip tilesets already checked through another path
fn tileset_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn check_tileset_file(
    path: &Path,
    options: &ValidateOptions,
    checked: &mut HashSet<PathBuf>,
) -> Result<ValidationReport, CliError> {
    if !checked.insert(tileset_key(path)) {
        return Ok(ValidationReport::new());
    }
    let doc = load_tileset(path)?;
    Ok(validate_tileset(&doc, options))
}

fn check_map(
    path: &Path,
    options: &ValidateOptions,
    checked: &mut HashSet<PathBuf>,
) -> Result<ValidationReport, CliError> {
    let loaded = load_map_with_tilesets(path)?;
    let mut report = validate_map(&path.display().to_string(), &loaded);
    for doc in &loaded.tilesets {
        let first_visit = doc
            .path
            .as_deref()
            .map_or(true, |tsx| checked.insert(tileset_key(tsx)));
        if first_visit {
            report.merge(validate_tileset(doc, options));
        }
    }
    Ok(report)
}

/// Print a summary of a tileset and its Wang sets
pub fn run_inspect(path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let doc = load_tileset(path)?;
    write_inspection(&doc, out)?;
    Ok(())
}

fn write_inspection(doc: &TilesetDocument, out: &mut dyn Write) -> std::io::Result<()> {
    let tileset = &doc.tileset;
    writeln!(out, "{}", doc.label())?;
    writeln!(out, "  name: {}", tileset.name)?;
    writeln!(
        out,
        "  tile size: {}x{}",
        tileset.tile_width, tileset.tile_height
    )?;
    writeln!(
        out,
        "  grid: {} columns x {} rows ({} tiles)",
        tileset.columns,
        tileset.rows(),
        tileset.tile_count
    )?;
    if tileset.spacing > 0 || tileset.margin > 0 {
        writeln!(
            out,
            "  spacing: {}, margin: {}",
            tileset.spacing, tileset.margin
        )?;
    }
    if let Some(image) = &tileset.image {
        writeln!(
            out,
            "  image: {} ({}x{})",
            image.source, image.width, image.height
        )?;
    }
    if !tileset.properties.is_empty() {
        let mut keys: Vec<&String> = tileset.properties.keys().collect();
        keys.sort();
        writeln!(out, "  properties:")?;
        for key in keys {
            let value = &tileset.properties[key];
            writeln!(out, "    {} ({}) = {}", key, value.type_name(), value)?;
        }
    }
    writeln!(out, "  wang sets: {}", doc.wang_sets.len())?;
    for set in &doc.wang_sets {
        writeln!(
            out,
            "    {} ({}): {} colors, {} tiles",
            set.name,
            set.set_type,
            set.colors.len(),
            set.tiles.len()
        )?;
        for (i, color) in set.colors.iter().enumerate() {
            let index = u8::try_from(i + 1).unwrap_or(u8::MAX);
            let tile = color
                .tile
                .map_or_else(|| "none".to_string(), |tile| tile.to_string());
            writeln!(
                out,
                "      {}. {} {} tile {} ({} uniform)",
                index,
                color.display_name(index),
                color.color,
                tile,
                set.uniform_tiles(index).len()
            )?;
        }
    }
    Ok(())
}

/// Write a tileset as pretty JSON to `output`, or to `out` when no file is given
pub fn run_export(path: &Path, output: Option<&Path>, out: &mut dyn Write) -> Result<(), CliError> {
    let doc = load_tileset(path)?;
    let json = serde_json::to_string_pretty(&doc)?;
    match output {
        Some(file) => {
            std::fs::write(file, json).map_err(|source| CliError::Io {
                path: file.to_path_buf(),
                source,
            })?;
            info!("Exported {} to {}", path.display(), file.display());
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCE: &str = r##"<tileset name="fence" tilewidth="32" tileheight="32" tilecount="4" columns="2">
 <image source="fence.png" width="64" height="64"/>
 <wangsets>
  <wangset name="fence" type="edge" tile="-1">
   <wangcolor name="wood" color="#ff0000" tile="-1" probability="1"/>
   <wangtile tileid="0" wangid="1,0,1,0,1,0,1,0"/>
   <wangtile tileid="1" wangid="1,0,0,0,1,0,0,0"/>
  </wangset>
 </wangsets>
</tileset>"##;

    fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.tsx", FENCE);
        write_file(dir.path(), "a.TMX", "");
        write_file(dir.path(), "notes.txt", "");
        let files = collect_files(&[dir.path().to_path_buf(), PathBuf::from("x.tsx")]).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.TMX"),
                dir.path().join("b.tsx"),
                PathBuf::from("x.tsx"),
            ]
        );
    }

    #[test]
    fn test_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "fence.tsx", FENCE);
        let mut out = Vec::new();
        run_inspect(&path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  grid: 2 columns x 2 rows (4 tiles)"));
        assert!(text.contains("    fence (edge): 1 colors, 2 tiles"));
        assert!(text.contains("      1. wood #ff0000 tile none (1 uniform)"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "fence.tsx", FENCE);
        let json_path = dir.path().join("fence.json");
        let mut out = Vec::new();
        run_export(&path, Some(&json_path), &mut out).unwrap();
        assert!(out.is_empty());

        let json = std::fs::read_to_string(json_path).unwrap();
        let doc: TilesetDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.tileset.name, "fence");
        assert_eq!(doc.wang_sets[0].tiles.len(), 2);
    }

    #[test]
    fn test_inspect_properties() {
        let dir = tempfile::tempdir().unwrap();
        let with_props = FENCE.replace(
            " <image",
            r#" <properties>
  <property name="season" value="summer"/>
  <property name="layer" type="int" value="2"/>
 </properties>
 <image"#,
        );
        let path = write_file(dir.path(), "fence.tsx", &with_props);
        let mut out = Vec::new();
        run_inspect(&path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  properties:\n    layer (int) = 2\n    season (string) = \"summer\"\n"));
    }

    #[test]
    fn test_export_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "fence.tsx", FENCE);
        let mut out = Vec::new();
        run_export(&path, None, &mut out).unwrap();

        let json = String::from_utf8(out).unwrap();
        assert!(json.ends_with('\n'));
        let doc: TilesetDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.tileset.name, "fence");
        assert_eq!(doc.tileset.image.map(|image| image.width), Some(64));
        assert_eq!(doc.wang_sets[0].colors[0].name, "wood");
        assert_eq!(doc.wang_sets[0].tiles.len(), 2);
    }

    #[test]
    fn test_validate_reports_issues() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "fence.tsx", FENCE);
        write_file(
            dir.path(),
            "broken.tsx",
            &FENCE.replace(r#"tileid="1""#, r#"tileid="9""#),
        );
        let config = write_file(dir.path(), "tilesmith.toml", "");
        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            config: Some(config),
            ..Default::default()
        };
        let mut out = Vec::new();
        let summary = run_validate(&args, &mut out).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.errors, 1);
        assert!(!summary.passed);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: "));
        assert!(text.contains("broken.tsx: wangset 'fence' tile 9"));
        assert!(text.ends_with("2 file(s) checked: 1 error(s), 0 warning(s) - FAILED\n"));
    }

    #[test]
    fn test_validate_deny_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let unnamed = FENCE.replace(r#"name="wood""#, r#"name="""#);
        let path = write_file(dir.path(), "fence.tsx", &unnamed);
        let config = write_file(dir.path(), "tilesmith.toml", "");
        let mut args = ValidateArgs {
            paths: vec![path],
            config: Some(config.clone()),
            ..Default::default()
        };
        let summary = run_validate(&args, &mut Vec::new()).unwrap();
        assert_eq!(summary.warnings, 1);
        assert!(summary.passed);

        args.deny_warnings = true;
        assert!(!run_validate(&args, &mut Vec::new()).unwrap().passed);

        // Same result when the config denies warnings
        std::fs::write(&config, "[validate]\ndeny_warnings = true\n").unwrap();
        args.deny_warnings = false;
        assert!(!run_validate(&args, &mut Vec::new()).unwrap().passed);
    }

    #[test]
    fn test_validate_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(dir.path(), "tilesmith.toml", "");
        let args = ValidateArgs {
            paths: vec![dir.path().join("missing.tsx")],
            config: Some(config),
            ..Default::default()
        };
        let mut out = Vec::new();
        let summary = run_validate(&args, &mut out).unwrap();
        assert_eq!(summary.failed_loads, 1);
        assert!(!summary.passed);
        assert!(String::from_utf8(out).unwrap().starts_with("error: "));
    }
}
