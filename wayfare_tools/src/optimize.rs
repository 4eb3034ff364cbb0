//! In-place JPEG re-encoding with backup/restore semantics.
//!
//! Each candidate is copied into the backup directory first. The re-encoded
//! file replaces the original only when it is actually smaller; any other
//! outcome leaves the original bytes in place.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use serde::Serialize;

use crate::error::{Result, ToolError};

pub const DEFAULT_QUALITY: u8 = 78;
pub const DEFAULT_MIN_KIB: u64 = 100;

/// A successful size win on one file.
#[derive(Debug, Clone, Serialize)]
pub struct Optimized {
    pub path: PathBuf,
    pub original_kib: f64,
    pub new_kib: f64,
    pub reduction_percent: f64,
}

pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(1, 100)
}

pub fn size_kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub fn reduction_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    original.saturating_sub(new) as f64 / original as f64 * 100.0
}

/// `images/a/banner.jpg` -> `<backup_dir>/banner_backup.jpg`.
pub fn backup_path(backup_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("jpg");
    backup_dir.join(format!("{stem}_backup.{ext}"))
}

pub fn is_jpeg(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("jpg") | Some("jpeg")
    )
}

/// Scans `dir` recursively for JPEGs larger than `min_kib`.
pub fn collect_candidates(dir: &Path, min_kib: u64) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_into(dir, min_kib, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_into(dir: &Path, min_kib: u64, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(io_err(dir))?;
    for entry in entries {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, min_kib, out)?;
        } else if is_jpeg(&path) {
            let len = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            if len > min_kib * 1024 {
                out.push(path);
            }
        }
    }
    Ok(())
}

/// Re-encodes one JPEG in place.
///
/// Returns `Ok(None)` when the re-encoded file was not smaller; the original
/// is restored from its backup in that case and on encode failure.
pub fn optimize_image(input: &Path, backup_dir: &Path, quality: u8) -> Result<Option<Optimized>> {
    if !is_jpeg(input) {
        return Err(ToolError::NotJpeg(input.to_path_buf()));
    }
    let quality = clamp_quality(quality);
    let original_len = fs::metadata(input).map_err(io_err(input))?.len();

    fs::create_dir_all(backup_dir).map_err(io_err(backup_dir))?;
    let backup = backup_path(backup_dir, input);
    fs::copy(input, &backup).map_err(io_err(&backup))?;

    // Encode next to the original, then rename over it so a crash mid-encode
    // never clobbers the input.
    let tmp = tmp_path(input);
    match reencode(input, &tmp, quality) {
        Ok(new_len) if new_len < original_len => {
            fs::rename(&tmp, input).map_err(io_err(input))?;
            Ok(Some(Optimized {
                path: input.to_path_buf(),
                original_kib: size_kib(original_len),
                new_kib: size_kib(new_len),
                reduction_percent: reduction_percent(original_len, new_len),
            }))
        }
        Ok(_) => {
            let _ = fs::remove_file(&tmp);
            fs::rename(&backup, input).map_err(io_err(input))?;
            Ok(None)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            let _ = fs::rename(&backup, input);
            Err(e)
        }
    }
}

fn reencode(input: &Path, tmp: &Path, quality: u8) -> Result<u64> {
    let img = image::open(input).map_err(image_err(input))?;
    let rgb = img.to_rgb8();

    let file = fs::File::create(tmp).map_err(io_err(tmp))?;
    let mut writer = std::io::BufWriter::new(file);
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        .map_err(image_err(input))?;
    writer.flush().map_err(io_err(tmp))?;
    drop(writer);

    Ok(fs::metadata(tmp).map_err(io_err(tmp))?.len())
}

fn tmp_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ToolError + '_ {
    move |source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn image_err(path: &Path) -> impl FnOnce(image::ImageError) -> ToolError + '_ {
    move |source| ToolError::Image {
        path: path.to_path_buf(),
        source,
    }
}
