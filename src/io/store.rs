// src/io/store.rs
/*!
Persisting flow fields.

A stored field carries its geometry (`Nx, Ny, Nz, Nd, Lx, Ly, a, b`), its state
tag and the complete backing buffer, so `save` followed by `load` reproduces an
equal field in either state.

Formats, picked from the file extension:
- `.json`: `serde_json`, human readable, lossless float round-trip. JSON has no
  encoding for NaN or infinities, so a field holding them is refused instead of
  being written lossy; save such fields in the binary format.
- anything else: `bincode`, compact binary, every `f64` bit pattern preserved.

A path without an extension gets `.ff` appended, by both `save` and `load`.

`save` writes to a sibling `<name>.tmp` and renames it over the destination, so
a failed write never leaves a truncated file where a good one was.
*/

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FieldError, FieldResult};
use crate::field::flowfield::FlowField;
use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;
use crate::math::scalar::Real;

/// Version tag written into every stored field.
pub const STORE_VERSION: u32 = 1;

/// Extension appended to extension-less paths.
pub const DEFAULT_EXTENSION: &str = "ff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Json,
    Binary,
}

impl FieldFormat {
    /// `.json` (case-insensitive) is JSON, everything else binary.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FieldFormat::Json,
            _ => FieldFormat::Binary,
        }
    }
}

/// The path `save` / `load` actually use for `path`.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredField<'a> {
    version: u32,
    geometry: FieldGeometry,
    state: FieldState,
    data: Cow<'a, [Real]>,
}

fn io_error(path: &Path, source: io::Error) -> FieldError {
    FieldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `dir/u.ff` -> `dir/u.ff.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_stored(path: &Path, format: FieldFormat, stored: &StoredField<'_>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        FieldFormat::Json => serde_json::to_writer(&mut writer, stored)?,
        FieldFormat::Binary => {
            bincode::serialize_into(&mut writer, stored).map_err(io::Error::other)?
        }
    }
    writer.flush()
}

impl FlowField {
    /// Write the field to `path` (see module docs for format and extension rules).
    ///
    /// Returns the path written. Fails with [`FieldError::Io`] when writing fails or
    /// when a non-finite field is saved as JSON; never mutates `self`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FieldResult<PathBuf> {
        let path = resolve_path(path.as_ref());
        let format = FieldFormat::for_path(&path);
        let stored = StoredField {
            version: STORE_VERSION,
            geometry: *self.geometry(),
            state: self.state(),
            data: Cow::Borrowed(self.buffer().raw()),
        };

        if format == FieldFormat::Json && !self.buffer().raw().iter().all(|x| x.is_finite()) {
            return Err(io_error(
                &path,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    "JSON cannot represent NaN or infinite values; use the binary format",
                ),
            ));
        }

        let tmp = temp_path(&path);
        if let Err(e) = write_stored(&tmp, format, &stored) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(&path, e));
        }
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            io_error(&path, e)
        })?;

        info!(
            path = %path.display(),
            ?format,
            state = %self.state(),
            geometry = %self.geometry(),
            "saved field"
        );
        Ok(path)
    }

    /// Read a field written by [`FlowField::save`].
    ///
    /// Fails with [`FieldError::Load`] when the file is missing or unparsable, has an
    /// unknown version, invalid geometry, or a buffer that disagrees with its extents.
    pub fn load<P: AsRef<Path>>(path: P) -> FieldResult<FlowField> {
        let path = resolve_path(path.as_ref());
        let format = FieldFormat::for_path(&path);

        let file = File::open(&path).map_err(|e| FieldError::load(&path, e))?;
        let reader = BufReader::new(file);
        let stored: StoredField<'static> = match format {
            FieldFormat::Json => {
                serde_json::from_reader(reader).map_err(|e| FieldError::load(&path, e))?
            }
            FieldFormat::Binary => {
                bincode::deserialize_from(reader).map_err(|e| FieldError::load(&path, e))?
            }
        };

        if stored.version != STORE_VERSION {
            return Err(FieldError::load(
                &path,
                format!("unsupported store version {}", stored.version),
            ));
        }
        let field = FlowField::from_parts(stored.geometry, stored.state, stored.data.into_owned())
            .map_err(|reason| FieldError::load(&path, reason))?;

        info!(
            path = %path.display(),
            ?format,
            state = %field.state(),
            geometry = %field.geometry(),
            "loaded field"
        );
        Ok(field)
    }
}
