//! Writing SFZ files.

use crate::document::SfzDocument;
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default output file for an instrument: `<base_name>.sfz`.
pub fn default_output_path(base_name: &str) -> PathBuf {
    PathBuf::from(format!("{}.sfz", base_name))
}

/// Write `document` to `path`.
///
/// Unless `allow_overwrite` is set, an existing file is left untouched and
/// [`Error::OutputExists`] is returned.
pub fn write_document(path: &Path, document: &SfzDocument, allow_overwrite: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if allow_overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let file = options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    write_or_remove(file, path, document.render().as_bytes())?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Write `contents`, removing `path` again if that fails part way.
fn write_or_remove<W: Write>(mut writer: W, path: &Path, contents: &[u8]) -> Result<()> {
    let written = writer.write_all(contents).and_then(|()| writer.flush());
    drop(writer);
    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path) {
            log::warn!("Could not remove partial {}: {}", path.display(), remove_err);
        }
        return Err(Error::Io(e));
    }
    Ok(())
}
