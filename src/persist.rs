//! Top-level save and load entry points.
//!
//! Each formatter implements [`Format`], which ties it to a byte medium. The free
//! functions here open a fresh root scope, dispatch to the root [`Saveable`] and
//! hand the bytes to or from a file or buffer.
//!
//! ```rust
//! use save_tree::{Formatter, Result, Saveable, TextFormatter, TreeFormatter};
//!
//! #[derive(Default)]
//! struct Settings {
//!     volume: u8,
//!     fullscreen: bool,
//! }
//!
//! impl Saveable for Settings {
//!     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
//!         f.write_u8(self.volume)?;
//!         f.write_bool(self.fullscreen)
//!     }
//!     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
//!         f.read_into(&mut self.volume)?;
//!         f.read_into(&mut self.fullscreen)
//!     }
//! }
//!
//! let settings = Settings { volume: 80, fullscreen: true };
//!
//! let text = save_tree::to_bytes::<TextFormatter, _>(&settings).unwrap();
//! assert_eq!(text, b"80\ntrue\n");
//!
//! let doc = save_tree::to_bytes::<TreeFormatter, _>(&settings).unwrap();
//! let mut back = Settings::default();
//! save_tree::from_bytes::<TreeFormatter, _>(&doc, &mut back).unwrap();
//! assert_eq!(back.volume, 80);
//! ```

use crate::{
    BinaryFormatter, BinaryOptions, Error, Formatter, Node, Result, Saveable, TextFormatter,
    TreeFormatter, TreeOptions,
};
use bytes::Bytes;
use std::fs;
use std::io;
use std::path::Path;

/// A formatter that can be created over, and flushed to, a byte medium.
pub trait Format: Formatter {
    type Options: Clone + Default;

    /// Short name used in log messages.
    const NAME: &'static str;

    /// Creates a formatter ready for a save.
    fn writer(options: &Self::Options) -> Self;

    /// Creates a formatter ready to load `bytes`.
    ///
    /// Formats that parse up front report a malformed medium here, before any
    /// Saveable runs.
    fn reader(bytes: &[u8], options: &Self::Options) -> Result<Self>;

    /// Consumes a writer and returns the encoded medium.
    fn finish(self) -> Result<Vec<u8>>;

    /// Size of the medium, for log messages.
    fn describe(&self) -> String;
}

impl Format for BinaryFormatter {
    type Options = BinaryOptions;
    const NAME: &'static str = "binary";

    fn writer(options: &BinaryOptions) -> Self {
        BinaryFormatter::new(options)
    }

    fn reader(bytes: &[u8], options: &BinaryOptions) -> Result<Self> {
        Ok(BinaryFormatter::reader(Bytes::copy_from_slice(bytes), options))
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.into_bytes().to_vec())
    }

    fn describe(&self) -> String {
        format!("{} bytes", self.written().max(self.consumed()))
    }
}

impl Format for TextFormatter {
    type Options = ();
    const NAME: &'static str = "text";

    fn writer(_: &()) -> Self {
        TextFormatter::new()
    }

    fn reader(bytes: &[u8], _: &()) -> Result<Self> {
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
            Error::invalid_format(e.utf8_error().valid_up_to(), "byte", "text is not UTF-8")
        })?;
        Ok(TextFormatter::reader(text))
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.into_string().into_bytes())
    }

    fn describe(&self) -> String {
        format!("{} lines", self.lines())
    }
}

impl Format for TreeFormatter {
    type Options = TreeOptions;
    const NAME: &'static str = "tree";

    fn writer(options: &TreeOptions) -> Self {
        TreeFormatter::with_options(options.clone())
    }

    fn reader(bytes: &[u8], options: &TreeOptions) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            Error::invalid_format(e.valid_up_to(), "byte", "document is not UTF-8")
        })?;
        let document = Node::from_text(text)?;
        Ok(TreeFormatter::from_document_with_options(
            document,
            options.clone(),
        ))
    }

    fn finish(self) -> Result<Vec<u8>> {
        let options = self.options().clone();
        let text = self.into_document().to_text(&options)?;
        Ok(text.into_bytes())
    }

    fn describe(&self) -> String {
        format!("{} nodes", self.node_count())
    }
}

/// Saves `root` with the default options of `F` and returns the encoded bytes.
pub fn to_bytes<F: Format, S: Saveable>(root: &S) -> Result<Vec<u8>> {
    to_bytes_with_options::<F, S>(root, &F::Options::default())
}

pub fn to_bytes_with_options<F: Format, S: Saveable>(
    root: &S,
    options: &F::Options,
) -> Result<Vec<u8>> {
    let mut formatter = F::writer(options);
    root.save(&mut formatter)?;
    log::debug!("saved {} ({})", F::NAME, formatter.describe());
    formatter.finish()
}

/// Loads `root` from bytes produced by [`to_bytes`] with the same formatter.
///
/// Trailing data after the root's last field is ignored.
pub fn from_bytes<F: Format, S: Saveable>(bytes: &[u8], root: &mut S) -> Result<()> {
    from_bytes_with_options::<F, S>(bytes, root, &F::Options::default())
}

pub fn from_bytes_with_options<F: Format, S: Saveable>(
    bytes: &[u8],
    root: &mut S,
    options: &F::Options,
) -> Result<()> {
    let mut formatter = F::reader(bytes, options)?;
    root.load(&mut formatter)?;
    log::debug!("loaded {} ({})", F::NAME, formatter.describe());
    Ok(())
}

/// Saves `root` to `path`, creating missing parent directories and replacing
/// any existing file.
pub fn save<F: Format, S: Saveable>(path: impl AsRef<Path>, root: &S) -> Result<()> {
    save_with_options::<F, S>(path, root, &F::Options::default())
}

pub fn save_with_options<F: Format, S: Saveable>(
    path: impl AsRef<Path>,
    root: &S,
    options: &F::Options,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes_with_options::<F, S>(root, options)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, &e))?;
        }
    }
    fs::write(path, &bytes).map_err(|e| Error::io(path, &e))?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Loads `root` from `path`.
///
/// Returns `Ok(false)` without touching `root` when `path` does not exist.
/// Any other failure, including a document that does not match what `root`
/// expects, is an error. `root` may be partly populated after a failed load.
pub fn load<F: Format, S: Saveable>(path: impl AsRef<Path>, root: &mut S) -> Result<bool> {
    load_with_options::<F, S>(path, root, &F::Options::default())
}

pub fn load_with_options<F: Format, S: Saveable>(
    path: impl AsRef<Path>,
    root: &mut S,
    options: &F::Options,
) -> Result<bool> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("could not open file {}", path.display());
            return Ok(false);
        }
        Err(e) => return Err(Error::io(path, &e)),
    };
    from_bytes_with_options::<F, S>(&bytes, root, options)?;
    Ok(true)
}

/// Saves `root` into an in-memory tree document.
pub fn to_document<S: Saveable>(root: &S) -> Result<Node> {
    let mut formatter = TreeFormatter::new();
    root.save(&mut formatter)?;
    Ok(formatter.into_document())
}

/// Loads `root` from an in-memory tree document.
pub fn from_document<S: Saveable>(document: Node, root: &mut S) -> Result<()> {
    let mut formatter = TreeFormatter::from_document(document);
    root.load(&mut formatter)
}
