//! Configuration options for the formatters.
//!
//! - [`TreeOptions`]: layout of the tree document and strictness of nested loads
//! - [`Delimiter`]: separator for inline arrays in the tree document
//! - [`BinaryOptions`] / [`Endian`]: byte order of the binary formatter
//!
//! ## Examples
//!
//! ```rust
//! use save_tree::{BinaryOptions, Delimiter, Endian, TreeOptions};
//!
//! let tree = TreeOptions::new().with_indent(4).with_delimiter(Delimiter::Pipe);
//! assert_eq!(tree.indent, 4);
//!
//! let binary = BinaryOptions::new().with_endian(Endian::Big);
//! assert_eq!(binary.endian, Endian::Big);
//! ```

/// Delimiter choice for inline arrays in the tree document.
///
/// # Examples
///
/// ```rust
/// use save_tree::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_str(), ",");
/// assert_eq!(Delimiter::Tab.as_str(), "\t");
/// assert_eq!(Delimiter::Pipe.as_str(), "|");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Marker written inside an array header (`[3|]`); comma is implicit.
    pub(crate) const fn header_marker(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    pub(crate) const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }
}

/// Configuration for the tree formatter and its document text.
///
/// # Examples
///
/// ```rust
/// use save_tree::TreeOptions;
///
/// let options = TreeOptions::new();
/// assert_eq!(options.indent, 2);
/// assert!(!options.strict_names);
/// ```
#[derive(Clone, Debug)]
pub struct TreeOptions {
    /// Spaces per nesting level in the document text.
    pub indent: usize,
    pub delimiter: Delimiter,
    /// When set, a nested load fails with [`Error::NameMismatch`](crate::Error::NameMismatch)
    /// unless the child node was saved under the loading type's node name.
    pub strict_names: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            strict_names: false,
        }
    }
}

impl TreeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// A width of zero would make nesting unreadable, so it is clamped to one.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables node name checking on nested loads.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use save_tree::TreeOptions;
    ///
    /// let options = TreeOptions::new().with_strict_names(true);
    /// assert!(options.strict_names);
    /// ```
    #[must_use]
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }
}

/// Byte order used by the binary formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// Configuration for the binary formatter.
#[derive(Clone, Debug, Default)]
pub struct BinaryOptions {
    pub endian: Endian,
}

impl BinaryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }
}
