//! Text access for editable surfaces.
//!
//! This module provides one abstraction for reading and splicing text across
//! every surface kind the assist supports:
//! - Single-line `<input>` fields (value + selection range)
//! - `<textarea>` (value + selection range)
//! - `contenteditable="true"` regions (rendered text + document selection)
//!
//! # Architecture
//!
//! - [`StringBuffer`]: char-offset addressed text
//! - [`Selection`]: anchor/head bounds
//! - [`splice`]: pure replace-selection / insert-at-caret
//! - [`insert_text`] and friends: the DOM-facing accessor
//! - [`ChangeNotifier`]: post-insertion notification hook
//!
//! # Example
//!
//! ```
//! use penmate::editable::{splice, InsertMode, Selection};
//!
//! let out = splice("abcXYZdef", Some(Selection::new(3, 6)), "123", InsertMode::ReplaceSelection);
//! assert_eq!(out.text, "abc123def");
//! assert_eq!(out.caret(), 6);
//! ```

mod accessor;
mod buffer;
mod selection;
mod splice;

pub use accessor::{
    get_full_text, get_selected_text, insert_text, read_selection, write_state, ChangeNotifier,
    NativeEvents,
};
pub use buffer::StringBuffer;
pub use selection::Selection;
pub use splice::{splice, EditOperation, InsertMode, Spliced};
