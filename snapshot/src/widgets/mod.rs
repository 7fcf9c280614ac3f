//! Building blocks for the brew log card
//!
//! Each widget renders onto a [`Canvas`](crate::canvas::Canvas) in logical
//! pixels and returns the height it used, so the card can stack them.
//!
//! - [`Header`] - Title with ruled subtitle and heavy underline
//! - [`LabeledValue`] - Small label over a `value / value` pair
//! - [`NoteBox`] - Labeled paragraph in one of three box styles
//! - [`StepRow`] - Numbered step with time range and water target

pub mod colors;
mod header;
mod labeled_value;
mod note_box;
mod step_row;

pub use header::Header;
pub use labeled_value::{Align, LabeledValue};
pub use note_box::{BoxStyle, NoteBox};
pub use step_row::StepRow;
