//! Form widget states: text input, single select, combobox multiselect,
//! and the form container that owns them.

pub mod form;
pub mod multiselect;
pub mod select;
pub mod text_input;

pub use form::{Control, Field, FieldValue, FormState};
pub use multiselect::{ChoiceOption, MultiSelectState};
pub use select::SelectState;
pub use text_input::TextInputState;
