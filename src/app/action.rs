use crate::form::FieldValue;

#[derive(Debug)]
pub enum Action {
    Submit { values: Vec<(String, FieldValue)> },
    Quit,
}
