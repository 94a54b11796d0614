pub mod credential;
pub mod input_descriptor;
pub mod path;
pub mod presentation_definition;
