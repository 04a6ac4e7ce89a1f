pub mod json;

pub use json::{detail, json_response, plain};
