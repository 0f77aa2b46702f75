pub mod colorize;

pub use colorize::{BatchItemResponse, BatchResponse, ColorizeResponse};
