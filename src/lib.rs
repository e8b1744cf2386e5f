pub mod config;
pub mod logger;
pub mod error;
pub mod index;
pub mod attachment;
pub mod render;
pub mod draft;
pub mod publisher;
pub mod manager;
pub mod text_utils;
mod test_data;

pub use draft::{Draft, PreviewMode};
pub use error::{BlogError, Result, ValidationError};
pub use index::{Index, Log};
pub use manager::{BlogManager, PostDetail};
