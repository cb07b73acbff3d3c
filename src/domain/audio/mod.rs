//! Audio domain module

mod blob;

pub use blob::{AudioBlob, AudioMimeType};
