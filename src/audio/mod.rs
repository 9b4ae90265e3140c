//! Audio loading.

mod decode;

pub use decode::{AudioBuffer, load_audio_file};
