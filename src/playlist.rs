//! Playlist module: the ordered track list the controller plays through and
//! the loaders that build one from a playlist file or a music directory.

mod load;
mod model;
mod scan;

pub use load::load_playlist_file;
pub use model::*;
pub use scan::{scan, scan_playlist};

#[cfg(test)]
mod tests;
