//! Terminal screen drawn by the console
//!
//! The console asks for a full redraw on ESC and an incremental update after
//! every byte it processes.

pub mod status;

pub use status::StatusScreen;

use crate::console::Output;

/// Screen collaborator of the console
pub trait Screen {
    /// Clear the terminal and draw everything
    fn refresh(&mut self, out: &mut dyn Output);

    /// Redraw whatever changed since the last draw
    fn update(&mut self, out: &mut dyn Output);
}

/// Screen that draws nothing
impl Screen for () {
    fn refresh(&mut self, _out: &mut dyn Output) {}

    fn update(&mut self, _out: &mut dyn Output) {}
}
