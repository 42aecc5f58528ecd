pub mod icons;
pub mod keys;
pub mod render;
pub mod terminal;

pub use keys::command_for_key;
pub use render::render;
pub use terminal::{TerminalPresenter, spawn_key_reader};
