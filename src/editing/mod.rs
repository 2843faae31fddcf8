pub mod essay;
pub mod selection;
pub mod undo;

pub use essay::EssayBuffer;
pub use selection::{resolve_selection, Passage, SelectionError, SelectionInput};
pub use undo::{record_checkpoint, revert_checkpoint, UndoPayload};

pub type EditingResult<T> = anyhow::Result<T>;
