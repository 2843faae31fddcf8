pub mod assistant;
pub mod chat;
pub mod document;
pub mod editing;
pub mod orchestration;
pub mod storage;
pub mod workspace;

// Re-export commonly used types for convenience.
pub use chat::EditorSession;
pub use document::EssayDocument;
pub use editing::EssayBuffer;
pub use orchestration::{SessionEvent, SessionLog};
pub use workspace::{AppConfig, Session, SessionManager};
