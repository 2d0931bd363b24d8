pub mod project;
pub mod record;
pub mod source;
pub mod target;

pub use project::{RenderedFields, project, project_tags, render};
pub use record::{PropertyValue, RawRecord};
pub use source::{QueryPage, SourceDatabase, SourceError};
pub use target::{FlashcardTarget, NoteRequest, TargetError, TargetRejection};
