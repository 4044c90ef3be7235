//! Model persistence: saving and loading trained vocabularies.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedVocabulary, MODEL_FILE};
pub use load::VocabularyLoader;
pub use save::VocabularySaver;
