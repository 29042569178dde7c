//! # Lexicon
//!
//! Everything that talks to the outside world on behalf of the dictionary:
//! the remote history document, the Larousse scraper and the example
//! extractor. Shared by the HTTP server and the `process` maintenance CLI.
//!
//!
//!
//! ## History document
//!
//! One JSON object, word -> definition markup, read and rewritten whole.
//!
//! - Firebase Realtime Database over REST (`GET`/`PUT` on a `.json` URL)
//! - Or a single Redis key holding the same JSON as a string
//!
//! No versioning, no locks. Two writers racing on the document means the last
//! `PUT` wins. This is accepted for a personal vocabulary history.
//!
//!
//!
//! ## Definitions
//!
//! Larousse pages are fetched once per unknown word and the `div#definition`
//! container is kept verbatim. Example sentences are re-extracted from that
//! markup on every read instead of being stored.
pub mod database;
pub mod extract;
pub mod firebase;
pub mod larousse;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod remote;
pub mod utils;

pub use extract::{extract_examples, markup_text};
pub use larousse::{DefinitionSource, Fetched, Larousse, Outcome};
pub use remote::{
    BackendKind, DocumentBackend, HistoryDocument, RemoteDictionaryStore, StoreError, connect,
};
pub use utils::normalize_word;
