// Library root
// -----------
// This crate exposes a small library surface for the `bakeit` binary.
//
// Module responsibilities:
// - `api`: builds and sends the paste upload request to Pastery and
//   parses the reply.
// - `config`: locates the config file and reads the api_key from it.
// - `input`: reads the paste content from a file or standard input.
// - `cli`: argument parsing and the run flow used by `main.rs`.
// - `error`: typed errors returned by the modules above.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;

pub use api::{PasteOptions, PasteryClient, UploadRequest, UploadResponse};
pub use error::{ConfigError, UploadError};
