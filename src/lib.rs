//! VitaSync - terminal chat with the Coach Nova and Mood Mentor personas
//!
//! Each message is sent as a stateless, single-turn `generateContent` call to
//! the Gemini API, and the reply is mapped onto one transcript line.

pub mod ai;
pub mod app;
pub mod error;
pub mod exchange;
pub mod models;
pub mod prompts;
pub mod view;

pub use error::{Error, Result};
