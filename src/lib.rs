//! Turn a YouTube video id into model-proposed chapter titles.
//!
//! The caption track is scraped from the watch page, normalized into a
//! timestamped transcript, cached on disk, and sent to a chat completion
//! endpoint. The raw response is kept as a JSON completion record.

pub mod cli;
pub mod commands;
pub mod config;
pub mod pipeline;
pub mod storage;
pub mod summarize;
pub mod transcript;
pub mod video;

#[cfg(test)]
mod testing;
