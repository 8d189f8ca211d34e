//! docshot: Render text documents as PNG pages for chat-based review
//!
//! Splits a document into fixed-size pages, draws each page as a dark,
//! terminal-style image with line numbers and light highlighting, and passes
//! the resulting images to an external chat program.

use std::process::ExitCode;

fn main() -> ExitCode {
    docshot::cli::run()
}
