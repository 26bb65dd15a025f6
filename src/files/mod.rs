//! File and directory management.
//!
//! Queries answer with plain values; anything that changes the file system
//! returns a [`FilesError`](crate::error::FilesError) on failure.

pub mod io;
pub mod mutate;
pub mod query;

pub use {
    io::{open_output, read_to_string},
    mutate::{clear, clear_file, create_directory, create_file, delete, delete_file},
    query::{
        exists, file_size, is_directory, is_empty_directory, is_file, is_hidden, list_names,
        size,
    },
};
