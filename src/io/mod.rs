// src/io/mod.rs
pub mod boundaries;
pub mod dataset;
pub mod loader;

use std::io;

pub(crate) fn invalid_data<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, err)
}
