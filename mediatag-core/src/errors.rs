// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by this crate.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred while reading, writing, or seeking the stream.
    IoError(Box<dyn StdError + Send + Sync>),
    /// An IO error occurred while reading, writing, or seeking the stream that is retryable.
    IoInterruptedError(Box<dyn StdError + Send + Sync>),
    /// The stream contained malformed data and could not be parsed.
    DecodeError(&'static str),
    /// An unsupported container or tag feature was encountered.
    Unsupported(&'static str),
    /// A default or user-defined limit was reached while parsing the stream. Limits are used to
    /// prevent denial-of-service attacks from malicious or corrupt streams.
    LimitError(&'static str),
    /// A rewrite plan referenced a byte offset that no longer matches the container's on-disk
    /// layout (e.g., the file was modified between planning and committing the rewrite).
    BadTagOffset(&'static str),
    /// A caller-supplied cancellation token or progress callback aborted the operation.
    OperationAborted,
    /// Unexpected end of stream.
    EndOfFile,
    Other(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => write!(f, "io error: {}", err),
            Error::IoInterruptedError(ref err) => write!(f, "io error: {}", err),
            Error::DecodeError(msg) => write!(f, "malformed stream: {}", msg),
            Error::Unsupported(feature) => write!(f, "unsupported feature: {}", feature),
            Error::LimitError(constraint) => write!(f, "limit reached: {}", constraint),
            Error::BadTagOffset(msg) => write!(f, "stale tag offset: {}", msg),
            Error::OperationAborted => write!(f, "operation aborted"),
            Error::EndOfFile => write!(f, "unexpected end of file"),
            Error::Other(msg) => write!(f, "other error: {}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err.deref()),
            Error::IoInterruptedError(ref err) => Some(err.deref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        match err.kind() {
            std::io::ErrorKind::Interrupted => Error::IoInterruptedError(Box::new(err)),
            std::io::ErrorKind::UnexpectedEof => Error::EndOfFile,
            _ => Error::IoError(Box::new(err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a decode error.
pub fn decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::DecodeError(desc))
}

/// Convenience function to create an unsupported-feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}

/// Convenience function to create a limit error.
pub fn limit_error<T>(constraint: &'static str) -> Result<T> {
    Err(Error::LimitError(constraint))
}

/// Convenience function to create a stale-offset error for a rewrite plan.
pub fn offset_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::BadTagOffset(desc))
}

/// Convenience function to create an aborted-operation error.
pub fn aborted_error<T>() -> Result<T> {
    Err(Error::OperationAborted)
}

/// Convenience function to create an end-of-stream error.
pub fn end_of_stream_error<T>() -> Result<T> {
    Err(Error::EndOfFile)
}
