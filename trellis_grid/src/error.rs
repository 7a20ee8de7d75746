// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// A failure reported by the host's rendering surface.
///
/// The surface is unusable when this happens; the grid does not retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceError {
    message: String,
}

impl SurfaceError {
    /// Creates an error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rendering surface failure: {}", self.message)
    }
}

impl core::error::Error for SurfaceError {}

/// Errors returned by [`Grid`](crate::Grid) operations.
///
/// Bad configuration is clamped and lookups outside the data return `None`,
/// so the only failures are fatal ones from the surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GridError {
    /// The surface could not apply column position rules.
    Surface(SurfaceError),
    /// The grid was torn down.
    TornDown,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "{e}"),
            Self::TornDown => f.write_str("grid was torn down"),
        }
    }
}

impl core::error::Error for GridError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::TornDown => None,
        }
    }
}

impl From<SurfaceError> for GridError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}
