// Testset - Named, typed test fixtures
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for fixture loading, resolution and retrieval.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureErrorKind {
    /// A registered or included document has no backing resource.
    ResourceNotFound,
    /// A reference expression could not be resolved to data.
    ReferenceResolution,
    /// A directive names a field absent from the target type.
    UnknownField,
    /// Structural problem in a document (bad JSON, missing keys, unknown type).
    Malformed,
    /// Failure reading a resource.
    Io,
    /// Typed decoding or encoding of an element failed.
    Conversion,
    /// A configured loader limit was exceeded.
    Limit,
}

impl FixtureErrorKind {
    /// Whether errors of this kind belong to the I/O category.
    ///
    /// Missing resources and malformed documents are reported as I/O
    /// failures of the load call, like read errors.
    pub fn is_io(self) -> bool {
        matches!(self, Self::ResourceNotFound | Self::Malformed | Self::Io)
    }
}

impl fmt::Display for FixtureErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound => write!(f, "ResourceNotFound"),
            Self::ReferenceResolution => write!(f, "ReferenceResolutionError"),
            Self::UnknownField => write!(f, "UnknownFieldError"),
            Self::Malformed => write!(f, "MalformedDocument"),
            Self::Io => write!(f, "IOError"),
            Self::Conversion => write!(f, "ConversionError"),
            Self::Limit => write!(f, "LimitError"),
        }
    }
}

/// An error raised by the fixture engine.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct FixtureError {
    /// The kind of error.
    pub kind: FixtureErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (e.g., "while loading personneTestSet.json").
    pub context: Option<String>,
}

impl FixtureError {
    /// Create a new error.
    pub fn new(kind: FixtureErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information, appending to any existing context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(existing) => format!("{}; {}", existing, context),
            None => context,
        });
        self
    }

    /// Whether this error belongs to the I/O category.
    pub fn is_io(&self) -> bool {
        self.kind.is_io()
    }

    pub fn resource_not_found(identifier: &str) -> Self {
        Self::new(
            FixtureErrorKind::ResourceNotFound,
            format!(
                "cannot register fixtures: resource {} not found",
                identifier
            ),
        )
    }

    pub fn reference_resolution(expression: &str, field: &str) -> Self {
        Self::new(
            FixtureErrorKind::ReferenceResolution,
            format!(
                "cannot resolve reference {} for field {}",
                expression, field
            ),
        )
    }

    pub fn unknown_field(field: &str, type_name: &str) -> Self {
        Self::new(
            FixtureErrorKind::UnknownField,
            format!("field {} not found on type {}", field, type_name),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FixtureErrorKind::Malformed, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(FixtureErrorKind::Io, message)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(FixtureErrorKind::Conversion, message)
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(FixtureErrorKind::Limit, message)
    }
}

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Extension trait for adding context to `Result<T, FixtureError>`.
///
/// Context is added to the error's `context` field without modifying the
/// original message, so callers can still match on the message text.
pub trait FixtureResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> FixtureResult<T>
    where
        C: fmt::Display;

    /// Add lazily computed context to an error.
    fn with_context<C, F>(self, f: F) -> FixtureResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> FixtureResultExt<T> for FixtureResult<T> {
    fn context<C>(self, context: C) -> FixtureResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| e.with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> FixtureResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.with_context(f().to_string()))
    }
}

/// Convert foreign errors into [`FixtureError`] with a mapping closure.
pub trait MapErrToFixture<T, E> {
    fn map_err_to_fixture<F>(self, f: F) -> FixtureResult<T>
    where
        F: FnOnce(E) -> FixtureError;
}

impl<T, E> MapErrToFixture<T, E> for Result<T, E> {
    fn map_err_to_fixture<F>(self, f: F) -> FixtureResult<T>
    where
        F: FnOnce(E) -> FixtureError,
    {
        self.map_err(f)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::conversion(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Kind display tests ====================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(
            format!("{}", FixtureErrorKind::ResourceNotFound),
            "ResourceNotFound"
        );
        assert_eq!(
            format!("{}", FixtureErrorKind::ReferenceResolution),
            "ReferenceResolutionError"
        );
        assert_eq!(
            format!("{}", FixtureErrorKind::UnknownField),
            "UnknownFieldError"
        );
        assert_eq!(format!("{}", FixtureErrorKind::Io), "IOError");
    }

    #[test]
    fn test_io_category() {
        assert!(FixtureErrorKind::ResourceNotFound.is_io());
        assert!(FixtureErrorKind::Malformed.is_io());
        assert!(FixtureErrorKind::Io.is_io());
        assert!(!FixtureErrorKind::ReferenceResolution.is_io());
        assert!(!FixtureErrorKind::UnknownField.is_io());
        assert!(!FixtureErrorKind::Conversion.is_io());
    }

    // ==================== Message tests ====================

    #[test]
    fn test_resource_not_found_names_identifier() {
        let err = FixtureError::resource_not_found("adresseTestSetUnknown.json");
        assert_eq!(err.kind, FixtureErrorKind::ResourceNotFound);
        assert!(err.message.contains("adresseTestSetUnknown.json"));
        assert!(err.is_io());
    }

    #[test]
    fn test_reference_resolution_names_expression_and_field() {
        let err = FixtureError::reference_resolution("unreferenced", "address");
        assert_eq!(
            err.message,
            "cannot resolve reference unreferenced for field address"
        );
    }

    #[test]
    fn test_unknown_field_names_field_and_type() {
        let err = FixtureError::unknown_field("unknownField", "model.Personne");
        let msg = err.to_string();
        assert!(msg.starts_with("UnknownFieldError"));
        assert!(msg.contains("unknownField"));
        assert!(msg.contains("model.Personne"));
    }

    // ==================== Context tests ====================

    #[test]
    fn test_context_appends() {
        let result: FixtureResult<()> = Err(FixtureError::malformed("bad"));
        let err = result
            .context("while loading a.json")
            .context("while loading b.json")
            .unwrap_err();
        assert_eq!(
            err.context.as_deref(),
            Some("while loading a.json; while loading b.json")
        );
        assert_eq!(err.message, "bad");
    }

    #[test]
    fn test_with_context_is_lazy_on_success() {
        let result: FixtureResult<u8> = Ok(1);
        let value = result
            .with_context(|| -> String { panic!("must not be evaluated") })
            .unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_map_err_to_fixture() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result
            .map_err_to_fixture(|e| FixtureError::io(e.to_string()))
            .unwrap_err();
        assert_eq!(err.kind, FixtureErrorKind::Io);
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: FixtureError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.kind, FixtureErrorKind::Conversion);
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(FixtureError::io("test"));
    }
}
