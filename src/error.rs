// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderError {
    /// The object store refused or failed a request; retry policy belongs to the caller.
    #[error("Kubernetes API error: {0}")]
    StoreError(#[from] kube::Error),

    #[error("resource kind '{0}' is not supported by this operator")]
    UnsupportedKind(String),

    #[error("unable to find '{path}' in object kind '{kind}'")]
    UnsupportedShape { kind: String, path: String },

    #[error("field '{path}' is not {expected}")]
    InvalidShape { path: String, expected: &'static str },

    #[error("Failed to convert object: {0}")]
    ConversionError(#[from] serde_json::Error),
}

impl BinderError {
    /// True when the store answered with 404 for the requested object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BinderError::StoreError(kube::Error::Api(err)) if err.code == 404)
    }
}

pub type Result<T> = std::result::Result<T, BinderError>;
