// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Binding of workloads to an intermediary secret.
//!
//! The [`Binder`] resolves the requested resource kind, searches the
//! namespace for workloads carrying the selector labels and makes every
//! container of each match reference the secret through `envFrom`.

pub mod binder;
pub mod kind;
pub mod locator;
pub mod mutator;
pub mod nested;

pub use binder::Binder;
pub use kind::{resolve_list_kind, ResourceKind};
pub use locator::search;
pub use mutator::{apply_to_workloads, inject_secret_reference};
pub use nested::FieldPath;
