// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource and packaging metadata types.

pub mod olm;
pub mod service_binding_request;

pub use olm::{Descriptor, OwnedCrdDescriptor};
pub use service_binding_request::{
    ApplicationSelector, BackingSelector, BindingRequest, ServiceBindingRequest,
    ServiceBindingRequestSpec,
};
