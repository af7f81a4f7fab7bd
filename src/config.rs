// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

const DEFAULT_ERROR_REQUEUE_SECS: u64 = 60;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace to watch for ServiceBindingRequests, all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Delay before a failed reconciliation is retried
    pub error_requeue_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let watch_namespace = env::var("WATCH_NAMESPACE")
            .ok()
            .filter(|ns| !ns.trim().is_empty());

        let error_requeue_secs = match env::var("ERROR_REQUEUE_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("ERROR_REQUEUE_SECS is not a number: {}", v))?,
            Err(_) => DEFAULT_ERROR_REQUEUE_SECS,
        };

        Ok(Config {
            watch_namespace,
            error_requeue_secs,
        })
    }
}

