// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod logging;
mod prefixes;
mod resources;

pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use prefixes::{PrefixesConfig, PrefixesConfigLayer};
pub use resources::{ResourceConfig, ResourceConfigLayer, ResourcesConfig, ResourcesConfigLayer};
