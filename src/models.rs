// ABOUTME: Core data models re-exported from alchemylab-core
// ABOUTME: Platform identifiers, organization ids, connection records, and credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

pub use alchemylab_core::models::*;
