// ABOUTME: Unified error types re-exported from alchemylab-core
// ABOUTME: Keeps crate::errors paths stable for route handlers and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

pub use alchemylab_core::errors::*;
