// ABOUTME: Security helpers shared by route handlers
// ABOUTME: Currently limited to reading session cookies from request headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

/// Cookie parsing for browser sessions
pub mod cookies;
