// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging of node activity.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the switchyard. Message types follow a struct-based
//! pattern with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::node` - node lifecycle, script evaluation, and relay events
//! * `messages::enrichment` - target resolution and attribute merge events
//!
//! Each message type implements [`messages::StructuredLog`], which emits the
//! message at the level appropriate for that event.

pub mod messages;
