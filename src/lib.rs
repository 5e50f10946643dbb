// SPDX-License-Identifier: MPL-2.0
//! `metrics_view` is the state layer of the metrics viewer.
//!
//! It provides observable state containers mirrored into durable key/value
//! storage, locale registration and i18n setup over Fluent bundles, and a
//! development-only timing helper.

pub mod app;
pub mod config;
pub mod environment;
pub mod error;
pub mod i18n;
pub mod paths;
pub mod storage;
pub mod store;
pub mod theme;
pub mod timing;
