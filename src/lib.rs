//! # Space Search
//!
//! A small HTTP API over a static catalog of space imagery: list every
//! record, run a keyword-overlap search with a confidence score, and page
//! through (or prune) the history of searches made.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────────────────┐
//! │ catalog.json │──▶│ space-search-core                    │
//! └──────────────┘   │  Catalog ─▶ search() ─▶ HistoryLedger │
//!                    └──────────────┬───────────────────────┘
//!                         ┌─────────┴─────────┐
//!                         ▼                   ▼
//!                    ┌──────────┐       ┌──────────┐
//!                    │   CLI    │       │   HTTP   │
//!                    └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! space-search sources                  # print the catalog
//! space-search search "mars landing"    # rank matches offline
//! space-search serve                    # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | Catalog file loading and listing |
//! | [`search`] | Offline search command |
//! | [`server`] | HTTP API |
//! | [`telemetry`] | Tracing subscriber setup |

pub mod config;
pub mod search;
pub mod server;
pub mod sources;
pub mod telemetry;
