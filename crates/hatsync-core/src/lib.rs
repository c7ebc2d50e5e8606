//! hatsync Core - Domain types, configuration and port definitions
//!
//! This crate contains the pieces shared by the sync and health subsystems:
//! - **Configuration** - `Config` loaded from YAML or JSON, with validation and a builder
//! - **Domain types** - `SyncUnit`, `SyncOutcome`, `ProbeResult`, `HealthReport`, `Disposition`
//! - **Marker naming** - filesystem-safe names for failure marker files
//! - **Port definitions** - `ISynchronizer`, `IReachabilityCheck`, `IDisplayNotifier`
//!
//! # Architecture
//!
//! Same ports & adapters split as the rest of the workspace: the domain module
//! is pure, ports are traits, and adapters live in `hatsync-sync`,
//! `hatsync-health` and `hatsync-display`.

pub mod config;
pub mod domain;
pub mod ports;
