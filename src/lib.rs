//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the
//! individual workspace crates. Host applications can depend on
//! `report-drive-workspace` and enable the `service` feature instead of
//! wiring each crate individually.
