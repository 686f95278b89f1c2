//! Background tasks.
//!
//! Each submodule provides a long-running async task spawned from `main`.
//! The activity writer drains its channel when all senders drop, so shutdown
//! is a best-effort flush bounded by the configured shutdown timeout.

pub mod activity;
