//! Client-facing endpoint layer over `wellness_core`.

pub mod api;
