//! Flutter-facing bindings for `notepad_core`.

pub mod api;
