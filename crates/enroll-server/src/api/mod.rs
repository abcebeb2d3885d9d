// ABOUTME: API module containing the HTTP handlers the editor page calls.
// ABOUTME: Currently just configuration fetch and save.

pub mod config;
