//! Shared helpers for router integration tests.

#![allow(dead_code)]

pub mod recording;
pub mod screens;
