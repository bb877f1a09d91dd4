//! Shared test utilities for helix_maps integration tests.
//!
//! This module provides builders for nested plain dicts and INI fixtures.

#![allow(dead_code)]

use helix_maps::{Dict, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a plain dict from `(key, value)` pairs.
pub fn dict<V: Into<Value>>(pairs: Vec<(&str, V)>) -> Dict {
    pairs.into_iter().collect()
}

/// A dict that contains itself under `key`, next to `other` entries.
pub fn self_referential(key: &str, other: Vec<(&str, Value)>) -> Dict {
    let d = dict(other);
    d.insert(key, Value::Dict(d.clone()));
    d
}

/// Write `content` to `name` inside a fresh temp dir.
///
/// The returned `TempDir` must be kept alive while the file is in use.
pub fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    (dir, path)
}

/// Sample Helix configuration used across tests.
pub const HELIX_INI: &str = "\
[DEFAULT]
workspace = &HELIX_TEST_ROOT&

[window]
title = Helix
width = 1280
maximized = TRUE
scale = 1.25

[paths]
datasets = %(workspace)s/datasets
models = &HELIX_TEST_ROOT&/models

[training]
epochs = 30
classes = ['cell', 'nucleus']
split = (0.8, 0.2)
augment = {'flip': True, 'rotate': 15}
";
