// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;

use roswire::message::{Randomize, RosMessage};

/// Iterations for randomized round-trip loops.
pub const ROUND_TRIPS: u64 = 200;

/// Deterministic generator so failures reproduce.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Encode random instances of `T` and check they decode to themselves,
/// consume exactly their own bytes and re-encode identically.
pub fn assert_typed_round_trips<T: RosMessage + Randomize>(seed: u64) {
    let mut rng = seeded_rng(seed);
    for i in 0..ROUND_TRIPS {
        let original = T::randomize(&mut rng);
        let bytes = original.to_bytes();
        assert_eq!(
            bytes.len(),
            original.serialized_size(),
            "{} #{i}: size mismatch",
            T::TYPE_NAME
        );

        let mut position = 0;
        let decoded = T::from_bytes_at(&bytes, &mut position)
            .unwrap_or_else(|e| panic!("{} #{i}: {e}", T::TYPE_NAME));
        assert_eq!(position, bytes.len(), "{} #{i}: cursor", T::TYPE_NAME);
        assert_eq!(decoded, original, "{} #{i}", T::TYPE_NAME);
        assert_eq!(decoded.to_bytes(), bytes, "{} #{i}: re-encode", T::TYPE_NAME);
    }
}

/// Get a temporary directory for test files
fn temp_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("roswire_test_{}_{}", std::process::id(), n))
}

/// Create a temporary file path with cleanup guard
pub fn temp_path(name: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir();
    fs::create_dir_all(&dir).ok();
    let path = dir.join(name);
    let guard = CleanupGuard(dir);
    (path, guard)
}

/// Cleanup guard for test temporary files
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}
