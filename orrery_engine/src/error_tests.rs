//! Unit tests for error.rs
//!
//! Tests Error variants, conversions and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("device lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("device lost"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of memory");
}

#[test]
fn test_not_found_errors_are_distinct() {
    let mesh = Error::MeshNotFound("cube".to_string());
    let material = Error::MaterialNotFound("cube".to_string());

    assert_ne!(mesh, material);
    assert_eq!(format!("{}", mesh), "Mesh not found: cube");
    assert_eq!(format!("{}", material), "Material not found: cube");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("too many vertices".to_string());
    assert!(format!("{}", err).contains("Invalid resource"));
}

// ============================================================================
// CONVERSIONS
// ============================================================================

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: Error = io.into();
    match err {
        Error::Io(msg) => assert!(msg.contains("no such file")),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_try_reserve_error_becomes_out_of_memory() {
    let mut v: Vec<u64> = Vec::new();
    let reserve_err = v.try_reserve(usize::MAX).unwrap_err();
    assert_eq!(Error::from(reserve_err), Error::OutOfMemory);
}

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when(flag: bool) -> Result<u32> {
    if flag {
        crate::engine_bail!("orrery::test", "bailed with {}", 7);
    }
    Ok(1)
}

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("orrery::test", "copy of {} bytes failed", 64);
    assert_eq!(err, Error::BackendError("copy of 64 bytes failed".to_string()));
}

#[test]
fn test_engine_bail_returns_early() {
    assert_eq!(bail_when(false).unwrap(), 1);
    assert_eq!(
        bail_when(true).unwrap_err(),
        Error::BackendError("bailed with 7".to_string())
    );
}
