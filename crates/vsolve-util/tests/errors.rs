use vsolve_util::errors::VsolveError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = VsolveError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = VsolveError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_index_error_display() {
    let err = VsolveError::Index {
        message: "missing version".to_string(),
    };
    assert_eq!(err.to_string(), "Index error: missing version");
}

#[test]
fn test_resolution_error_display() {
    let err = VsolveError::Resolution {
        message: "no compatible versions".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Dependency resolution failed: no compatible versions"
    );
}

#[test]
fn test_config_error_display() {
    let err = VsolveError::Config {
        message: "unreadable".to_string(),
    };
    assert_eq!(err.to_string(), "Config error: unreadable");
}

#[test]
fn test_generic_error_display() {
    let err = VsolveError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: VsolveError = io_err.into();
    assert!(matches!(err, VsolveError::Io(_)));
}
