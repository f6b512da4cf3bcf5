use std::io;
use valhook::error::ValhookError;

#[test]
fn test_io_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
    let err: ValhookError = io_err.into();

    match err {
        ValhookError::Io(_) => (),
        _ => panic!("Expected Io error variant"),
    }
}

#[test]
fn test_error_display() {
    let err = ValhookError::InvalidParameter("test parameter".to_string());
    assert_eq!(format!("{}", err), "Invalid parameter: test parameter");

    let err = ValhookError::Configuration("no such output".to_string());
    assert_eq!(format!("{}", err), "Configuration error: no such output");

    let err = ValhookError::TensorNotFound("wrong:0".to_string());
    assert_eq!(format!("{}", err), "Tensor not found: wrong:0");
}

#[test]
fn test_shape_error_conversion() {
    let shape_err = ndarray::ArrayD::<f32>::from_shape_vec(ndarray::IxDyn(&[2, 2]), vec![1.0]).unwrap_err();
    let err: ValhookError = shape_err.into();
    assert!(matches!(err, ValhookError::BatchShape(_)));
}
