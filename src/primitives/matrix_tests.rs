use super::*;

#[test]
fn test_from_vec_rejects_bad_length() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0]);
    assert!(result.is_err());
}

#[test]
fn test_from_row_is_single_row() {
    let m = Matrix::from_row(vec![1.0_f32, 2.0, 3.0]);
    assert_eq!(m.shape(), (1, 3));
    assert_eq!(m.get(0, 2), 3.0);
}

#[test]
fn test_get_is_row_major() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0]).expect("2x2");
    assert_eq!(m.get(1, 0), 3.0);
    assert_eq!(m.get(0, 1), 2.0);
}

#[test]
fn test_row_and_column() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("2x3");
    assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
    assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.column(2).as_slice(), &[3.0, 6.0]);
}

#[test]
fn test_zeros_and_finite() {
    let m = Matrix::zeros(3, 2);
    assert_eq!(m.shape(), (3, 2));
    assert!(m.is_finite());
    let m = Matrix::from_vec(1, 2, vec![0.0, f32::NAN]).expect("1x2");
    assert!(!m.is_finite());
}
