use crate::matrix::ComplexMatrix;

/// Tests for hermiticity of a matrix
pub fn is_hermitian(matrix: &ComplexMatrix) -> bool {
    let adjoint = matrix.conjugate_transpose();
    matrix
        .values()
        .iter()
        .zip(adjoint.values().iter())
        .all(|(element, adjoint_element)| {
            (element - adjoint_element).norm() < std::f64::EPSILON * 100_f64
        })
}

/// Tests for anti-hermiticity of a matrix
pub fn is_anti_hermitian(matrix: &ComplexMatrix) -> bool {
    let count = matrix.values().len() as f64;
    let mut mean = matrix.values().iter().map(|x| x.norm()).sum::<f64>() / count;
    if mean == 0_f64 {
        mean = 1_f64;
    }
    let adjoint = matrix.conjugate_transpose();
    matrix
        .values()
        .iter()
        .zip(adjoint.values().iter())
        .all(|(element, adjoint_element)| {
            (element + adjoint_element).norm() / mean < std::f64::EPSILON * 10000_f64
        })
}
