use crate::{error::TransportError, matrix::ComplexMatrix};
use num_complex::Complex;

/// The wide-band retarded self energy `-i Γ / 2` of a contact with coupling `gamma`
pub fn contact_self_energy(gamma: f64) -> Complex<f64> {
    Complex::new(0., -gamma / 2.)
}

/// The broadening function `Γ = i(Σ - Σ†)` of a contact self energy
pub fn broadening(self_energy: &ComplexMatrix) -> Result<ComplexMatrix, TransportError> {
    let anti_hermitian = self_energy.subtract(&self_energy.conjugate_transpose())?;
    Ok(anti_hermitian.scalar_multiply(Complex::new(0., 1.)))
}

#[cfg(test)]
mod test {
    use super::broadening;
    use crate::{
        self_energy::build_self_energies,
        utilities::matrices::{is_anti_hermitian, is_hermitian},
    };
    use approx::assert_relative_eq;

    #[test]
    fn broadening_recovers_the_coupling_on_the_contact_site() {
        let self_energy = build_self_energies(6, 0.3, 1.7).unwrap();
        let left = self_energy.left_broadening().unwrap();
        let right = self_energy.right_broadening().unwrap();

        assert_relative_eq!(left[(0, 0)].re, 0.3);
        assert_relative_eq!(right[(5, 5)].re, 1.7);
        assert_relative_eq!(left.trace().re, 0.3);
        assert_relative_eq!(right.trace().re, 1.7);
        assert_eq!(left.trace().im, 0.);
        assert_eq!(right[(0, 0)].norm(), 0.);
    }

    #[test]
    fn broadening_is_hermitian_and_the_difference_is_anti_hermitian() {
        let self_energy = build_self_energies(4, 0.8, 0.2).unwrap();
        let left = self_energy.left();
        assert!(is_anti_hermitian(
            &left.subtract(&left.conjugate_transpose()).unwrap()
        ));
        assert!(is_hermitian(&broadening(left).unwrap()));
    }
}
