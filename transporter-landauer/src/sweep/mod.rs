//! # Sweep
//!
//! One-parameter sweeps of the Landauer conductance. For every value a copy of the base
//! `ParameterSet` is made with one field replaced, and the Hamiltonian and self energies
//! are rebuilt from scratch.
//!
//! Every value is validated before the first conductance is computed. Disorder for the
//! point at index `i` is drawn from a generator seeded with a value derived from the base
//! seed and `i` alone, so the serial and the parallel sweep produce identical results.

mod control;

pub use control::SweepControl;

use crate::{
    error::TransportError,
    parameters::{ParameterSet, SweepParameter},
};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// The conductance at a single value of the swept parameter
pub struct SweepPoint {
    /// Value of the swept parameter
    pub value: f64,
    /// Landauer conductance in Siemens
    pub conductance: f64,
}

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The disorder seed of the point at `index`, the first point reuses the base seed
fn point_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add((index as u64).wrapping_mul(SEED_STRIDE))
}

/// Applies and validates every override before any matrix is built
fn prepare(
    parameter: SweepParameter,
    values: &[f64],
    base: &ParameterSet,
) -> Result<(u64, Vec<ParameterSet>), TransportError> {
    let parameters = values
        .iter()
        .map(|&value| {
            let parameters = base.with_override(parameter, value)?;
            parameters.validate_device()?;
            Ok(parameters)
        })
        .collect::<Result<Vec<_>, TransportError>>()?;
    let base_seed = base.seed.unwrap_or_else(rand::random);
    tracing::debug!(
        "Sweeping {} over {} values with base seed {}",
        parameter,
        values.len(),
        base_seed
    );
    Ok((base_seed, parameters))
}

fn evaluate(
    parameter: SweepParameter,
    index: usize,
    value: f64,
    parameters: &ParameterSet,
    base_seed: u64,
    control: &SweepControl,
) -> Result<SweepPoint, TransportError> {
    control.check(parameter, value)?;
    let mut rng = StdRng::seed_from_u64(point_seed(base_seed, index));
    let conductance = parameters.conductance(&mut rng).map_err(|error| {
        tracing::error!("Sweep over {} failed at {}: {}", parameter, value, error);
        error.at_point(parameter.name(), value)
    })?;
    control.point_completed();
    Ok(SweepPoint { value, conductance })
}

/// Sweeps the parameter called `name` over `values`.
///
/// Valid names are `N`, `t`, `eps`, `disorder`, `gammaL`, `gammaR`, `eta` and `EF`.
pub fn sweep(
    name: &str,
    values: &[f64],
    base: &ParameterSet,
) -> Result<Vec<SweepPoint>, TransportError> {
    let parameter = name.parse()?;
    sweep_with_control(parameter, values, base, &SweepControl::default())
}

/// Sweeps `parameter` over `values` in order, stopping early when `control` says so
#[tracing::instrument(level = "info", skip(values, base, control))]
pub fn sweep_with_control(
    parameter: SweepParameter,
    values: &[f64],
    base: &ParameterSet,
    control: &SweepControl,
) -> Result<Vec<SweepPoint>, TransportError> {
    let (base_seed, parameters) = prepare(parameter, values, base)?;
    values
        .iter()
        .zip(parameters.iter())
        .enumerate()
        .map(|(index, (&value, parameters))| {
            evaluate(parameter, index, value, parameters, base_seed, control)
        })
        .collect()
}

/// Sweeps `parameter` over `values` on the rayon thread pool.
///
/// Results are returned in the order of `values` and agree exactly with
/// `sweep_with_control`. When several points fail the reported error is one of them,
/// not necessarily the first in value order.
#[tracing::instrument(level = "info", skip(values, base, control))]
pub fn parallel_sweep(
    parameter: SweepParameter,
    values: &[f64],
    base: &ParameterSet,
    control: &SweepControl,
) -> Result<Vec<SweepPoint>, TransportError> {
    let (base_seed, parameters) = prepare(parameter, values, base)?;
    values
        .par_iter()
        .zip(parameters.par_iter())
        .enumerate()
        .map(|(index, (&value, parameters))| {
            evaluate(parameter, index, value, parameters, base_seed, control)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{parallel_sweep, point_seed, sweep, sweep_with_control, SweepControl};
    use crate::{
        error::TransportError,
        parameters::{ParameterSet, SweepParameter},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn base() -> ParameterSet {
        ParameterSet {
            number_of_sites: 6,
            seed: Some(3),
            ..ParameterSet::default()
        }
    }

    #[test]
    fn single_value_sweep_matches_a_direct_calculation() {
        let base = base();
        for parameter in SweepParameter::ALL {
            let value = match parameter {
                SweepParameter::NumberOfSites => 9.,
                SweepParameter::Hopping => -0.8,
                SweepParameter::OnsiteEnergy => 0.2,
                SweepParameter::Disorder => 0.3,
                SweepParameter::GammaLeft => 0.7,
                SweepParameter::GammaRight => 0.2,
                SweepParameter::Eta => 1e-2,
                SweepParameter::FermiEnergy => 0.4,
            };
            let points = sweep(parameter.name(), &[value], &base).unwrap();
            let direct = base
                .with_override(parameter, value)
                .unwrap()
                .conductance(&mut StdRng::seed_from_u64(3))
                .unwrap();
            assert_eq!(points.len(), 1);
            assert_eq!(points[0].value, value);
            assert_eq!(points[0].conductance, direct, "{}", parameter);
        }
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        assert!(matches!(
            sweep("temperature", &[300.], &base()),
            Err(TransportError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn invalid_values_fail_before_any_point_is_computed() {
        let control = SweepControl::default();
        let result = sweep_with_control(SweepParameter::Eta, &[1e-3, 0., 1e-2], &base(), &control);
        assert!(matches!(
            result,
            Err(TransportError::InvalidParameter { name, .. }) if name == "eta"
        ));
        assert!(matches!(
            sweep("N", &[4., 4.5], &base()),
            Err(TransportError::InvalidParameter { name, .. }) if name == "N"
        ));
    }

    #[test]
    fn chain_lengths_beyond_memory_fail_before_any_point_is_computed() {
        assert!(matches!(
            sweep("N", &[4., 1e10], &base()),
            Err(TransportError::InvalidDimension { dimension: 10_000_000_000, .. })
        ));
        assert!(matches!(
            sweep("N", &[1e30], &base()),
            Err(TransportError::InvalidParameter { name, .. }) if name == "N"
        ));
    }

    #[test]
    fn failing_point_carries_its_sweep_value() {
        // E - eps overflows to -inf on the diagonal, which leaves no usable pivot
        let base = ParameterSet {
            number_of_sites: 2,
            onsite_energy: 1e308,
            ..base()
        };
        let values = [0., -1e308];
        let control = SweepControl::default();
        for result in [
            sweep_with_control(SweepParameter::FermiEnergy, &values, &base, &control),
            parallel_sweep(SweepParameter::FermiEnergy, &values, &base, &control),
        ] {
            let error = result.unwrap_err();
            assert!(matches!(
                &error,
                TransportError::PointFailed { parameter, value, .. }
                    if parameter == "EF" && *value == -1e308
            ));
            assert!(matches!(
                error.root_cause(),
                TransportError::SingularMatrix { column: 1, dimension: 2, .. }
            ));
        }
    }

    #[test]
    fn empty_sweep_is_empty() {
        assert!(sweep("EF", &[], &base()).unwrap().is_empty());
    }

    #[test]
    fn parallel_sweep_agrees_with_the_serial_sweep() {
        let base = ParameterSet {
            disorder: 0.4,
            ..base()
        };
        let values: Vec<f64> = (0..24).map(|i| -1.5 + 0.125 * i as f64).collect();
        let control = SweepControl::default();
        let serial =
            sweep_with_control(SweepParameter::FermiEnergy, &values, &base, &control).unwrap();
        let parallel =
            parallel_sweep(SweepParameter::FermiEnergy, &values, &base, &control).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn cancelled_sweep_reports_the_first_skipped_value() {
        let control = SweepControl::default();
        control.cancel();
        assert_eq!(
            sweep_with_control(SweepParameter::GammaLeft, &[0.1, 0.2], &base(), &control),
            Err(TransportError::Cancelled {
                parameter: "gammaL".into(),
                value: 0.1
            })
        );
    }

    #[test]
    fn expired_deadline_stops_the_parallel_sweep() {
        let control = SweepControl::default().with_deadline(std::time::Instant::now());
        assert!(matches!(
            parallel_sweep(SweepParameter::Hopping, &[-1., -0.5], &base(), &control),
            Err(TransportError::DeadlineExceeded { parameter, .. }) if parameter == "t"
        ));
    }

    #[test]
    fn point_seeds_are_distinct_and_start_from_the_base() {
        assert_eq!(point_seed(42, 0), 42);
        assert_ne!(point_seed(42, 1), point_seed(42, 2));
        assert_eq!(point_seed(u64::MAX, 1), u64::MAX.wrapping_add(0x9E37_79B9_7F4A_7C15));
    }
}
