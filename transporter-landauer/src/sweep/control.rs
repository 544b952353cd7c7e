use crate::{error::TransportError, parameters::SweepParameter};
use indicatif::ProgressBar;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Cooperative cancellation, deadline and progress reporting for a sweep.
///
/// Clones share one cancellation flag, so a clone handed to another thread can stop a
/// running sweep. The flag and the deadline are checked before every point.
#[derive(Clone, Default)]
pub struct SweepControl {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
    progress: Option<ProgressBar>,
}

impl fmt::Debug for SweepControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepControl")
            .field("deadline", &self.deadline)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl SweepControl {
    /// Stop the sweep once `deadline` has passed
    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Stop the sweep once `timeout` has elapsed from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Advance `progress` by one for every completed point
    pub fn with_progress(self, progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// Requests that every sweep sharing this flag stops before its next point
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel` has been called on this control or any of its clones
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails if the sweep should not evaluate `value`
    pub fn check(&self, parameter: SweepParameter, value: f64) -> Result<(), TransportError> {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled {
                parameter: parameter.to_string(),
                value,
            });
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(TransportError::DeadlineExceeded {
                    parameter: parameter.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn point_completed(&self) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
    }
}

#[cfg(test)]
mod test {
    use super::SweepControl;
    use crate::{error::TransportError, parameters::SweepParameter};
    use std::time::{Duration, Instant};

    #[test]
    fn default_control_never_stops() {
        let control = SweepControl::default();
        assert!(!control.is_cancelled());
        assert!(control.check(SweepParameter::Hopping, -1.).is_ok());
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let control = SweepControl::default();
        let handle = control.clone();
        handle.cancel();
        assert!(control.is_cancelled());
        assert_eq!(
            control.check(SweepParameter::Eta, 0.01),
            Err(TransportError::Cancelled {
                parameter: "eta".into(),
                value: 0.01
            })
        );
    }

    #[test]
    fn passed_deadline_stops_the_sweep() {
        let control = SweepControl::default().with_deadline(Instant::now());
        assert!(matches!(
            control.check(SweepParameter::FermiEnergy, 0.5),
            Err(TransportError::DeadlineExceeded { parameter, value }) if parameter == "EF" && value == 0.5
        ));
        let generous = SweepControl::default().with_timeout(Duration::from_secs(3600));
        assert!(generous.check(SweepParameter::FermiEnergy, 0.5).is_ok());
    }
}
