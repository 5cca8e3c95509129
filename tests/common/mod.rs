use approx::assert_relative_eq;
use umbra::eclipse::{Contact, EclipseResult};
use umbra::observer::ObserverConstants;
use umbra::LocalCircumstances;

/// Solve at a location given in degrees, with an optional UTC offset.
pub fn solve_with_offset(latitude: f64, longitude: f64, utc_offset: Option<f64>) -> EclipseResult {
    let observer = ObserverConstants::new(latitude, longitude, None, utc_offset).unwrap();
    LocalCircumstances::default().solve(&observer).unwrap()
}

pub fn assert_contact_close(actual: &Contact, expected_t: f64, epsilon: f64) {
    assert_relative_eq!(actual.t, expected_t, epsilon = epsilon);
    assert!(
        actual.convergence.converged,
        "{:?} did not converge",
        actual.event_kind
    );
}

/// Check `C1 < C2 ≤ mid ≤ C3 < C4` on whichever contacts are present.
pub fn assert_chronological(result: &EclipseResult) {
    let mid = result.greatest_eclipse().t;
    let c1 = result.contact1().unwrap().t;
    let c4 = result.contact4().unwrap().t;

    match (result.contact2(), result.contact3()) {
        (Some(c2), Some(c3)) => {
            assert!(c1 < c2.t, "C1 {c1} >= C2 {}", c2.t);
            assert!(c2.t <= mid && mid <= c3.t);
            assert!(c3.t < c4, "C3 {} >= C4 {c4}", c3.t);
        }
        _ => assert!(c1 < mid && mid < c4),
    }
    assert!(result.is_chronological());
}
