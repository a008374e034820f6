//! Expectation evaluation against a received response.

use mailprobe_domain::{
    Expectation, ExpectationResult, HEALTHY, HealthResponse, LoginResponse, ResponseSpec,
};

/// Characters of body quoted when a payload cannot be decoded.
const EXCERPT_CHARS: usize = 100;

/// Evaluates `expectations` in order, stopping at the first one not met.
///
/// The returned list ends with the miss, if any, so later expectations are
/// never reported against a response that already failed.
#[must_use]
pub fn evaluate(expectations: &[Expectation], response: &ResponseSpec) -> Vec<ExpectationResult> {
    let mut results = Vec::with_capacity(expectations.len());
    for expectation in expectations {
        let result = evaluate_one(expectation, response);
        let missed = !result.met;
        results.push(result);
        if missed {
            break;
        }
    }
    results
}

fn evaluate_one(expectation: &Expectation, response: &ResponseSpec) -> ExpectationResult {
    let expectation = expectation.clone();
    match expectation {
        Expectation::Status { code } => {
            let actual = response.status;
            if actual == code {
                ExpectationResult::met(expectation, actual.to_string())
            } else {
                ExpectationResult::missed(
                    expectation,
                    Some(actual.to_string()),
                    format!("Expected status = {code}, got {actual}"),
                )
            }
        }
        Expectation::Healthy => match response.payload::<HealthResponse>() {
            Ok(health) if health.is_healthy() => ExpectationResult::met(expectation, health.status),
            Ok(health) => {
                let reason = format!("Expected status \"{HEALTHY}\", got \"{}\"", health.status);
                ExpectationResult::missed(expectation, Some(health.status), reason)
            }
            Err(e) => undecodable(expectation, "health", &e, response),
        },
        Expectation::LoginSuccess { success } => match response.payload::<LoginResponse>() {
            Ok(login) if login.success == success => {
                ExpectationResult::met(expectation, login.success.to_string())
            }
            Ok(login) => ExpectationResult::missed(
                expectation,
                Some(login.success.to_string()),
                format!("Expected success={success}, got {}", login.success),
            ),
            Err(e) => undecodable(expectation, "login", &e, response),
        },
        Expectation::FasterThan { max_ms } => {
            let elapsed = response.elapsed_display();
            if response.duration.as_millis() < u128::from(max_ms) {
                ExpectationResult::met(expectation, elapsed)
            } else {
                let reason = format!("Response took {elapsed}, expected < {max_ms}ms");
                ExpectationResult::missed(expectation, Some(elapsed), reason)
            }
        }
    }
}

fn undecodable(
    expectation: Expectation,
    payload: &str,
    error: &serde_json::Error,
    response: &ResponseSpec,
) -> ExpectationResult {
    ExpectationResult::missed(
        expectation,
        None,
        format!(
            "Response is not a {payload} payload: {error}; body: {}",
            response.excerpt(EXCERPT_CHARS)
        ),
    )
}
