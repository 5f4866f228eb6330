use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[error("Retry failed")]
pub struct RetryFailed;

/// Run `f` until it succeeds, allowing up to `times` retries after the
/// first attempt.
pub fn retry<T, E, F>(times: u32, f: F) -> Result<T, RetryFailed>
where
    F: Fn() -> Result<T, E>,
    E: std::error::Error + std::fmt::Display,
{
    for attempt in 0..=times {
        match f() {
            Ok(value) => return Ok(value),
            Err(err) if attempt == times => {
                warn!("No more retry attempts. Error: {}", err);
            }
            Err(err) => {
                warn!("Retry triggered. Error: {}", err);
            }
        }
    }
    Err(RetryFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("always fails")]
    struct AlwaysFails;

    #[test]
    fn test_retry_gives_up() {
        let calls = Cell::new(0u32);
        let result: Result<(), _> = retry(2, || {
            calls.set(calls.get() + 1);
            Err::<(), _>(AlwaysFails)
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_retry_succeeds_after_failures() {
        let calls = Cell::new(0u32);
        let result = retry(3, || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(AlwaysFails)
            } else {
                Ok(calls.get())
            }
        });
        assert_eq!(result.unwrap(), 3);
    }
}
