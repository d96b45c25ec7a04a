//! Optimistic mutation
//!
//! Apply the change locally, send it, and compensate if the remote call
//! fails. `apply` returns whatever `compensate` needs to undo it.

use std::future::Future;

pub async fn mutate<S, T, E, A, R, Fut, C>(apply: A, remote: R, compensate: C) -> Result<T, E>
where
    A: FnOnce() -> S,
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: FnOnce(S),
{
    let snapshot = apply();
    match remote().await {
        Ok(value) => Ok(value),
        Err(err) => {
            compensate(snapshot);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_success_keeps_local_change() {
        let flag = Cell::new(false);
        let result: Result<(), ()> = mutate(
            || flag.replace(true),
            || async { Ok(()) },
            |previous| flag.set(previous),
        )
        .await;
        assert!(result.is_ok());
        assert!(flag.get());
    }

    #[tokio::test]
    async fn test_failure_compensates() {
        let flag = Cell::new(false);
        let result: Result<(), &str> = mutate(
            || flag.replace(true),
            || async { Err("offline") },
            |previous| flag.set(previous),
        )
        .await;
        assert_eq!(result, Err("offline"));
        assert!(!flag.get());
    }
}
