use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out human-facing order numbers. One instance lives in the
/// application state; it is seeded from the highest number already stored.
#[derive(Debug, Default)]
pub struct OrderSequence {
    last: AtomicI64,
}

impl OrderSequence {
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last.max(0)),
        }
    }

    pub fn next(&self) -> i64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_continue_after_seed() {
        let seq = OrderSequence::starting_after(41);
        assert_eq!(seq.next(), 42);
        assert_eq!(seq.next(), 43);
        assert_eq!(seq.current(), 43);
    }

    #[test]
    fn concurrent_callers_never_share_a_number() {
        let seq = std::sync::Arc::new(OrderSequence::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..250).map(|_| seq.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 1000);
        assert_eq!(seq.current(), 1000);
    }
}
