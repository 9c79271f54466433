use composer_core::{AttemptOutcome, DebugEntry, DebugLog, DEBUG_LOG_CAP};

fn entry(n: usize) -> DebugEntry {
    DebugEntry {
        at: format!("12:00:{n:02}"),
        detail: format!("attempt {n}"),
        outcome: if n % 2 == 0 {
            AttemptOutcome::Success
        } else {
            AttemptOutcome::Failure
        },
    }
}

#[test]
fn newest_entries_come_first() {
    let mut log = DebugLog::new();
    log.push(entry(1));
    log.push(entry(2));

    let details: Vec<_> = log.entries().map(|e| e.detail.as_str()).collect();
    assert_eq!(details, vec!["attempt 2", "attempt 1"]);
}

#[test]
fn ring_is_bounded_at_the_cap() {
    let mut log = DebugLog::new();
    for n in 0..DEBUG_LOG_CAP + 10 {
        log.push(entry(n));
    }

    assert_eq!(log.len(), DEBUG_LOG_CAP);
    // The oldest entries were dropped.
    let oldest = log.entries().last().unwrap();
    assert_eq!(oldest.detail, "attempt 10");
}

#[test]
fn small_caps_are_honored() {
    let mut log = DebugLog::with_cap(2);
    log.push(entry(1));
    log.push(entry(2));
    log.push(entry(3));

    assert_eq!(log.len(), 2);
    let details: Vec<_> = log.entries().map(|e| e.detail.as_str()).collect();
    assert_eq!(details, vec!["attempt 3", "attempt 2"]);
}
