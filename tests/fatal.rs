//! Fatal log lines end the process; observed from a child process.
//!
//! The test re-runs its own binary with `EVENTPOOL_FATAL_CHILD` set. The child
//! logs a fatal message through a terminator that first reports what the pool
//! journaled, then exits like the default one.

use std::process::Command;
use std::sync::Arc;

use eventpool::{EventPool, Level, Logger, PoolConfig, ProcessExit, Terminate};

const CHILD_ENV: &str = "EVENTPOOL_FATAL_CHILD";
const TEST_NAME: &str = "fatal_log_journals_prints_and_exits";

/// Reports the last journaled log line on stderr, then exits.
struct ReportingExit {
    pool: Arc<EventPool>,
}

impl Terminate for ReportingExit {
    fn terminate(&self, message: &str) -> ! {
        let last = self
            .pool
            .recent(1)
            .first()
            .and_then(|ev| ev.log_message().map(|m| format!("{} {} {}", ev.tag(), m.level, m.message)))
            .unwrap_or_default();
        eprintln!("journal: {last}");
        ProcessExit::default().terminate(message)
    }
}

fn run_child() -> ! {
    // Silent and non-debug: fatal must bypass both filters.
    let pool = EventPool::new(PoolConfig {
        silent: true,
        ..PoolConfig::default()
    });
    let logger = Logger::with_terminator(
        Arc::clone(&pool),
        Arc::new(ReportingExit {
            pool: Arc::clone(&pool),
        }),
    );
    logger.info("filtered");
    logger.log(Level::Fatal, format_args!("{}", "boom"));
    unreachable!("fatal log returned");
}

#[test]
fn fatal_log_journals_prints_and_exits() {
    if std::env::var_os(CHILD_ENV).is_some() {
        run_child();
    }

    let exe = std::env::current_exe().expect("test binary path");
    let out = Command::new(exe)
        .args([TEST_NAME, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test process");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success(), "child exited successfully; stderr:\n{stderr}");
    assert_eq!(out.status.code(), Some(1), "stderr:\n{stderr}");
    assert!(
        stderr.lines().any(|line| line == "journal: sys.log fatal boom"),
        "fatal event not journaled; stderr:\n{stderr}"
    );
    assert!(
        stderr.lines().any(|line| line == "boom"),
        "message not written to stderr; stderr:\n{stderr}"
    );
}
