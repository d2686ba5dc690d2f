use std::{
    fmt,
    time::{Duration, Instant},
};

/// Wall-clock time of a run, split into labelled phases.
#[derive(Clone, Debug)]
pub struct Timer {
    started: Instant,
    last: Instant,
    phases: Vec<(&'static str, Duration)>,
}

impl Timer {
    pub fn start() -> Self {
        let now = Instant::now();
        Self { started: now, last: now, phases: Vec::new() }
    }

    /// Closes the phase running since the previous lap (or the start).
    pub fn lap(&mut self, phase: &'static str) -> Duration {
        let now = Instant::now();
        let spent = now - self.last;
        self.last = now;
        self.phases.push((phase, spent));
        spent
    }

    pub fn phases(&self) -> &[(&'static str, Duration)] {
        &self.phases
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// `sample=1.2ms encode=3.4ms ...`
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (phase, spent)) in self.phases.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:?}", phase, spent)?;
        }
        Ok(())
    }
}

#[test]
fn test_laps_split_the_run() {
    use std::thread;

    let mut timer = Timer::start();
    thread::sleep(Duration::from_millis(20));
    let read = timer.lap("read");
    thread::sleep(Duration::from_millis(10));
    let write = timer.lap("write");

    assert!(read >= Duration::from_millis(20));
    assert!(write >= Duration::from_millis(10));
    assert!(timer.elapsed() >= read + write);

    let labels: Vec<_> = timer.phases().iter().map(|(phase, _)| *phase).collect();
    assert_eq!(labels, ["read", "write"]);
    assert!(timer.to_string().starts_with("read="));
    assert!(timer.to_string().contains(" write="));
}
