use std::time::Duration;

use tokio::time::{Instant, sleep_until};

#[derive(Clone, Copy, Debug)]
struct Schedule {
    period: Duration,
    next: Instant,
}

#[derive(Debug, Default)]
pub struct TickTimer {
    schedule: Option<Schedule>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, period: Duration) {
        self.schedule = Some(Schedule {
            period,
            next: Instant::now() + period,
        });
    }

    pub fn cancel(&mut self) {
        self.schedule = None;
    }

    pub fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.schedule.map(|s| s.period)
    }

    pub async fn tick(&mut self) {
        let Some(schedule) = self.schedule.as_mut() else {
            std::future::pending::<()>().await;
            return;
        };

        sleep_until(schedule.next).await;
        schedule.next = Instant::now() + schedule.period;
    }
}
