//! Virtual-clock task scheduler.
//!
//! Periodic chores (autosave, achievement scan, ticker) and one-shot timers
//! (next event spawn, event expiry, overcharge hold) are entries keyed by
//! [`Task`]. The engine asks [`Scheduler::due`] once per frame with the
//! frame's timestamp; nothing here reads a real clock.

/// Every timer the engine runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    Autosave,
    AchievementScan,
    Ticker,
    MidnightCheck,
    EventSpawn,
    EventExpire,
    Overcharge,
}

#[derive(Clone, Debug)]
struct Entry {
    task: Task,
    due_ms: i64,
    /// `Some` for repeating tasks.
    period_ms: Option<i64>,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` every `period_ms`, first at `now_ms + period_ms`.
    /// Replaces any existing entry for the task.
    pub fn every(&mut self, task: Task, period_ms: i64, now_ms: i64) {
        let period = period_ms.max(1);
        self.insert(Entry {
            task,
            due_ms: now_ms + period,
            period_ms: Some(period),
        });
    }

    /// Run `task` once at `at_ms`. Replaces any existing entry for the task.
    pub fn once(&mut self, task: Task, at_ms: i64) {
        self.insert(Entry {
            task,
            due_ms: at_ms,
            period_ms: None,
        });
    }

    fn insert(&mut self, entry: Entry) {
        self.entries.retain(|e| e.task != entry.task);
        self.entries.push(entry);
    }

    /// Drop `task`. Returns true if it was scheduled.
    pub fn cancel(&mut self, task: Task) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.task != task);
        self.entries.len() != before
    }

    /// Push a repeating task's next run to a full period after `now_ms`.
    pub fn reset(&mut self, task: Task, now_ms: i64) {
        for e in &mut self.entries {
            if e.task == task {
                if let Some(period) = e.period_ms {
                    e.due_ms = now_ms + period;
                }
            }
        }
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.entries.iter().any(|e| e.task == task)
    }

    pub fn due_at(&self, task: Task) -> Option<i64> {
        self.entries.iter().find(|e| e.task == task).map(|e| e.due_ms)
    }

    /// Tasks due at `now_ms`, earliest first (ties in insertion order).
    /// Each fires at most once per call: repeating tasks are re-armed a full
    /// period after `now_ms`, one-shots are removed.
    pub fn due(&mut self, now_ms: i64) -> Vec<Task> {
        let mut fired: Vec<(i64, usize, Task)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .map(|(i, e)| (e.due_ms, i, e.task))
            .collect();
        fired.sort_by_key(|&(due, i, _)| (due, i));

        self.entries.retain(|e| e.due_ms > now_ms || e.period_ms.is_some());
        for e in &mut self.entries {
            if e.due_ms <= now_ms {
                if let Some(period) = e.period_ms {
                    e.due_ms = now_ms + period;
                }
            }
        }
        fired.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
