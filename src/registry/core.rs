use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One named periodic task tracked by the scheduler.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    interval: Duration,
    next_due: Instant,
}

impl Schedule {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Process-wide table of periodic refresh tasks keyed by region id.
///
/// Registration is idempotent so a full re-initialization never stacks a
/// second task onto an id that already has one. Due tasks are rescheduled
/// from the moment they fire, not from their nominal deadline; when a tick
/// overruns its interval the following ticks shift with it.
#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    tasks: HashMap<String, Schedule>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a schedule for `id` unless one already exists. Returns true
    /// when a new schedule was installed.
    pub fn register_if_absent(
        &mut self,
        id: impl Into<String>,
        interval: Duration,
        first_due: Instant,
    ) -> bool {
        let id = id.into();
        if self.tasks.contains_key(&id) {
            return false;
        }
        self.tasks.insert(
            id,
            Schedule {
                interval,
                next_due: first_due,
            },
        );
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Earliest deadline across every task.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.values().map(|task| task.next_due).min()
    }

    /// Ids due at `now`, sorted for deterministic firing order, each pushed
    /// one interval ahead.
    pub fn take_due(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<String> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.next_due <= now)
            .map(|(id, _)| id.clone())
            .collect();
        due.sort();
        for id in &due {
            if let Some(task) = self.tasks.get_mut(id) {
                task.next_due = now + task.interval;
            }
        }
        due
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = ScheduleRegistry::new();
        let now = Instant::now();
        assert!(registry.register_if_absent("left", Duration::from_secs(2), now));
        assert!(!registry.register_if_absent("left", Duration::from_secs(5), now));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn due_tasks_fire_once_and_reschedule() {
        let mut registry = ScheduleRegistry::new();
        let now = Instant::now();
        registry.register_if_absent("header", Duration::from_secs(1), now);
        registry.register_if_absent("left", Duration::from_secs(2), now);

        let fired = registry.take_due(now);
        assert_eq!(fired, vec!["header".to_string(), "left".to_string()]);

        // Nothing is due again until an interval has passed.
        assert!(registry.take_due(now).is_empty());
        let fired = registry.take_due(now + Duration::from_secs(1));
        assert_eq!(fired, vec!["header".to_string()]);
    }

    #[test]
    fn next_deadline_is_the_minimum() {
        let mut registry = ScheduleRegistry::new();
        let now = Instant::now();
        registry.register_if_absent("slow", Duration::from_secs(60), now + Duration::from_secs(60));
        registry.register_if_absent("fast", Duration::from_secs(1), now + Duration::from_secs(1));
        assert_eq!(registry.next_deadline(), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn empty_registry_has_no_deadline() {
        assert_eq!(ScheduleRegistry::new().next_deadline(), None);
    }
}
