//! TimerScheduler — отложенные single-shot callbacks поверх frame clock
//!
//! Вместо engine timer handles: min-heap из (fire_time, seq, key).
//! На один `TimerKey` допускается максимум один pending таймер:
//! повторный `schedule` заменяет старый (старая запись в heap помечается
//! устаревшей через generation и выбрасывается при извлечении).

use bevy::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Назначение таймера (что произойдёт по истечении)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TimerKind {
    /// Enemy снова может играть hit-react montage
    HitReactReset,
    /// Enemy снова может атаковать
    AttackReset,
    /// Спрятать health bar врага
    HealthBarHide,
    /// Предмет долетел до камеры
    ItemInterp,
    /// Брошенный (или потерявший владельца) предмет перестал падать
    WeaponThrow,
}

/// Ключ таймера: владелец + назначение
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub entity: Entity,
    pub kind: TimerKind,
}

impl TimerKey {
    pub fn new(entity: Entity, kind: TimerKind) -> Self {
        Self { entity, kind }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    fire_at: f64,
    seq: u64,
    key: TimerKey,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    // Инвертировано: BinaryHeap — max-heap, нам нужен ближайший fire_at сверху
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Resource: очередь таймеров симуляции
#[derive(Resource, Debug, Default)]
pub struct TimerScheduler {
    now: f64,
    next_seq: u64,
    queue: BinaryHeap<ScheduledTimer>,
    /// key → seq актуальной записи (остальные записи для key устарели)
    pending: HashMap<TimerKey, u64>,
}

impl TimerScheduler {
    /// Текущее время scheduler'а (сек с начала симуляции)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Запланировать (или перезапланировать) таймер
    pub fn schedule(&mut self, key: TimerKey, duration: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.queue.push(ScheduledTimer {
            fire_at: self.now + f64::from(duration.max(0.0)),
            seq,
            key,
        });
        self.pending.insert(key, seq);
    }

    /// Отменить pending таймер. Возвращает true если было что отменять.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    /// Отменить все таймеры entity (despawn)
    pub fn cancel_all_for(&mut self, entity: Entity) {
        self.pending.retain(|key, _| key.entity != entity);
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Секунды до срабатывания pending таймера
    pub fn remaining(&self, key: TimerKey) -> Option<f32> {
        let seq = *self.pending.get(&key)?;
        self.queue
            .iter()
            .find(|entry| entry.seq == seq)
            .map(|entry| (entry.fire_at - self.now).max(0.0) as f32)
    }

    /// Продвинуть часы на `delta` и вернуть сработавшие ключи
    /// (порядок: fire_at, затем порядок постановки)
    pub fn advance(&mut self, delta: f32) -> Vec<TimerKey> {
        self.now += f64::from(delta.max(0.0));

        let mut fired = Vec::new();
        while let Some(top) = self.queue.peek() {
            if top.fire_at > self.now {
                break;
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };

            // Устаревшая запись (перезапланирована или отменена)
            if self.pending.get(&entry.key) != Some(&entry.seq) {
                continue;
            }

            self.pending.remove(&entry.key);
            fired.push(entry.key);
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: u32, kind: TimerKind) -> TimerKey {
        TimerKey::new(Entity::from_raw(index), kind)
    }

    #[test]
    fn test_timer_fires_after_duration() {
        let mut scheduler = TimerScheduler::default();
        let hit_react = key(1, TimerKind::HitReactReset);
        scheduler.schedule(hit_react, 0.5);

        assert!(scheduler.advance(0.25).is_empty());
        assert!(scheduler.is_pending(hit_react));

        assert_eq!(scheduler.advance(0.25), vec![hit_react]);
        assert!(!scheduler.is_pending(hit_react));
    }

    #[test]
    fn test_reschedule_replaces_pending_timer() {
        let mut scheduler = TimerScheduler::default();
        let health_bar = key(1, TimerKind::HealthBarHide);

        scheduler.schedule(health_bar, 1.0);
        scheduler.advance(0.8);
        // Повторное попадание → таймер перезапускается
        scheduler.schedule(health_bar, 1.0);

        assert_eq!(scheduler.pending_count(), 1);
        assert!(scheduler.advance(0.5).is_empty(), "old entry must not fire");
        assert_eq!(scheduler.advance(0.5), vec![health_bar]);
    }

    #[test]
    fn test_cancel_suppresses_timer() {
        let mut scheduler = TimerScheduler::default();
        let interp = key(2, TimerKind::ItemInterp);
        scheduler.schedule(interp, 0.7);

        assert!(scheduler.cancel(interp));
        assert!(!scheduler.cancel(interp));
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_fire_order_by_time_then_insertion() {
        let mut scheduler = TimerScheduler::default();
        let a = key(1, TimerKind::AttackReset);
        let b = key(2, TimerKind::AttackReset);
        let c = key(3, TimerKind::AttackReset);

        scheduler.schedule(a, 0.3);
        scheduler.schedule(b, 0.1);
        scheduler.schedule(c, 0.1);

        assert_eq!(scheduler.advance(1.0), vec![b, c, a]);
    }

    #[test]
    fn test_cancel_all_for_entity() {
        let mut scheduler = TimerScheduler::default();
        scheduler.schedule(key(1, TimerKind::HitReactReset), 0.5);
        scheduler.schedule(key(1, TimerKind::HealthBarHide), 4.0);
        scheduler.schedule(key(2, TimerKind::HealthBarHide), 4.0);

        scheduler.cancel_all_for(Entity::from_raw(1));

        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.advance(5.0), vec![key(2, TimerKind::HealthBarHide)]);
    }

    #[test]
    fn test_remaining_time() {
        let mut scheduler = TimerScheduler::default();
        let throw = key(4, TimerKind::WeaponThrow);
        scheduler.schedule(throw, 0.7);
        scheduler.advance(0.2);

        let remaining = scheduler.remaining(throw).unwrap();
        assert!((remaining - 0.5).abs() < 1.0e-5);
    }
}
