//! Per-vehicle mutual exclusion
//!
//! Validate→Execute sequences and booking creation for the same vehicle run
//! one at a time inside this process. Different vehicles never wait on each
//! other. A vehicle's slot lives only while someone holds or waits for it.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::warn;

use crate::domain::{DomainError, DomainResult};

type Slots = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Drop the slot for `vehicle_id` if nobody besides the map references it.
fn evict_idle(slots: &Slots, vehicle_id: &str) {
    slots.remove_if(vehicle_id, |_, slot| Arc::strong_count(slot) == 1);
}

/// Held for the duration of a guarded section; released on drop.
#[derive(Debug)]
pub struct VehicleGuard {
    lock: Option<OwnedMutexGuard<()>>,
    vehicle_id: String,
    slots: Slots,
}

impl Drop for VehicleGuard {
    fn drop(&mut self) {
        // The owned guard keeps a reference to the slot; release it first.
        drop(self.lock.take());
        evict_idle(&self.slots, &self.vehicle_id);
    }
}

pub struct VehicleGuards {
    slots: Slots,
    timeout: Duration,
}

impl VehicleGuards {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            timeout,
        }
    }

    /// Wait for exclusive access to `vehicle_id`, giving up with `Busy`
    /// after the configured timeout.
    pub async fn acquire(&self, vehicle_id: &str) -> DomainResult<VehicleGuard> {
        // Clone the Arc out so the map shard is not held while waiting.
        let slot = self
            .slots
            .entry(vehicle_id.to_string())
            .or_default()
            .clone();

        match tokio::time::timeout(self.timeout, slot.lock_owned()).await {
            Ok(lock) => Ok(VehicleGuard {
                lock: Some(lock),
                vehicle_id: vehicle_id.to_string(),
                slots: self.slots.clone(),
            }),
            Err(_) => {
                evict_idle(&self.slots, vehicle_id);
                warn!(
                    vehicle_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "vehicle guard not acquired in time"
                );
                Err(DomainError::Busy(vehicle_id.to_string()))
            }
        }
    }

    /// Number of vehicles currently held or waited on.
    pub fn in_use(&self) -> usize {
        self.slots.len()
    }
}

impl Default for VehicleGuards {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

pub type SharedVehicleGuards = Arc<VehicleGuards>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_vehicle_is_exclusive() {
        let guards = VehicleGuards::new(Duration::from_millis(20));
        let held = guards.acquire("CAR001").await.unwrap();

        let err = guards.acquire("CAR001").await.unwrap_err();
        assert!(matches!(err, DomainError::Busy(ref id) if id == "CAR001"));

        drop(held);
        assert!(guards.acquire("CAR001").await.is_ok());
    }

    #[tokio::test]
    async fn different_vehicles_do_not_block() {
        let guards = VehicleGuards::new(Duration::from_millis(20));
        let _a = guards.acquire("CAR001").await.unwrap();
        assert!(guards.acquire("CAR002").await.is_ok());
    }

    #[tokio::test]
    async fn released_slots_are_evicted() {
        let guards = VehicleGuards::new(Duration::from_millis(20));
        for i in 0..100 {
            let _g = guards.acquire(&format!("CAR{:03}", i)).await.unwrap();
        }
        assert_eq!(guards.in_use(), 0);

        let held = guards.acquire("CAR001").await.unwrap();
        assert_eq!(guards.in_use(), 1);
        drop(held);
        assert_eq!(guards.in_use(), 0);
    }

    #[tokio::test]
    async fn slot_survives_while_a_waiter_is_queued() {
        let guards = Arc::new(VehicleGuards::new(Duration::from_secs(1)));
        let held = guards.acquire("CAR001").await.unwrap();

        let waiter = {
            let guards = guards.clone();
            tokio::spawn(async move {
                let _g = guards.acquire("CAR001").await.unwrap();
                guards.in_use()
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);

        // The waiter got the same slot, so it still saw exactly one entry.
        assert_eq!(waiter.await.unwrap(), 1);
        assert_eq!(guards.in_use(), 0);
    }

    #[tokio::test]
    async fn timed_out_waiter_does_not_leak_the_slot() {
        let guards = VehicleGuards::new(Duration::from_millis(10));
        let held = guards.acquire("CAR001").await.unwrap();
        assert!(guards.acquire("CAR001").await.is_err());
        assert_eq!(guards.in_use(), 1);
        drop(held);
        assert_eq!(guards.in_use(), 0);
    }
}
