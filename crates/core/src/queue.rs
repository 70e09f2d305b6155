//! First-in-first-out queues of patient identifiers.
//!
//! Queues hold plain [`PatientId`] values, never references. Whoever drains a queue resolves
//! the id against the registry and must cope with ids that do not resolve.

use hms_types::PatientId;
use std::collections::VecDeque;

/// FIFO queue of patient identifiers.
#[derive(Clone, Debug, Default)]
pub struct PatientQueue {
    items: VecDeque<PatientId>,
}

/// Pending visits for one doctor.
pub type AppointmentQueue = PatientQueue;

/// Hospital-wide emergency cases, in arrival order.
pub type EmergencyQueue = PatientQueue;

impl PatientQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `patient_id` at the tail.
    pub fn enqueue(&mut self, patient_id: PatientId) {
        self.items.push_back(patient_id);
    }

    /// Remove and return the head, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<PatientId> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<PatientId> {
        self.items.front().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued ids, head first.
    pub fn iter(&self) -> impl Iterator<Item = PatientId> + '_ {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut queue = PatientQueue::new();
        queue.enqueue(PatientId::new(5));
        queue.enqueue(PatientId::new(7));

        assert_eq!(queue.peek(), Some(PatientId::new(5)));
        assert_eq!(queue.dequeue(), Some(PatientId::new(5)));
        assert_eq!(queue.dequeue(), Some(PatientId::new(7)));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn accepts_duplicate_ids() {
        let mut queue = PatientQueue::new();
        queue.enqueue(PatientId::new(2));
        queue.enqueue(PatientId::new(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.iter().collect::<Vec<_>>(),
            vec![PatientId::new(2), PatientId::new(2)]
        );
    }
}
