//! Triage Queue - the priority queue engine.
//!
//! A `Vec`-backed binary min-heap of patients keyed on `(urgency, arrival)`.
//! Node `i`'s children live at `2i+1` and `2i+2`, its parent at `(i-1)/2`;
//! the root is always the next patient to be seen. The flat array keeps
//! parent/child hops as index arithmetic instead of pointer chasing.

use crate::command::TriageError;
use crate::patient::Patient;

/// Priority queue of waiting patients.
///
/// Admission assigns each patient a strictly increasing arrival number, so
/// no two patients ever compare equal and service order is deterministic:
/// urgency first, FIFO within the same urgency.
#[derive(Debug, Default)]
pub struct TriageQueue {
    /// Implicit binary tree in backing-array order
    heap: Vec<Patient>,
    /// Last arrival number handed out; pre-incremented on admission
    next_arrival: u64,
}

impl TriageQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_arrival: 0,
        }
    }

    /// Create an empty queue with room for `capacity` patients
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_arrival: 0,
        }
    }

    // ========================================================================
    // Queue Operations
    // ========================================================================

    /// Admit a patient.
    ///
    /// Assigns the next arrival number, appends the patient, and sifts it
    /// up until its parent orders before it. Arrival numbers keep
    /// increasing across later removals, so they stay globally unique.
    ///
    /// # Complexity
    /// O(log n)
    pub fn add(&mut self, mut patient: Patient) {
        self.next_arrival += 1;
        patient.assign_arrival(self.next_arrival);
        self.heap.push(patient);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the next patient to be seen.
    ///
    /// The last entry moves into the root slot and sifts down toward the
    /// leaves until both children order after it. Ownership of the
    /// returned patient transfers to the caller.
    ///
    /// # Errors
    /// `EmptyQueue` if nobody is waiting; state is untouched.
    ///
    /// # Complexity
    /// O(log n)
    pub fn remove_next(&mut self) -> Result<Patient, TriageError> {
        if self.heap.is_empty() {
            return Err(TriageError::EmptyQueue);
        }

        // swap_remove is exactly the remove-min move: last entry into the
        // root slot, sequence shrinks by one.
        let next = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(next)
    }

    /// Next patient to be seen, without removing them.
    ///
    /// # Errors
    /// `EmptyQueue` if nobody is waiting.
    pub fn peek_next(&self) -> Result<&Patient, TriageError> {
        self.heap.first().ok_or(TriageError::EmptyQueue)
    }

    /// Number of waiting patients
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nobody is waiting
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Patients in current backing-array order.
    ///
    /// Heap order, not service order: only the first element is guaranteed
    /// to be the next patient seen.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.heap.iter()
    }

    /// Waiting-list rows in backing-array order (the order `list` shows).
    pub fn render(&self) -> String {
        self.heap.iter().map(Patient::row).collect()
    }

    // ========================================================================
    // Heap Restoration
    // ========================================================================

    /// Walk an entry toward the root, swapping with its parent while it
    /// orders strictly before the parent.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent] <= self.heap[index] {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    /// Walk an entry toward the leaves, swapping with the smaller child
    /// while that child orders strictly before it. A missing right child
    /// leaves only the left child eligible.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}
