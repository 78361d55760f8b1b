//! User vectors and the pairwise-sum calculator.
//!
//! Vectors live in an append-only list and are referred to by index.
//! A [`Calculation`] stores such indices as its operands. Indices are only
//! meaningful until the next [`VectorStore::clear`], which also wipes the
//! calculation so no operand can outlive the vector it points at.

use glam::Vec3;

/// A vector entered by the user, drawn as an arrow from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserVector {
    /// Arrow tip.
    pub value: Vec3,
    /// Arrow color (rgb, 0..1).
    pub color: Vec3,
}

impl UserVector {
    /// Creates a new user vector.
    #[must_use]
    pub fn new(value: Vec3, color: Vec3) -> Self {
        Self { value, color }
    }
}

impl Default for UserVector {
    fn default() -> Self {
        Self::new(Vec3::splat(0.5), Vec3::new(1.0, 0.3, 0.2))
    }
}

/// Calculator operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Pairwise vector addition.
    Add,
    /// Reserved; pressing it does nothing yet.
    Multiply,
}

/// Calculator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalcState {
    /// No operator pending.
    #[default]
    Idle,
    /// An operator was pressed and the calculation is still open.
    OperatorPending,
}

/// Operands of the current (or most recently finished) calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculation {
    /// Indices into the vector list, in the order they were captured.
    pub operand_indices: Vec<usize>,
    /// True while the calculation is open.
    pub pending: bool,
}

/// The list of user vectors plus the calculator that combines them.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    vectors: Vec<UserVector>,
    calculation: Calculation,
    /// True while an operator waits for a vector added after it.
    expecting_next: bool,
    last_sum: Option<Vec3>,
    append_sum: Option<Vec3>,
    default_vector: UserVector,
    dirty: bool,
}

impl VectorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `finalize` append its result as a new vector with `color`.
    #[must_use]
    pub fn with_sum_appended(mut self, color: Vec3) -> Self {
        self.append_sum = Some(color);
        self
    }

    /// Sets the value and color used by [`Self::new_default_vector`].
    #[must_use]
    pub fn with_default_vector(mut self, value: Vec3, color: Vec3) -> Self {
        self.default_vector = UserVector::new(value, color);
        self
    }

    /// All vectors, in insertion order.
    #[must_use]
    pub fn vectors(&self) -> &[UserVector] {
        &self.vectors
    }

    /// Number of vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns true if no vectors have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Returns the vector at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&UserVector> {
        self.vectors.get(index)
    }

    /// The current calculator state.
    #[must_use]
    pub fn state(&self) -> CalcState {
        if self.calculation.pending {
            CalcState::OperatorPending
        } else {
            CalcState::Idle
        }
    }

    /// The current (or most recently finished) calculation.
    #[must_use]
    pub fn calculation(&self) -> &Calculation {
        &self.calculation
    }

    /// Returns true while an operator waits for a fresh operand.
    #[must_use]
    pub fn expecting_next(&self) -> bool {
        self.expecting_next
    }

    /// Result of the last finished calculation.
    #[must_use]
    pub fn last_sum(&self) -> Option<Vec3> {
        self.last_sum
    }

    /// Returns the dirty flag and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns the dirty flag without clearing it.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a vector and returns its index.
    ///
    /// While an operator is waiting, this supplies its missing operand; the
    /// index itself is captured by the next `+` or `=`.
    pub fn new_vector(&mut self, value: Vec3, color: Vec3) -> usize {
        self.vectors.push(UserVector::new(value, color));
        if self.calculation.pending && self.expecting_next {
            self.expecting_next = false;
        }
        self.dirty = true;
        self.vectors.len() - 1
    }

    /// Appends a copy of the configured default vector.
    pub fn new_default_vector(&mut self) -> usize {
        let UserVector { value, color } = self.default_vector;
        self.new_vector(value, color)
    }

    /// Replaces the value of the vector at `index`. Out of range is a no-op.
    pub fn set_value(&mut self, index: usize, value: Vec3) {
        let Some(vector) = self.vectors.get_mut(index) else {
            log::debug!("ignoring value edit for missing vector {index}");
            return;
        };
        if vector.value != value {
            vector.value = value;
            self.dirty = true;
        }
    }

    /// Replaces the color of the vector at `index`. Out of range is a no-op.
    pub fn set_color(&mut self, index: usize, color: Vec3) {
        let Some(vector) = self.vectors.get_mut(index) else {
            log::debug!("ignoring color edit for missing vector {index}");
            return;
        };
        if vector.color != color {
            vector.color = color;
            self.dirty = true;
        }
    }

    /// Presses an operator button.
    pub fn apply_operator(&mut self, op: Operator) {
        match op {
            Operator::Add => self.apply_add(),
            Operator::Multiply => log::debug!("multiply is not implemented"),
        }
    }

    fn apply_add(&mut self) {
        let Some(last) = self.vectors.len().checked_sub(1) else {
            return;
        };

        if !self.calculation.pending {
            self.calculation.operand_indices.clear();
            self.calculation.operand_indices.push(last);
            self.calculation.pending = true;
        } else if self.expecting_next {
            // `+` twice in a row: nothing new to capture
            return;
        } else {
            self.calculation.operand_indices.push(last);
        }

        self.expecting_next = true;
        self.dirty = true;
    }

    /// Presses `=`: closes the open calculation and returns its sum.
    ///
    /// The newest vector is appended as the final operand only if it was
    /// added after the last `+`. Pressed straight after `+`, nothing is
    /// appended, so `a + =` sums `a` alone instead of counting it twice.
    ///
    /// Returns `None` and changes nothing when no operator is pending.
    pub fn finalize(&mut self) -> Option<Vec3> {
        if !self.calculation.pending {
            return None;
        }

        if !self.expecting_next {
            if let Some(last) = self.vectors.len().checked_sub(1) {
                self.calculation.operand_indices.push(last);
            }
        }

        let sum: Vec3 = self
            .calculation
            .operand_indices
            .iter()
            .filter_map(|&i| self.vectors.get(i))
            .map(|v| v.value)
            .sum();

        log::info!(
            "sum of vectors {:?} = ({}, {}, {})",
            self.calculation.operand_indices,
            sum.x,
            sum.y,
            sum.z
        );

        self.calculation.pending = false;
        self.expecting_next = false;
        self.last_sum = Some(sum);
        self.dirty = true;

        if let Some(color) = self.append_sum {
            self.vectors.push(UserVector::new(sum, color));
        }

        Some(sum)
    }

    /// Removes every vector and resets the calculator, from any state.
    pub fn clear(&mut self) {
        self.vectors.clear();
        self.calculation = Calculation::default();
        self.expecting_next = false;
        self.last_sum = None;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn test_new_store_is_idle() {
        let store = VectorStore::new();
        assert!(store.is_empty());
        assert_eq!(store.state(), CalcState::Idle);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_add_two_vectors() {
        let mut store = VectorStore::new();
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 1.0);

        let ia = store.new_vector(a, RED);
        store.apply_operator(Operator::Add);
        assert_eq!(store.state(), CalcState::OperatorPending);
        assert!(store.expecting_next());

        let ib = store.new_vector(b, GREEN);
        assert!(!store.expecting_next());

        let sum = store.finalize();
        assert_eq!(store.state(), CalcState::Idle);
        assert_eq!(store.calculation().operand_indices, vec![ia, ib]);
        assert_eq!(sum, Some(a + b));
        assert_eq!(store.last_sum(), Some(a + b));
        // no vector appended by default
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_new_default_vector_uses_configured_defaults() {
        let mut store = VectorStore::new().with_default_vector(Vec3::Z, GREEN);
        let index = store.new_default_vector();
        assert_eq!(store.get(index), Some(&UserVector::new(Vec3::Z, GREEN)));
        assert!(store.take_dirty());
    }

    #[test]
    fn test_chained_addition() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Y, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Z, RED);

        assert_eq!(store.finalize(), Some(Vec3::ONE));
        assert_eq!(store.calculation().operand_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_repeated_plus_does_not_duplicate() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.apply_operator(Operator::Add);
        assert_eq!(store.calculation().operand_indices, vec![0]);

        // `=` without a fresh operand sums what was captured
        assert_eq!(store.finalize(), Some(Vec3::X));
        assert_eq!(store.calculation().operand_indices, vec![0]);
    }

    #[test]
    fn test_plus_without_vectors_is_noop() {
        let mut store = VectorStore::new();
        store.apply_operator(Operator::Add);
        assert_eq!(store.state(), CalcState::Idle);
        assert!(store.calculation().operand_indices.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_finalize_while_idle_is_noop() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Y, RED);
        store.finalize();
        store.take_dirty();

        let before = store.calculation().clone();
        assert_eq!(store.finalize(), None);
        assert_eq!(store.state(), CalcState::Idle);
        assert_eq!(store.calculation(), &before);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_next_calculation_starts_fresh() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Y, RED);
        store.finalize();

        store.apply_operator(Operator::Add);
        assert_eq!(store.calculation().operand_indices, vec![1]);
        store.new_vector(Vec3::Z, RED);
        assert_eq!(store.finalize(), Some(Vec3::Y + Vec3::Z));
    }

    #[test]
    fn test_multiply_is_noop() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.take_dirty();
        store.apply_operator(Operator::Multiply);
        assert_eq!(store.state(), CalcState::Idle);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_clear_from_pending() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Y, RED);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.state(), CalcState::Idle);
        assert!(store.calculation().operand_indices.is_empty());
        assert!(!store.expecting_next());
        assert_eq!(store.last_sum(), None);

        // stale state must not leak into the next calculation
        store.new_vector(Vec3::Z, RED);
        store.apply_operator(Operator::Add);
        assert_eq!(store.calculation().operand_indices, vec![0]);
    }

    #[test]
    fn test_clear_from_idle() {
        let mut store = VectorStore::new();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.state(), CalcState::Idle);
        assert!(store.take_dirty());
    }

    #[test]
    fn test_dirty_flag_consumed_once() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        assert!(store.take_dirty());
        assert!(!store.take_dirty());
    }

    #[test]
    fn test_edits() {
        let mut store = VectorStore::new();
        store.new_vector(Vec3::X, RED);
        store.take_dirty();

        store.set_value(0, Vec3::Y);
        store.set_color(0, GREEN);
        assert!(store.take_dirty());
        assert_eq!(store.get(0), Some(&UserVector::new(Vec3::Y, GREEN)));

        // unchanged values do not mark the store dirty
        store.set_value(0, Vec3::Y);
        assert!(!store.take_dirty());

        store.set_value(7, Vec3::Z);
        store.set_color(7, RED);
        assert!(!store.take_dirty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sum_appended_when_enabled() {
        let mut store = VectorStore::new().with_sum_appended(GREEN);
        store.new_vector(Vec3::X, RED);
        store.apply_operator(Operator::Add);
        store.new_vector(Vec3::Y, RED);
        store.finalize();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2), Some(&UserVector::new(Vec3::new(1.0, 1.0, 0.0), GREEN)));
        assert_eq!(store.calculation().operand_indices, vec![0, 1]);
    }
}
