use crate::prize::Prize;

/// Clamp a host-supplied weight to a usable slot count. Non-finite and
/// non-positive values fall back to 1 so a misconfigured prize still gets
/// one slot instead of disappearing from the wheel.
pub fn coerce_weight(weight: Option<f64>) -> usize {
    match weight {
        Some(w) if w.is_finite() => w.round().max(1.0) as usize,
        _ => 1,
    }
}

/// The flat, uniformly-samplable outcome space: each prize repeated
/// `coerce_weight(weight)` times, contiguously, in input order. Randomness
/// is applied at selection time, never at construction, so index -> prize
/// is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSpace {
    slots: Vec<Prize>,
}

impl OutcomeSpace {
    pub fn expand(prizes: &[Prize]) -> Self {
        let mut slots = Vec::new();
        for prize in prizes {
            for _ in 0..coerce_weight(prize.weight) {
                slots.push(prize.clone());
            }
        }
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.slots.iter()
    }
}
