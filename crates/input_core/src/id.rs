//! Page identity for text controls.
//!
//! Hosts stamp each textarea or input they hand us with a `ControlId` the
//! first time they see it, and keep the element on their side.

/// Key for a text control on the host page. Cheap to copy and compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// Hands out ids starting at 1, never reusing one for the life of the page.
#[derive(Debug, Default)]
pub struct ControlIdAllocator {
    next: u64,
}

impl ControlIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> ControlId {
        let id = ControlId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamped_attribute_value_round_trips() {
        let id = ControlId::from_raw(42);
        let stamped = id.as_raw().to_string();
        assert_eq!(stamped.parse::<u64>().map(ControlId::from_raw), Ok(id));
    }

    #[test]
    fn default_and_new_allocators_both_start_at_one() {
        let mut fresh = ControlIdAllocator::new();
        let mut defaulted = ControlIdAllocator::default();
        assert_eq!(fresh.allocate(), defaulted.allocate());

        assert_eq!(fresh.allocate().as_raw(), 2);
        assert_eq!(defaulted.allocate().as_raw(), 2);
    }
}
