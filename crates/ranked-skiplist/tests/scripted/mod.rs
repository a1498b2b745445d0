use ranked_skiplist::Prng32;


/// Grants every level, so each node is as tall as the list currently allows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Always;

impl Prng32 for Always {
    fn rand_u32(&mut self) -> u32 {
        0
    }
}

/// Never grants a level, which turns a skiplist into a sorted linked list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Never;

impl Prng32 for Never {
    fn rand_u32(&mut self) -> u32 {
        1
    }
}

/// Replays a fixed sequence of values, forever.
#[derive(Debug, Clone)]
pub(crate) struct Cycle {
    values: Vec<u32>,
    next:   usize,
}

impl Cycle {
    pub(crate) fn new(values: &[u32]) -> Self {
        assert!(!values.is_empty(), "a `Cycle` needs at least one value");

        Self {
            values: values.to_vec(),
            next:   0,
        }
    }
}

impl Prng32 for Cycle {
    fn rand_u32(&mut self) -> u32 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}
