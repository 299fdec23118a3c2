/// xorshift32 stream for pilot decisions. A zero seed is remapped, since
/// xorshift never leaves the all-zero state.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    pub fn next_int(&mut self, max: u32) -> u32 {
        self.next() % max.max(1)
    }

    /// True roughly once every `one_in` calls.
    pub fn chance(&mut self, one_in: u32) -> bool {
        self.next_int(one_in) == 0
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_int(items.len() as u32) as usize;
        Some(items[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRng::new(0xC0FF_EE11);
        let mut b = SeededRng::new(0xC0FF_EE11);
        for _ in 0..32 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = SeededRng::new(0);
        assert_eq!(rng.state(), 0xDEAD_BEEF);
        assert_ne!(rng.next(), 0);
    }

    #[test]
    fn pick_stays_in_slice() {
        let mut rng = SeededRng::new(7);
        let items = [3, 5, 9];
        for _ in 0..100 {
            let value = rng.pick(&items).unwrap();
            assert!(items.contains(&value));
        }
        assert_eq!(rng.pick::<u8>(&[]), None);
    }
}
