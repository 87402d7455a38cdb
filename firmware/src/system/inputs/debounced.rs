/// Majority filter over the last `N` samples of a digital input.
#[derive(Debug, Eq, PartialEq, defmt::Format)]
pub struct Debounced<const N: usize> {
    samples: [bool; N],
    pointer: usize,
    active: bool,
}

impl<const N: usize> Debounced<N> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            samples: [false; N],
            pointer: 0,
            active: false,
        }
    }

    /// Feed a new sample and return whether this made the input go active.
    pub fn update(&mut self, value: bool) -> bool {
        self.samples[self.pointer] = value;
        self.pointer = (self.pointer + 1) % N;

        let was_active = self.active;
        let up = self.samples.iter().filter(|s| **s).count();
        self.active = up > N / 2;

        !was_active && self.active
    }
}
