/// Ordered threshold bands mapping a score to a qualitative level.
///
/// `cuts` must be strictly increasing; scores below the first cut fall into `floor`.
#[derive(Debug, Clone, Copy)]
pub struct Bands<L: Copy + 'static> {
    floor: L,
    cuts: &'static [(f64, L)],
}

impl<L: Copy + 'static> Bands<L> {
    pub const fn new(floor: L, cuts: &'static [(f64, L)]) -> Self {
        Self { floor, cuts }
    }

    pub fn classify(&self, score: f64) -> L {
        self.cuts
            .iter()
            .take_while(|(cut, _)| score >= *cut)
            .last()
            .map(|(_, level)| *level)
            .unwrap_or(self.floor)
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.cuts.windows(2).all(|pair| pair[0].0 < pair[1].0)
    }
}
