//! Sources of randomness and element colors.
//!
//! Layout only ever draws random numbers through [`RandomSource`] and asks
//! for colors through [`ColorSource`], so callers (and tests) can swap in
//! deterministic implementations without touching the placement code.

/// Uniform numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// Backed by the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> f32 {
        match getrandom::u32() {
            // 24 high bits fit the f32 mantissa exactly, keeping the result below 1.0.
            Ok(bits) => (bits >> 8) as f32 / (1u32 << 24) as f32,
            Err(err) => {
                log::warn!("entropy source unavailable: {err}");
                0.5
            }
        }
    }
}

/// Replays a fixed sequence, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }
}

/// Picks a fill color for the element at `index` (placement order).
pub trait ColorSource {
    fn color_for(&mut self, index: usize) -> String;
}

/// Random pick from a palette for every element.
pub struct RandomPalette<R> {
    palette: Vec<String>,
    random: R,
}

impl<R: RandomSource> RandomPalette<R> {
    pub fn new(palette: Vec<String>, random: R) -> Self {
        Self { palette, random }
    }
}

impl<R: RandomSource> ColorSource for RandomPalette<R> {
    fn color_for(&mut self, _index: usize) -> String {
        if self.palette.is_empty() {
            return random_hue(&mut self.random);
        }
        let pick = (self.random.next_unit() * self.palette.len() as f32) as usize;
        self.palette[pick.min(self.palette.len() - 1)].clone()
    }
}

/// Walks a palette in order, falling back to random hues when it is empty.
pub struct CyclePalette<R> {
    palette: Vec<String>,
    random: R,
}

impl<R: RandomSource> CyclePalette<R> {
    pub fn new(palette: Vec<String>, random: R) -> Self {
        Self { palette, random }
    }
}

impl<R: RandomSource> ColorSource for CyclePalette<R> {
    fn color_for(&mut self, index: usize) -> String {
        if self.palette.is_empty() {
            return random_hue(&mut self.random);
        }
        self.palette[index % self.palette.len()].clone()
    }
}

/// Same color for everything.
#[derive(Debug, Clone)]
pub struct SolidColor(pub String);

impl ColorSource for SolidColor {
    fn color_for(&mut self, _index: usize) -> String {
        self.0.clone()
    }
}

fn random_hue(random: &mut dyn RandomSource) -> String {
    let hue = random.next_unit() * 360.0;
    format!("hsl({hue:.0}, 70%, 60%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        vec!["#a".to_string(), "#b".to_string(), "#c".to_string()]
    }

    #[test]
    fn fixed_random_wraps() {
        let mut random = FixedRandom::new(vec![0.1, 0.9]);
        assert_eq!(random.next_unit(), 0.1);
        assert_eq!(random.next_unit(), 0.9);
        assert_eq!(random.next_unit(), 0.1);
    }

    #[test]
    fn os_random_stays_in_unit_range() {
        let mut random = OsRandom;
        for _ in 0..64 {
            let value = random.next_unit();
            assert!((0.0..1.0).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn random_palette_maps_unit_to_entry() {
        let mut colors = RandomPalette::new(palette(), FixedRandom::new(vec![0.0, 0.5, 0.99]));
        assert_eq!(colors.color_for(0), "#a");
        assert_eq!(colors.color_for(1), "#b");
        assert_eq!(colors.color_for(2), "#c");
    }

    #[test]
    fn cycle_palette_wraps_by_index() {
        let mut colors = CyclePalette::new(palette(), FixedRandom::new(vec![0.0]));
        assert_eq!(colors.color_for(0), "#a");
        assert_eq!(colors.color_for(4), "#b");
    }

    #[test]
    fn empty_palette_uses_hsl() {
        let mut colors = CyclePalette::new(Vec::new(), FixedRandom::new(vec![0.5]));
        assert_eq!(colors.color_for(0), "hsl(180, 70%, 60%)");
    }
}
