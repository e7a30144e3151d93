//! Random color generation.
//!
//! Generators take any [`Rng`] so callers can pass a thread rng in
//! production and a seeded rng in tests.

use huemark_types::{HexColor, Palette, PALETTE_SIZE};
use rand::Rng;

/// Produce one random color, each of the six hex digits drawn independently
/// and uniformly from `0-9A-F`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> HexColor {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut text = String::with_capacity(7);
    text.push('#');
    for _ in 0..6 {
        let idx = rng.random_range(0..DIGITS.len());
        text.push(DIGITS[idx] as char);
    }
    // The digits above satisfy the HexColor invariant by construction.
    text.parse().expect("generated color is well-formed")
}

/// Produce a fresh palette of [`PALETTE_SIZE`] independent colors.
pub fn random_palette<R: Rng + ?Sized>(rng: &mut R) -> Palette {
    let colors: [HexColor; PALETTE_SIZE] = std::array::from_fn(|_| random_color(rng));
    Palette::new(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn colors_match_the_hex_format() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let color = random_color(&mut rng);
            let text = color.as_str();
            assert_eq!(text.len(), 7);
            assert!(text.starts_with('#'));
            assert!(text[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn palette_has_exactly_five_colors() {
        let mut rng = rand::rng();
        let palette = random_palette(&mut rng);
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert_eq!(PALETTE_SIZE, 5);
    }

    #[test]
    fn seeded_rng_reproduces_the_same_palette() {
        let palette_a = random_palette(&mut StdRng::seed_from_u64(7));
        let palette_b = random_palette(&mut StdRng::seed_from_u64(7));
        assert_eq!(palette_a, palette_b);
    }

    #[test]
    fn fresh_invocations_are_independent() {
        // Not a determinism guarantee, just a smoke check that consecutive
        // palettes from one rng differ.
        let mut rng = StdRng::seed_from_u64(7);
        let first = random_palette(&mut rng);
        let second = random_palette(&mut rng);
        assert_ne!(first, second);
    }
}
