use crate::core::sequence::{FaceSequence, HEXAGON, PENTAGON};
use crate::engine::config::TemplateFamily;
use crate::engine::utils::permutations::{DistinctPermutations, multinomial};
use itertools::Itertools;

/// Sequences assembled as tip + body + base.
///
/// The family fixes how many pentagons go into the tip and into the base.
/// Tip and base, each padded with their hexagons, are permuted independently
/// while the body stays a plain run of `body_length` hexagons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedSearch {
    pub family: TemplateFamily,
    pub tip_hexagons: usize,
    pub body_length: usize,
    pub base_hexagons: usize,
}

impl TemplatedSearch {
    pub fn estimate(&self) -> u64 {
        let (tip, base) = self.family.pentagon_split();
        multinomial(&[tip, self.tip_hexagons])
            .saturating_mul(multinomial(&[base, self.base_hexagons]))
    }

    pub fn candidates(&self) -> impl Iterator<Item = FaceSequence> + Send + 'static {
        let (tip_pentagons, base_pentagons) = self.family.pentagon_split();
        let tips = DistinctPermutations::new(cap(tip_pentagons, self.tip_hexagons));
        let bases = DistinctPermutations::new(cap(base_pentagons, self.base_hexagons));
        let body_length = self.body_length;
        tips.cartesian_product(bases).map(move |(tip, base)| {
            let mut sizes = tip;
            sizes.extend(std::iter::repeat_n(HEXAGON, body_length));
            sizes.extend(base);
            FaceSequence::new(sizes)
        })
    }
}

fn cap(pentagons: usize, hexagons: usize) -> Vec<u8> {
    let mut faces = vec![PENTAGON; pentagons];
    faces.extend(std::iter::repeat_n(HEXAGON, hexagons));
    faces
}
