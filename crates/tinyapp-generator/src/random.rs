use crate::Generator;
use rand::seq::SliceRandom;
use typed_builder::TypedBuilder;

/// The 62 ASCII letters and digits.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_LENGTH: usize = 6;

/// Draws fixed-length identifiers uniformly from an alphabet.
///
/// The defaults give six symbols from [`ALPHANUMERIC`], i.e. 62^6 possible
/// identifiers. Tests narrow the alphabet to force collisions:
///
/// ```
/// use tinyapp_generator::{Generator, RandomGenerator};
///
/// let generator = RandomGenerator::builder().alphabet("ab").length(2).build();
/// let id = generator.generate();
/// assert_eq!(id.len(), 2);
/// assert!(id.chars().all(|c| c == 'a' || c == 'b'));
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(
        default = ALPHANUMERIC.chars().collect(),
        setter(transform = |alphabet: &str| alphabet.chars().collect())
    )]
    alphabet: Vec<char>,
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    /// Number of distinct identifiers this generator can produce.
    ///
    /// Saturates at `u64::MAX`.
    pub fn space(&self) -> u64 {
        (self.alphabet.len() as u64).saturating_pow(self.length as u32)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Generator for RandomGenerator {
    type Output = String;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::thread_rng();
        // An empty alphabet yields an empty string.
        (0..self.length)
            .filter_map(|_| self.alphabet.choose(&mut rng))
            .collect()
    }
}
