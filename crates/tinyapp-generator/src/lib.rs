//! Short identifier generators.
//!
//! Generators are pure: they never consult a store, so uniqueness against
//! existing records is the caller's job (draw again on conflict).

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating short identifiers.
///
/// Implementations can vary from uniform random draws to deterministic
/// sequences used by tests and demos.
pub trait Generator: Send + Sync + 'static {
    type Output: AsRef<str>;

    /// Draws the next identifier. Consecutive calls may collide.
    fn generate(&self) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}
