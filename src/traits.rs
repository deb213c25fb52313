use rand::Rng;
use trait_set::trait_set;

trait_set! 
{
    /// Trait for any random source that can drive the placement of words in a [grid](crate::grid::Grid).
    /// 
    /// Any seedable generator works, so puzzles can be reproduced by seeding it (for example with [rand::rngs::StdRng]).
    pub trait PuzzleRng = Rng + Send;
}
