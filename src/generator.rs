use std::{future::Future, pin::Pin, task::{Context, Poll}};

use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::mpsc::{self, Receiver, Sender}, task};
use tokio_stream::Stream;
use tracing::{debug, info, warn, Level};

use crate::{grid::{Grid, GridError}, placed_word::PlacedWord, traits::PuzzleRng, word::{Direction, Position, Word}, word_search::WordSearch};

/// Error type for possible errors when generating word searches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError
{
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("The word {word} ({len} letters) doesn't fit in a {width}x{height} grid in any direction.")]
    WordTooLarge { word: String, len: usize, width: usize, height: usize },
    #[error("Gave up after {tries} tries for word {word}.")]
    PlacementExhausted { word: String, tries: u32 },
    #[error("Couldn't place all words after {attempts} attempts.")]
    AttemptsExhausted { attempts: u32, word: Option<String> },
}

/// Represents all settings for a [generator](WordSearchGenerator).
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSearchGeneratorSettings
{
    pub width: usize,
    pub height: usize,
    /// How many random positions are tried for one word before giving up on the whole grid
    pub tries_per_word: u32,
    /// How many fresh grids are tried before giving up completely
    pub max_attempts: u32,
}

impl Default for WordSearchGeneratorSettings
{
    fn default() -> Self
    {
        WordSearchGeneratorSettings
        {
            width: 30,
            height: 30,
            tries_per_word: 100,
            max_attempts: 10,
        }
    }
}

/// Represents a word search generator.
///
/// Words are placed by trial and error: every word gets a bounded number of random positions and directions,
/// the first one that fits wins. There is no backtracking, if a word can't be placed the whole grid is thrown
/// away and [generate](WordSearchGenerator::generate) starts over with a fresh one.
///
/// # Example
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use word_salad::generator::{WordSearchGenerator, WordSearchGeneratorSettings};
/// use word_salad::word::Word;
///
/// let generator = WordSearchGenerator
/// {
///     words: vec![Word::new("cat").unwrap(), Word::new("dog").unwrap()],
///     settings: WordSearchGeneratorSettings { width: 5, height: 5, ..Default::default() },
/// };
///
/// let ws = generator.generate(&mut StdRng::seed_from_u64(3)).unwrap();
///
/// assert!(ws.grid.is_filled());
/// assert!(ws.find_word("cat").is_some());
/// ```
#[derive(Clone, Eq, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct WordSearchGenerator
{
    pub words: Vec<Word>,
    pub settings: WordSearchGeneratorSettings,
}

impl WordSearchGenerator
{
    /// Places all [words](Word) on an empty [grid](Grid), then fills the rest of the grid with random letters
    ///
    /// Words are placed longest first (words of the same length keep their order), the returned
    /// [placements](PlacedWord) are in that order. If this fails the grid is left half-filled and should be discarded.
    ///
    /// # Errors
    ///
    /// [GenerationError::WordTooLarge] - the longest word is longer than both the width and the height, returned before using the random source
    ///
    /// [GenerationError::PlacementExhausted] - a word didn't fit anywhere in `tries_per_word` random tries
    pub fn place_words<R: PuzzleRng>(words: &[Word], grid: &mut Grid, tries_per_word: u32, rng: &mut R) -> Result<Vec<PlacedWord>, GenerationError>
    {
        let words = words.iter().sorted_by(|a, b| b.len().cmp(&a.len())).collect_vec();

        if let Some(longest) = words.first()
        {
            if longest.len() > grid.width() && longest.len() > grid.height()
            {
                return Err(GenerationError::WordTooLarge { word: longest.to_string(), len: longest.len(), width: grid.width(), height: grid.height() });
            }
        }

        let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
        for word in words
        {
            let found = (1..=tries_per_word).find_map(|tries|
            {
                let pos = Position::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
                let dir = Direction::random(rng);
                grid.word_fits(word, pos, dir).then_some((tries, pos, dir))
            });

            let Some((tries, pos, dir)) = found else
            {
                return Err(GenerationError::PlacementExhausted { word: word.to_string(), tries: tries_per_word });
            };

            let new_word = grid.place_word(word, pos, dir)?;
            if tracing::enabled!(Level::DEBUG)
            {
                let crossings = placed.iter().filter(|w| !w.shared_cells(&new_word).is_empty()).count();
                debug!(word = %word, x = pos.x, y = pos.y, direction = %dir, tries, crossings, "placed word");
            }
            placed.push(new_word);
        }

        grid.fill_remaining(rng);
        Ok(placed)
    }

    /// Generates a full [word search](WordSearch), retrying with a fresh grid up to `max_attempts` times
    ///
    /// # Errors
    ///
    /// [GenerationError::Grid] - the configured size is invalid
    ///
    /// [GenerationError::WordTooLarge] - see [WordSearchGenerator::place_words], retrying wouldn't help so it's returned right away
    ///
    /// [GenerationError::AttemptsExhausted] - every attempt ended with a word that couldn't be placed
    pub fn generate<R: PuzzleRng>(&self, rng: &mut R) -> Result<WordSearch, GenerationError>
    {
        let mut last_failed = None;

        for attempt in 1..=self.settings.max_attempts
        {
            let mut grid = Grid::new(self.settings.width, self.settings.height)?;

            match WordSearchGenerator::place_words(&self.words, &mut grid, self.settings.tries_per_word, rng)
            {
                Ok(words) =>
                {
                    info!(attempt, words = words.len(), "generated word search");
                    return Ok(WordSearch { grid, words, attempts: attempt });
                }
                Err(GenerationError::PlacementExhausted { word, tries }) =>
                {
                    warn!(attempt, word = %word, tries, "gave up on word, starting over with a fresh grid");
                    last_failed = Some(word);
                }
                Err(err) => return Err(err),
            }
        }

        Err(GenerationError::AttemptsExhausted { attempts: self.settings.max_attempts, word: last_failed })
    }

    /// Starts generating word searches in the background, all from one random source seeded with `seed`
    ///
    /// Nothing is generated until a [request](PuzzleRequest) is sent with [WordSearchStream::request_puzzle].
    pub fn puzzle_stream(&self, seed: u64) -> WordSearchStream
    {
        let gen = self.clone();

        let gen_func = move |mut rr: Receiver<PuzzleRequest>, ps: Sender<Result<WordSearch, GenerationError>>| async move
        {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut current_request = PuzzleRequest::Count(0);

            loop
            {
                if let PuzzleRequest::Endless = current_request
                {
                    match rr.try_recv()
                    {
                        Ok(PuzzleRequest::Stop) => return,
                        Ok(req) => current_request = req,
                        Err(_) => {}
                    }
                }

                while let PuzzleRequest::Count(0) = current_request
                {
                    match rr.recv().await
                    {
                        None | Some(PuzzleRequest::Stop) => return,
                        Some(req) => current_request = req
                    }
                }

                let result = gen.generate(&mut rng);
                let failed = result.is_err();
                if ps.send(result).await.is_err() || failed { return; }

                if let PuzzleRequest::Count(count) = current_request { current_request = PuzzleRequest::Count(count - 1) }
            }
        };

        WordSearchStream::new(gen_func)
    }
}


/// Represents a request to [WordSearchStream] for generating word searches.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub enum PuzzleRequest
{
    /// Request to stop the generation.
    #[default]
    Stop,
    /// Request for some count of word searches to generate.
    Count(u32),
    /// Request for generating word searches until a [PuzzleRequest::Stop] arrives.
    Endless
}

/// Stream of generated word searches
///
/// Yields an error at most once, the stream ends right after it.
pub struct WordSearchStream
{
    request_sender: Sender<PuzzleRequest>,
    puzzle_reciever: Receiver<Result<WordSearch, GenerationError>>
}

impl WordSearchStream
{
    pub fn new<F,Fut>(gen_func: F) -> WordSearchStream
    where
        F: FnOnce(Receiver<PuzzleRequest>, Sender<Result<WordSearch, GenerationError>>) -> Fut,
        Fut: Future<Output=()> + Send + 'static
    {
        let (rs, rr) = mpsc::channel(100);
        let (ps, pr) = mpsc::channel(100);

        task::spawn(gen_func(rr, ps));

        WordSearchStream { request_sender: rs, puzzle_reciever: pr }
    }

    /// Requests word searches to generate.
    ///
    /// After the requested count is generated the stream waits for other requests, so to generate for example 10 word searches
    /// request that, and then request a [PuzzleRequest::Stop] to end the stream.
    ///
    /// Returns false if the generator already stopped.
    pub async fn request_puzzle(&self, req: PuzzleRequest) -> bool
    {
        self.request_sender.send(req).await.is_ok()
    }
}

impl Stream for WordSearchStream
{
    type Item = Result<WordSearch, GenerationError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>>
    {
        self.puzzle_reciever.poll_recv(cx)
    }
}


#[cfg(test)]
mod tests {
    use rand::RngCore;
    use tokio_stream::StreamExt;

    use super::*;

    fn words(vals: &[&str]) -> Vec<Word>
    {
        vals.iter().map(|v| Word::new(v).unwrap()).collect()
    }

    fn generator(vals: &[&str], width: usize, height: usize) -> WordSearchGenerator
    {
        WordSearchGenerator
        {
            words: words(vals),
            settings: WordSearchGeneratorSettings { width, height, ..Default::default() }
        }
    }

    #[test]
    fn test_place_cat_and_dog() {
        let mut grid = Grid::new(5, 5).unwrap();
        let placed = WordSearchGenerator::place_words(&words(&["cat", "dog"]), &mut grid, 100, &mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(placed.iter().map(|w| w.value.value()).collect_vec(), vec!["CAT", "DOG"]);
        for w in placed.iter()
        {
            assert_eq!(grid.word_at(w.position, w.direction, w.len()).as_deref(), Some(w.value.value()));
        }
        assert!(grid.is_filled());
    }

    #[test]
    fn test_placement_with_debug_logging_matches_silent_placement() {
        let subscriber = tracing_subscriber::fmt().with_max_level(Level::DEBUG).with_test_writer().finish();
        let place = ||
        {
            let mut grid = Grid::new(6, 6).unwrap();
            let placed = WordSearchGenerator::place_words(&words(&["cat", "cot", "tic"]), &mut grid, 1000, &mut StdRng::seed_from_u64(21)).unwrap();
            (placed, grid)
        };

        let logged = tracing::subscriber::with_default(subscriber, place);
        let silent = place();

        assert_eq!(logged, silent);
        assert_eq!(logged.0.len(), 3);
    }

    #[test]
    fn test_words_are_placed_longest_first() {
        let mut grid = Grid::new(10, 10).unwrap();
        let placed = WordSearchGenerator::place_words(&words(&["ox", "horse", "cat", "dog", "mouse"]), &mut grid, 1000, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(placed.iter().map(|w| w.value.value()).collect_vec(), vec!["HORSE", "MOUSE", "CAT", "DOG", "OX"]);
    }

    #[test]
    fn test_word_too_large_uses_no_randomness() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut untouched = rng.clone();

        let res = WordSearchGenerator::place_words(&words(&["cat", "supercalifragilisticexpialidocious"]), &mut grid, 100, &mut rng);

        assert_eq!(res, Err(GenerationError::WordTooLarge { word: "SUPERCALIFRAGILISTICEXPIALIDOCIOUS".to_owned(), len: 34, width: 5, height: 5 }));
        assert_eq!(rng.next_u64(), untouched.next_u64());
        assert!(grid.rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_word_longer_than_one_side_only() {
        let mut grid = Grid::new(2, 6).unwrap();
        let placed = WordSearchGenerator::place_words(&words(&["banana"]), &mut grid, 1000, &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(placed[0].direction, Direction::Down);
        assert_eq!(placed[0].position.y, 0);
    }

    #[test]
    fn test_duplicate_words_in_tiny_grid() {
        // of the 8 equally likely draws, the second AB fits in at least 2, so 1000 tries always converge
        let mut grid = Grid::new(2, 2).unwrap();
        let placed = WordSearchGenerator::place_words(&words(&["ab", "ab"]), &mut grid, 1000, &mut StdRng::seed_from_u64(2024)).unwrap();

        assert_eq!(placed.len(), 2);
        for w in placed.iter()
        {
            assert_eq!(grid.word_at(w.position, w.direction, 2).as_deref(), Some("AB"));
        }
    }

    #[test]
    fn test_placement_exhausted() {
        // a 2x1 grid only has one spot for a two letter word, and "ab" blocks "cd"
        let mut grid = Grid::new(2, 1).unwrap();
        let res = WordSearchGenerator::place_words(&words(&["ab", "cd"]), &mut grid, 200, &mut StdRng::seed_from_u64(1));

        assert_eq!(res, Err(GenerationError::PlacementExhausted { word: "CD".to_owned(), tries: 200 }));
    }

    #[test]
    fn test_zero_tries_fails_first_word() {
        let mut grid = Grid::new(5, 5).unwrap();
        let res = WordSearchGenerator::place_words(&words(&["cat"]), &mut grid, 0, &mut StdRng::seed_from_u64(1));

        assert_eq!(res, Err(GenerationError::PlacementExhausted { word: "CAT".to_owned(), tries: 0 }));
    }

    #[test]
    fn test_empty_word_list_only_fills() {
        let mut grid = Grid::new(3, 3).unwrap();
        let placed = WordSearchGenerator::place_words(&[], &mut grid, 10, &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(placed.is_empty());
        assert!(grid.is_filled());
        assert!(grid.rows().flatten().all(|c| !c.is_word_char));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let gen = generator(&["hello", "world", "sesame", "yeeee", "nouyt"], 8, 8);

        let first = gen.generate(&mut StdRng::seed_from_u64(77)).unwrap();
        let second = gen.generate(&mut StdRng::seed_from_u64(77)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_word_too_large() {
        let gen = generator(&["supercalifragilisticexpialidocious"], 5, 5);
        assert!(matches!(gen.generate(&mut StdRng::seed_from_u64(1)), Err(GenerationError::WordTooLarge { .. })));
    }

    #[test]
    fn test_generate_invalid_dimension() {
        let gen = generator(&["cat"], 0, 5);
        assert_eq!(gen.generate(&mut StdRng::seed_from_u64(1)), Err(GenerationError::Grid(GridError::InvalidDimension { width: 0, height: 5 })));
    }

    #[test]
    fn test_generate_attempts_exhausted() {
        let mut gen = generator(&["ab", "cd"], 2, 1);
        gen.settings.max_attempts = 3;
        gen.settings.tries_per_word = 200;

        assert_eq!(gen.generate(&mut StdRng::seed_from_u64(1)), Err(GenerationError::AttemptsExhausted { attempts: 3, word: Some("CD".to_owned()) }));
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: WordSearchGeneratorSettings = serde_json::from_str(r#"{ "width": 12, "tries_per_word": 500 }"#).unwrap();
        assert_eq!(settings, WordSearchGeneratorSettings { width: 12, tries_per_word: 500, ..Default::default() });
    }

    #[test]
    fn test_puzzle_rng_accepts_any_rng() {
        fn draw<R: PuzzleRng>(rng: &mut R) -> usize { rng.gen_range(0..10) }
        assert!(draw(&mut StdRng::seed_from_u64(1)) < 10);
    }

    #[tokio::test]
    async fn test_puzzle_stream_count() {
        let gen = generator(&["cat", "dog", "bird"], 6, 6);

        let str = gen.puzzle_stream(99);
        assert!(str.request_puzzle(PuzzleRequest::Count(3)).await);
        assert!(str.request_puzzle(PuzzleRequest::Stop).await);

        let puzzles: Vec<_> = str.collect().await;
        assert_eq!(puzzles.len(), 3);
        assert!(puzzles.iter().all(|p| p.as_ref().is_ok_and(|ws| ws.grid.is_filled() && ws.words.len() == 3)));
    }

    #[tokio::test]
    async fn test_puzzle_stream_is_reproducible() {
        let gen = generator(&["cat", "dog", "bird"], 6, 6);

        let mut results = vec![];
        for _ in 0..2
        {
            let str = gen.puzzle_stream(1234);
            str.request_puzzle(PuzzleRequest::Count(2)).await;
            str.request_puzzle(PuzzleRequest::Stop).await;
            results.push(str.collect::<Vec<_>>().await);
        }

        assert_eq!(results[0], results[1]);
    }

    #[tokio::test]
    async fn test_puzzle_stream_ends_after_error() {
        let gen = generator(&["supercalifragilisticexpialidocious"], 5, 5);

        let mut str = gen.puzzle_stream(1);
        str.request_puzzle(PuzzleRequest::Endless).await;

        assert!(matches!(str.next().await, Some(Err(GenerationError::WordTooLarge { .. }))));
        assert!(str.next().await.is_none());
    }

    #[tokio::test]
    async fn test_puzzle_stream_endless_then_stop() {
        let gen = generator(&["cat"], 4, 4);

        let mut str = gen.puzzle_stream(5);
        str.request_puzzle(PuzzleRequest::Endless).await;
        for _ in 0..5
        {
            assert!(str.next().await.is_some_and(|p| p.is_ok()));
        }
        str.request_puzzle(PuzzleRequest::Stop).await;

        // puzzles generated before the stop was seen are still delivered
        while let Some(p) = str.next().await
        {
            assert!(p.is_ok());
        }
    }
}
