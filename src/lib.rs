pub mod traits;
pub mod word;
pub mod placed_word;
pub mod grid;
pub mod word_search;
pub mod generator;
pub mod word_list;
pub mod render;
