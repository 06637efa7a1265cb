pub mod normalizer;
pub mod profile;
pub mod rankings;
mod text;

pub use normalizer::normalize;
pub use profile::{extract_bio, extract_player_bio, BioStrategy};
pub use rankings::{list_top_players, parse_rankings};
