pub mod game_repository;
pub mod score_repository;
pub mod user_repository;

pub use game_repository::GameRepository;
pub use score_repository::ScoreRepository;
pub use user_repository::UserRepository;
