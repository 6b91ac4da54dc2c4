pub mod folds;
pub mod manager;
pub mod traits;

pub use folds::FoldConfig;
pub use manager::AppConfig;
pub use traits::ConfigSection;
