pub mod activity_log_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use user_repo::UserRepo;
