use crate::config::Config;
use crate::repository::Repository;

pub struct AppState {
    pub repo: Repository,
    pub config: Config,
}
