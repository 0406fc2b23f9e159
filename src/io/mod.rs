pub mod lock;
pub mod plan_io;
pub mod recovery;
pub mod state;
pub mod watcher;
