mod users;

pub use users::router;
