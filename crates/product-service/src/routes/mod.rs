mod products;

pub use products::router;
