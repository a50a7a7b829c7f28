mod extract;
mod films;
mod health;
mod reference;
mod routes;
mod state;
mod users;

pub use routes::create_router;
pub use state::AppState;
