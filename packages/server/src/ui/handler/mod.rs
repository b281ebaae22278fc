//! Request handlers.

mod account;
mod http;
mod movies;
mod websocket;

pub use account::{
    delete_profile, get_profile, get_user, login, register, request_password_reset,
    reset_password, search_users, update_profile,
};
pub use http::{get_room_detail, get_rooms, health_check};
pub use movies::get_movies;
pub use websocket::websocket_handler;
