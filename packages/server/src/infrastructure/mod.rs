//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod auth;
pub mod catalog;
pub mod dto;
pub mod message_pusher;
pub mod repository;
