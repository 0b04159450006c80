//! Full-screen views

pub mod home;
pub mod pokedex;
