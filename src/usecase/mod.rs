pub mod login;
pub mod profile;
pub mod register;
pub mod verify;
